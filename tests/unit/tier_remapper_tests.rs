/*!
 * Tests for position-based tier renaming
 */

use tgrename::textgrid::{Interval, IntervalTier, Point, PointTier, ReadOptions, TextGrid, Tier};
use tgrename::tier_remapper::{remap_tiers, TierNameMap};
use crate::common;

fn overrides(pairs: &[(i64, &str)]) -> TierNameMap {
    pairs.iter().map(|(i, name)| (*i, name.to_string())).collect()
}

fn interval_tier(name: &str, entries: Vec<Interval>) -> Tier {
    Tier::Interval(IntervalTier::new(name, 0.0, 3.0, entries))
}

/// Test the documented scenario: blank names fall back, overrides win
#[test]
fn test_remapTiers_withSentenceWordsMap_shouldRenameByPosition() {
    let mut source = TextGrid::new(0.0, 3.0);
    source.tiers.push(interval_tier("", vec![Interval::new(0.0, 3.0, "a b c")]));
    source.tiers.push(interval_tier("old_words", vec![Interval::new(0.0, 1.0, "a"), Interval::new(1.0, 3.0, "bc")]));
    source.tiers.push(interval_tier("   ", vec![Interval::new(0.5, 0.75, "x")]));

    let remapped = remap_tiers(&source, &overrides(&[(0, "sentence"), (1, "words")]));

    assert_eq!(remapped.tier_names(), vec!["sentence", "words", "tier_3"]);
    for (before, after) in source.tiers.iter().zip(&remapped.tiers) {
        match (before, after) {
            (Tier::Interval(b), Tier::Interval(a)) => assert_eq!(a.entries, b.entries),
            _ => panic!("tier kind changed"),
        }
    }
}

/// Test that an unmapped point tier keeps its name and points
#[test]
fn test_remapTiers_withUnmappedPointTier_shouldKeepNameAndPoints() {
    let points = vec![Point::new(0.3, "click"), Point::new(2.9, "")];
    let mut source = TextGrid::new(0.0, 3.0);
    source.tiers.push(interval_tier("a", vec![]));
    source.tiers.push(interval_tier("b", vec![]));
    source.tiers.push(Tier::Point(PointTier::new("clicks", 0.1, 2.95, points.clone())));

    let remapped = remap_tiers(&source, &overrides(&[(0, "sentence"), (1, "words")]));

    match &remapped.tiers[2] {
        Tier::Point(tier) => {
            assert_eq!(tier.name, "clicks");
            assert_eq!(tier.entries, points);
            assert_eq!(tier.min_time, 0.1);
            assert_eq!(tier.max_time, 2.95);
        }
        Tier::Interval(_) => panic!("expected a point tier"),
    }
}

/// Test that bounds are copied rather than recomputed from entries
#[test]
fn test_remapTiers_withBoundsWiderThanEntries_shouldCopyBoundsVerbatim() {
    let mut source = TextGrid::new(0.0, 10.0);
    source.tiers.push(Tier::Interval(IntervalTier::new(
        "phones",
        0.0,
        10.0,
        vec![Interval::new(2.0, 3.0, "p")],
    )));

    let remapped = remap_tiers(&source, &TierNameMap::new());

    assert_eq!(remapped.tiers[0].min_time(), 0.0);
    assert_eq!(remapped.tiers[0].max_time(), 10.0);
}

/// Test that overrides outside the tier range have no effect
#[test]
fn test_remapTiers_withOutOfRangeKeys_shouldIgnoreThem() {
    let mut source = TextGrid::new(0.0, 3.0);
    source.tiers.push(interval_tier("only", vec![]));

    let remapped = remap_tiers(&source, &overrides(&[(-1, "neg"), (5, "far")]));

    assert_eq!(remapped.tier_names(), vec!["only"]);
}

/// Test that an override replaces a name even when it is blank in the source
#[test]
fn test_remapTiers_withOverrideOnBlankName_shouldUseOverride() {
    let mut source = TextGrid::new(0.0, 3.0);
    source.tiers.push(interval_tier("", vec![]));

    let remapped = remap_tiers(&source, &overrides(&[(0, "sentence")]));

    assert_eq!(remapped.tier_names(), vec!["sentence"]);
}

/// Test remapping a parsed file keeps tier count, order and kinds
#[test]
fn test_remapTiers_withParsedFile_shouldPreserveShape() {
    let source = TextGrid::parse(common::MIXED_TIERS_TEXTGRID, &ReadOptions::default()).unwrap();

    let remapped = remap_tiers(&source, &overrides(&[(0, "sentence"), (1, "words")]));

    assert_eq!(remapped.tiers.len(), source.tiers.len());
    assert_eq!(remapped.tier_names(), vec!["sentence", "words", "tier_3", "clicks"]);
    let kinds: Vec<&str> = remapped.tiers.iter().map(|t| t.class_name()).collect();
    assert_eq!(kinds, vec!["IntervalTier", "IntervalTier", "IntervalTier", "TextTier"]);
}

/// Test an empty document stays empty
#[test]
fn test_remapTiers_withNoTiers_shouldReturnNoTiers() {
    let remapped = remap_tiers(&TextGrid::new(0.0, 1.0), &overrides(&[(0, "sentence")]));

    assert!(remapped.tiers.is_empty());
    assert_eq!(remapped.xmax, 1.0);
}
