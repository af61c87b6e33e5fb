use std::collections::BTreeMap;

use log::debug;

use crate::textgrid::{IntervalTier, PointTier, TextGrid, Tier};

// @module: Position-based tier renaming

/// Zero-based tier position to replacement name. Negative keys never match.
pub type TierNameMap = BTreeMap<i64, String>;

/// Name for the tier at `position`.
///
/// An override always wins. Without one, a name that has any non-whitespace
/// character is kept; anything else becomes `tier_<position + 1>`.
pub fn resolve_tier_name(position: usize, source_name: &str, overrides: &TierNameMap) -> String {
    let key = i64::try_from(position).ok();
    if let Some(name) = key.and_then(|k| overrides.get(&k)) {
        return name.clone();
    }

    if source_name.trim().is_empty() {
        format!("tier_{}", position + 1)
    } else {
        source_name.to_string()
    }
}

/// Build a new TextGrid with every tier renamed by position.
///
/// Tier order, kind, bounds and entries are copied unchanged; only names
/// differ. The document domain is the span of the copied tiers, or the
/// source's domain when there are none. The source is not modified.
pub fn remap_tiers(source: &TextGrid, overrides: &TierNameMap) -> TextGrid {
    let mut remapped = TextGrid::new(source.xmin, source.xmax);

    for (i, tier) in source.tiers.iter().enumerate() {
        let new_name = resolve_tier_name(i, tier.name(), overrides);
        debug!("Tier {}: '{}' -> '{}'", i, tier.name(), new_name);

        let new_tier = match tier {
            Tier::Interval(t) => Tier::Interval(IntervalTier::new(
                new_name,
                t.min_time,
                t.max_time,
                t.entries.clone(),
            )),
            Tier::Point(t) => Tier::Point(PointTier::new(
                new_name,
                t.min_time,
                t.max_time,
                t.entries.clone(),
            )),
        };
        remapped.add_tier(new_tier);
    }

    remapped
}
