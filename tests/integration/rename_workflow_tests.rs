/*!
 * Integration tests for the directory renaming workflow
 */

use std::fs;
use anyhow::Result;

use tgrename::app_config::Config;
use tgrename::app_controller::Controller;
use tgrename::textgrid::{ReadOptions, TextGrid, Tier};
use tgrename::tier_remapper::TierNameMap;
use crate::common;

fn sentence_words_map() -> TierNameMap {
    [(0, "sentence"), (1, "words")]
        .into_iter()
        .map(|(i, name)| (i, name.to_string()))
        .collect()
}

/// Test that a speaker tree is mirrored and non-TextGrid files are left out
#[test]
fn test_run_withSpeakerTree_shouldMirrorTextGridsOnly() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    common::create_test_textgrid(input.path(), "spk1/a.TextGrid")?;
    common::create_test_textgrid(input.path(), "spk1/sub/b.TextGrid")?;
    common::create_test_file(input.path(), "spk1/a.wav", "RIFF")?;
    common::create_test_file(input.path(), "spk2/readme.txt", "notes")?;

    let controller = Controller::with_config(Config {
        base_directory: input.path().to_path_buf(),
        output_directory: output.path().to_path_buf(),
        tier_index_mapping: sentence_words_map(),
        ..Config::default()
    })?;
    let summary = controller.run()?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.output_directory, output.path());
    assert!(output.path().join("spk1/a.TextGrid").is_file());
    assert!(output.path().join("spk1/sub/b.TextGrid").is_file());
    assert!(!output.path().join("spk1/a.wav").exists());
    assert!(!output.path().join("spk2").exists());

    Ok(())
}

/// Test the renamed file content end to end
#[test]
fn test_run_withMixedTiers_shouldRenameAndKeepEntries() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    let source_path = common::create_test_textgrid(input.path(), "spk1/a.TextGrid")?;

    let controller = Controller::with_config(Config {
        base_directory: input.path().to_path_buf(),
        output_directory: output.path().to_path_buf(),
        tier_index_mapping: sentence_words_map(),
        ..Config::default()
    })?;
    controller.run()?;

    let source = TextGrid::open(&source_path, &ReadOptions::default())?;
    let renamed = TextGrid::open(output.path().join("spk1/a.TextGrid"), &ReadOptions::default())?;

    assert_eq!(renamed.tier_names(), vec!["sentence", "words", "tier_3", "clicks"]);
    for (before, after) in source.tiers.iter().zip(&renamed.tiers) {
        assert_eq!(before.class_name(), after.class_name());
        assert_eq!(before.min_time(), after.min_time());
        assert_eq!(before.max_time(), after.max_time());
        match (before, after) {
            (Tier::Interval(b), Tier::Interval(a)) => assert_eq!(a.entries, b.entries),
            (Tier::Point(b), Tier::Point(a)) => assert_eq!(a.entries, b.entries),
            _ => panic!("tier kind changed"),
        }
    }

    // The input file is never rewritten
    assert_eq!(fs::read_to_string(&source_path)?, common::MIXED_TIERS_TEXTGRID);

    // Long layout with blank intervals filled in
    let written = fs::read_to_string(output.path().join("spk1/a.TextGrid"))?;
    assert!(written.contains("name = \"sentence\" "));
    assert!(written.contains("class = \"TextTier\" "));
    assert!(written.contains("intervals: size = 3 "));

    Ok(())
}

/// Test a short-layout input with a point tier outside the mapping
#[test]
fn test_run_withShortLayoutInput_shouldKeepUnmappedPointTierName() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    common::create_test_file(input.path(), "spk3/short.TextGrid", common::SHORT_TEXTGRID)?;

    let controller = Controller::with_config(Config {
        base_directory: input.path().to_path_buf(),
        output_directory: output.path().to_path_buf(),
        tier_index_mapping: sentence_words_map(),
        ..Config::default()
    })?;
    controller.run()?;

    let renamed = TextGrid::open(output.path().join("spk3/short.TextGrid"), &ReadOptions::default())?;
    assert_eq!(renamed.tier_names(), vec!["sentence", "words", "clicks"]);
    match &renamed.tiers[2] {
        Tier::Point(tier) => {
            assert_eq!(tier.entries.len(), 1);
            assert_eq!(tier.entries[0].time, 2.25);
            assert_eq!(tier.entries[0].label, "tick");
        }
        Tier::Interval(_) => panic!("expected a point tier"),
    }

    Ok(())
}

/// Test that a malformed file aborts the whole run
#[test]
fn test_run_withMalformedFile_shouldFailFast() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    common::create_test_file(input.path(), "spk1/bad.TextGrid", "this is not a TextGrid")?;

    let controller = Controller::with_config(Config {
        base_directory: input.path().to_path_buf(),
        output_directory: output.path().to_path_buf(),
        ..Config::default()
    })?;
    let error = controller.run().unwrap_err();

    assert!(format!("{:#}", error).contains("Failed to read TextGrid"));
    assert!(!output.path().join("spk1/bad.TextGrid").exists());

    Ok(())
}

/// Test that running twice overwrites earlier output
#[test]
fn test_run_twice_shouldOverwriteOutput() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    common::create_test_textgrid(input.path(), "spk1/a.TextGrid")?;
    let config = Config {
        base_directory: input.path().to_path_buf(),
        output_directory: output.path().to_path_buf(),
        ..Config::default()
    };

    Controller::with_config(config.clone())?.run()?;
    let mut remapped = config;
    remapped.tier_index_mapping = [(3, "events".to_string())].into_iter().collect();
    Controller::with_config(remapped)?.run()?;

    let renamed = TextGrid::open(output.path().join("spk1/a.TextGrid"), &ReadOptions::default())?;
    assert_eq!(renamed.tier_names(), vec!["tier_1", "old_words", "tier_3", "events"]);

    Ok(())
}
