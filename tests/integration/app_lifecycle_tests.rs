/*!
 * Integration tests for controller setup and single-file processing
 */

use anyhow::Result;

use tgrename::app_config::Config;
use tgrename::app_controller::Controller;
use tgrename::textgrid::{OutputFormat, ReadOptions, TextGrid};
use crate::common;

/// Test that the controller refuses an invalid configuration
#[test]
fn test_controller_withMissingBaseDir_shouldFailToStart() {
    let config = Config {
        base_directory: "definitely/missing/base".into(),
        output_directory: "definitely/missing/out".into(),
        ..Config::default()
    };

    assert!(Controller::with_config(config).is_err());
}

/// Test processing a single file into a mirrored short-layout output
#[test]
fn test_process_file_withShortOutput_shouldWriteMirroredFile() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    let source = common::create_test_textgrid(input.path(), "spk9/deep/x.TextGrid")?;

    let mut config = Config {
        base_directory: input.path().to_path_buf(),
        output_directory: output.path().join("renamed"),
        ..Config::default()
    };
    config.textgrid.output_format = OutputFormat::Short;
    let controller = Controller::with_config(config)?;

    let written = controller.process_file(&source)?;

    assert_eq!(written, output.path().join("renamed/spk9/deep/x.TextGrid"));
    let content = std::fs::read_to_string(&written)?;
    assert!(!content.contains("item ["));
    let renamed = TextGrid::parse(&content, &ReadOptions::default())?;
    assert_eq!(renamed.tier_names(), vec!["sentence", "words", "syllables", "phonemes"]);

    Ok(())
}

/// Test that output nested inside the base directory is not picked up again
#[test]
fn test_run_withOutputInsideBase_shouldNotReprocessOutput() -> Result<()> {
    let input = common::create_temp_dir()?;
    common::create_test_textgrid(input.path(), "spk1/a.TextGrid")?;
    let config = Config {
        base_directory: input.path().to_path_buf(),
        output_directory: input.path().join("renamed"),
        ..Config::default()
    };

    let first = Controller::with_config(config.clone())?.run()?;
    let second = Controller::with_config(config)?.run()?;

    assert_eq!(first.processed, 1);
    assert_eq!(second.processed, 1);
    assert!(!input.path().join("renamed/renamed").exists());

    Ok(())
}

/// Test that a base directory spelled with `..` still excludes the nested output
#[test]
fn test_run_withDotDotBaseAndNestedOutput_shouldNotReprocessOutput() -> Result<()> {
    let input = common::create_temp_dir()?;
    common::create_test_textgrid(input.path(), "spk1/a.TextGrid")?;
    let config = Config {
        base_directory: input.path().join("spk1").join(".."),
        output_directory: input.path().join("renamed"),
        ..Config::default()
    };

    let first = Controller::with_config(config.clone())?.run()?;
    let second = Controller::with_config(config)?.run()?;

    assert_eq!(first.processed, 1);
    assert_eq!(second.processed, 1);
    assert!(input.path().join("renamed/spk1/a.TextGrid").is_file());
    assert!(!input.path().join("renamed/renamed").exists());

    Ok(())
}
