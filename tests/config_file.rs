//! Loading tuning files from disk.

use std::fs;
use std::path::PathBuf;

use rstest::rstest;
use thicket::{ConfigError, ThicketConfig};

/// A file in the system temp directory removed on drop.
struct ScratchFile(PathBuf);

impl ScratchFile {
    fn new(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("thicket-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
        Self(path)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

#[test]
fn loads_a_partial_file_over_defaults() {
    let file = ScratchFile::new(
        "partial.toml",
        r#"
[motion]
max_speed = 3.5
gravity = -9.81

[scene]
seed = 42
tree_count = 10

[host]
cull_interval = 5
"#,
    );
    let config = ThicketConfig::load(&file.0).unwrap_or_else(|e| panic!("load failed: {e}"));
    let defaults = ThicketConfig::default();

    assert_eq!(config.motion.max_speed, 3.5);
    assert_eq!(config.motion.gravity, -9.81);
    assert_eq!(config.motion.jump_speed, defaults.motion.jump_speed);
    assert_eq!(config.scene.seed, 42);
    assert_eq!(config.scene.tree_count, 10);
    assert_eq!(config.scene.tree_radius, defaults.scene.tree_radius);
    assert_eq!(config.host.cull_interval, 5);
    assert_eq!(config.host.max_frame_step, defaults.host.max_frame_step);
}

#[test]
fn empty_file_is_the_default_configuration() {
    let file = ScratchFile::new("empty.toml", "");
    let config = ThicketConfig::load(&file.0).unwrap_or_else(|e| panic!("load failed: {e}"));
    assert_eq!(config, ThicketConfig::default());
}

#[rstest]
#[case::typo("typo.toml", "[motion]\nmax_sped = 3.0\n")]
#[case::wrong_type("type.toml", "[scene]\ntree_count = \"many\"\n")]
#[case::broken("broken.toml", "[motion\n")]
fn malformed_files_fail_to_parse(#[case] name: &str, #[case] contents: &str) {
    let file = ScratchFile::new(name, contents);
    assert!(matches!(ThicketConfig::load(&file.0), Err(ConfigError::Parse(_))));
}

#[test]
fn out_of_range_values_name_the_field() {
    let file = ScratchFile::new("invalid.toml", "[host]\nmax_frame_step = -1.0\n");
    match ThicketConfig::load(&file.0) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "host.max_frame_step"),
        other => panic!("expected an invalid-field error, got {other:?}"),
    }
}

#[test]
fn missing_file_reports_its_path() {
    let path = std::env::temp_dir().join("thicket-definitely-missing.toml");
    match ThicketConfig::load(&path) {
        Err(err @ ConfigError::Read { .. }) => {
            assert!(err.to_string().contains("thicket-definitely-missing.toml"));
        }
        other => panic!("expected a read error, got {other:?}"),
    }
}
