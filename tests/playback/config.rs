use std::fs;

use diymon_rs::prelude::*;

#[test_log::test]
fn test_load_from_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("diymon.toml");
	fs::write(
		&path,
		r#"
		width = 240
		height = 240
		idle_interval_ms = 1000
		evolution = "1.1.1"

		[prefixes]
		exercise = "ANIM_RUN_"
		"#,
	)
	.unwrap();

	let config = EngineConfig::load(Some(path.as_path())).unwrap();
	assert_eq!(config.descriptor().size(), 240 * 240 * 3);
	assert_eq!(config.subject().directory(), "S:/diymon/111");
	assert_eq!(config.prefixes.get(ActionKind::Exercise), "ANIM_RUN_");
	assert_eq!(config.action_interval_ms, 500);
}

#[test_log::test]
fn test_missing_or_invalid_file() {
	let dir = tempfile::tempdir().unwrap();
	assert!(EngineConfig::load(Some(dir.path().join("absent.toml").as_path())).is_err());

	let path = dir.path().join("bad.toml");
	fs::write(&path, "action_interval_ms = 0\n").unwrap();
	let err = EngineConfig::load(Some(path.as_path())).unwrap_err();
	assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
}
