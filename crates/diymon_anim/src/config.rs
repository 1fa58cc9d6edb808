//! Engine configuration.
//!
//! Values come from built-in defaults matching the device, optionally overridden
//! by a TOML file and then by `DIYMON_*` environment variables:
//!
//! ```toml
//! width = 170
//! height = 320
//! idle_interval_ms = 1500
//! action_interval_ms = 500
//! asset_root = "S:/diymon"
//! evolution = "1.1"
//!
//! [prefixes]
//! eat = "ANIM_EAT_"
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `DIYMON_PREFIXES__EAT=ANIM_FOOD_`.

use std::{path::Path, time::Duration};

use diymon_types::{
	action::{ActionKind, IDLE_PREFIX},
	frame::{BufferDescriptor, DEFAULT_EXTENSION, HEADER_SIZE},
	subject::{DEFAULT_ASSET_ROOT, EvolutionCode, Subject},
};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Frame-name prefix for each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPrefixes {
	/// Prefix of the eat animation
	pub eat: String,
	/// Prefix of the exercise animation
	pub exercise: String,
	/// Prefix of the attack animation
	pub attack: String,
}

impl ActionPrefixes {
	/// Prefix of `kind`.
	pub fn get(&self, kind: ActionKind) -> &str {
		match kind {
			ActionKind::Eat => &self.eat,
			ActionKind::Exercise => &self.exercise,
			ActionKind::Attack => &self.attack,
		}
	}
}

impl Default for ActionPrefixes {
	fn default() -> Self {
		Self {
			eat: ActionKind::Eat.default_prefix().to_string(),
			exercise: ActionKind::Exercise.default_prefix().to_string(),
			attack: ActionKind::Attack.default_prefix().to_string(),
		}
	}
}

/// Configuration of an [`AnimationEngine`](crate::AnimationEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Display width in pixels
	pub width: u16,
	/// Display height in pixels
	pub height: u16,
	/// Time each idle frame stays on screen
	pub idle_interval_ms: u64,
	/// Time each action frame stays on screen
	pub action_interval_ms: u64,
	/// Bytes skipped at the start of every frame file
	pub header_size: usize,
	/// Frame file extension, without the dot
	pub extension: String,
	/// Directory holding one sub-directory per subject
	pub asset_root: String,
	/// Evolution code of the subject shown at start-up
	pub evolution: EvolutionCode,
	/// Prefix of the idle animation
	pub idle_prefix: String,
	/// Prefixes of the action animations
	pub prefixes: ActionPrefixes,
	/// Upper bound for the shared buffer allocation, unlimited when absent
	pub max_buffer_bytes: Option<usize>,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			width: 170,
			height: 320,
			idle_interval_ms: 1500,
			action_interval_ms: 500,
			header_size: HEADER_SIZE,
			extension: DEFAULT_EXTENSION.to_string(),
			asset_root: DEFAULT_ASSET_ROOT.to_string(),
			evolution: EvolutionCode::default(),
			idle_prefix: IDLE_PREFIX.to_string(),
			prefixes: ActionPrefixes::default(),
			max_buffer_bytes: None,
		}
	}
}

impl EngineConfig {
	/// Loads the configuration from defaults, an optional TOML file and the environment.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read, a value has the wrong type,
	/// or the result fails [`EngineConfig::validate`].
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		Self::load_layered(path, None)
	}

	/// Same as [`EngineConfig::load`], reading variables from `env` instead of
	/// the process environment when given.
	fn load_layered(
		path: Option<&Path>,
		env: Option<::config::Map<String, String>>,
	) -> Result<Self, ConfigError> {
		let mut builder = ::config::Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(::config::File::from(path).required(true));
		}
		builder = builder.add_source(
			::config::Environment::with_prefix("DIYMON")
				.prefix_separator("_")
				.separator("__")
				.try_parsing(true)
				.source(env),
		);

		let cfg: Self = builder.build()?.try_deserialize()?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// Parses a TOML document on top of the defaults, ignoring the environment.
	pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
		let cfg: Self = ::config::Config::builder()
			.add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
			.build()?
			.try_deserialize()?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// Checks values that would make playback impossible.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.width == 0 || self.height == 0 {
			return Err(ConfigError::Invalid(format!(
				"display size must be non-zero, got {}x{}",
				self.width, self.height
			)));
		}
		if self.idle_interval_ms == 0 || self.action_interval_ms == 0 {
			return Err(ConfigError::Invalid("frame intervals must be at least 1 ms".to_string()));
		}
		if self.extension.is_empty() || self.extension.starts_with('.') {
			return Err(ConfigError::Invalid(format!(
				"extension must be non-empty and given without a dot, got \"{}\"",
				self.extension
			)));
		}
		if self.idle_prefix.is_empty() {
			return Err(ConfigError::Invalid("idle prefix must not be empty".to_string()));
		}
		for kind in ActionKind::ALL {
			let prefix = self.prefixes.get(kind);
			if prefix.is_empty() {
				return Err(ConfigError::Invalid(format!("prefix for {kind} must not be empty")));
			}
			if prefix == self.idle_prefix {
				return Err(ConfigError::Invalid(format!(
					"prefix for {kind} collides with the idle prefix \"{prefix}\""
				)));
			}
		}
		Ok(())
	}

	/// Layout of the shared buffer.
	pub fn descriptor(&self) -> BufferDescriptor {
		BufferDescriptor::new(self.width, self.height)
	}

	/// Idle cadence.
	pub fn idle_interval(&self) -> Duration {
		Duration::from_millis(self.idle_interval_ms)
	}

	/// Action cadence.
	pub fn action_interval(&self) -> Duration {
		Duration::from_millis(self.action_interval_ms)
	}

	/// Subject shown at start-up.
	pub fn subject(&self) -> Subject {
		Subject::new(self.asset_root.clone(), self.evolution.clone())
	}
}
