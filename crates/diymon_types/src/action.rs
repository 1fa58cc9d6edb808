//! One-shot actions the user can trigger from the player panel.

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Prefix of the looping idle animation
pub const IDLE_PREFIX: &str = "ANIM_IDLE_";

/// Action animations that temporarily preempt the idle loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
	/// Feed the character
	Eat,
	/// Gym session
	Exercise,
	/// Attack move
	Attack,
}

impl ActionKind {
	/// Every action, in panel order
	pub const ALL: [ActionKind; 3] = [Self::Eat, Self::Exercise, Self::Attack];

	/// File-name prefix of this action's frames when no override is configured.
	pub fn default_prefix(self) -> &'static str {
		match self {
			Self::Eat => "ANIM_EAT_",
			Self::Exercise => "ANIM_GYM_",
			Self::Attack => "ANIM_ATK_",
		}
	}
}

impl Display for ActionKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Eat => write!(f, "eat"),
			Self::Exercise => write!(f, "exercise"),
			Self::Attack => write!(f, "attack"),
		}
	}
}

impl FromStr for ActionKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"eat" => Ok(Self::Eat),
			"exercise" | "gym" => Ok(Self::Exercise),
			"attack" => Ok(Self::Attack),
			other => Err(format!("unknown action '{other}' (expected eat, exercise or attack)")),
		}
	}
}
