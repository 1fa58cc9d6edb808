//! Subjects: which character is shown, and where its frames live.
//!
//! A character is identified by its evolution code, a dotted list of branch
//! digits such as `1.1.1`. Its assets live in a directory named after the code
//! with the dots removed:
//!
//! ```text
//! S:/diymon/0/ANIM_IDLE_1.bin
//! S:/diymon/11/ANIM_EAT_1.bin
//! S:/diymon/111/ANIM_IDLE_1.bin
//! ```

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EvolutionCodeError;

/// Default root under which subject directories live
pub const DEFAULT_ASSET_ROOT: &str = "S:/diymon";

/// Longest directory name the storage layer accepts for a subject
pub const MAX_DIR_NAME_LEN: usize = 8;

/// Linear evolution sequence walked by the evolve/devolve actions
const SEQUENCE: [&str; 4] = ["0", "1", "1.1", "1.1.1"];

/// Evolution code of a character.
///
/// # Examples
///
/// ```
/// use diymon_types::subject::EvolutionCode;
///
/// let code: EvolutionCode = "1.1".parse().unwrap();
/// assert_eq!(code.dir_name(), "11");
/// assert_eq!(code.next().unwrap().as_str(), "1.1.1");
/// assert_eq!(code.previous().unwrap().as_str(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EvolutionCode(String);

impl EvolutionCode {
	/// Parses and validates an evolution code.
	pub fn new(code: &str) -> Result<Self, EvolutionCodeError> {
		if code.is_empty() {
			return Err(EvolutionCodeError::Empty);
		}

		if let Some(ch) = code.chars().find(|c| !c.is_ascii_digit() && *c != '.') {
			return Err(EvolutionCodeError::InvalidCharacter {
				code: code.to_string(),
				ch,
			});
		}

		let digits = code.chars().filter(char::is_ascii_digit).count();
		if digits == 0 {
			return Err(EvolutionCodeError::Empty);
		}
		if digits > MAX_DIR_NAME_LEN {
			return Err(EvolutionCodeError::TooLong {
				code: code.to_string(),
				digits,
				max: MAX_DIR_NAME_LEN,
			});
		}

		Ok(Self(code.to_string()))
	}

	/// The code as written, dots included.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Directory name holding this subject's assets (`1.1.1` -> `111`).
	pub fn dir_name(&self) -> String {
		self.0.chars().filter(|c| *c != '.').collect()
	}

	/// Next form in the evolution sequence, `None` for the final form or codes outside the sequence.
	pub fn next(&self) -> Option<Self> {
		let pos = SEQUENCE.iter().position(|c| *c == self.0)?;
		SEQUENCE.get(pos + 1).map(|c| Self((*c).to_string()))
	}

	/// Previous form in the evolution sequence, `None` for the base form or codes outside the sequence.
	pub fn previous(&self) -> Option<Self> {
		let pos = SEQUENCE.iter().position(|c| *c == self.0)?;
		pos.checked_sub(1).map(|p| Self(SEQUENCE[p].to_string()))
	}
}

impl Default for EvolutionCode {
	fn default() -> Self {
		Self(SEQUENCE[0].to_string())
	}
}

impl Display for EvolutionCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for EvolutionCode {
	type Err = EvolutionCodeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl TryFrom<String> for EvolutionCode {
	type Error = EvolutionCodeError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(&value)
	}
}

impl From<EvolutionCode> for String {
	fn from(value: EvolutionCode) -> Self {
		value.0
	}
}

/// The character currently on screen, and where to find its frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
	asset_root: String,
	code: EvolutionCode,
}

impl Subject {
	/// Creates a subject rooted at `asset_root`.
	pub fn new(asset_root: impl Into<String>, code: EvolutionCode) -> Self {
		let mut asset_root = asset_root.into();
		while asset_root.len() > 1 && asset_root.ends_with('/') {
			asset_root.pop();
		}
		Self {
			asset_root,
			code,
		}
	}

	/// Root under which every subject directory lives.
	pub fn asset_root(&self) -> &str {
		&self.asset_root
	}

	/// Evolution code of the subject.
	pub fn code(&self) -> &EvolutionCode {
		&self.code
	}

	/// Replaces the evolution code, keeping the asset root.
	pub fn set_code(&mut self, code: EvolutionCode) {
		self.code = code;
	}

	/// Directory holding the subject's frames, without a trailing slash.
	pub fn directory(&self) -> String {
		format!("{}/{}", self.asset_root, self.code.dir_name())
	}
}

impl Default for Subject {
	fn default() -> Self {
		Self::new(DEFAULT_ASSET_ROOT, EvolutionCode::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_dir_name_strips_dots() {
		assert_eq!(EvolutionCode::new("1.1.1").unwrap().dir_name(), "111");
		assert_eq!(EvolutionCode::new("0").unwrap().dir_name(), "0");
	}

	#[test]
	fn test_rejects_invalid_codes() {
		assert_eq!(EvolutionCode::new(""), Err(EvolutionCodeError::Empty));
		assert_eq!(EvolutionCode::new("..."), Err(EvolutionCodeError::Empty));
		assert!(matches!(
			EvolutionCode::new("1.a"),
			Err(EvolutionCodeError::InvalidCharacter {
				ch: 'a',
				..
			})
		));
		assert!(matches!(
			EvolutionCode::new("1.2.3.4.5.6.7.8.9"),
			Err(EvolutionCodeError::TooLong {
				digits: 9,
				..
			})
		));
	}

	#[test]
	fn test_sequence_walk() {
		let mut code = EvolutionCode::default();
		let mut seen = vec![code.to_string()];
		while let Some(next) = code.next() {
			seen.push(next.to_string());
			code = next;
		}
		assert_eq!(seen, ["0", "1", "1.1", "1.1.1"]);
		assert_eq!(code.previous().unwrap().as_str(), "1.1");
		assert!(EvolutionCode::default().previous().is_none());
		assert!(EvolutionCode::new("2.3").unwrap().next().is_none());
	}

	#[test]
	fn test_subject_directory() {
		let subject = Subject::new("S:/diymon/", EvolutionCode::new("1.1").unwrap());
		assert_eq!(subject.directory(), "S:/diymon/11");
		assert_eq!(Subject::default().directory(), "S:/diymon/0");
	}
}
