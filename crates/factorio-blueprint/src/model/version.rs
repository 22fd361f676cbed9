//! The packed game version stored in `version` fields.
//!
//! Four 16-bit components packed big-end first into a 64-bit integer:
//!
//! ```text
//! major << 48 | minor << 32 | patch << 16 | build
//! ```
//!
//! Values above 2^53 are common (any major version ≥ 32 is one), so the
//! number must stay a `u64` end to end.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseVersionError;

/// A game version such as `2.0.15.4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GameVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u16,
}

impl GameVersion {
    /// Creates a version from its components.
    pub const fn new(major: u16, minor: u16, patch: u16, build: u16) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Unpacks a `version` field.
    pub const fn from_packed(packed: u64) -> Self {
        Self {
            major: (packed >> 48) as u16,
            minor: (packed >> 32) as u16,
            patch: (packed >> 16) as u16,
            build: packed as u16,
        }
    }

    /// Packs into a `version` field.
    pub const fn to_packed(self) -> u64 {
        (self.major as u64) << 48
            | (self.minor as u64) << 32
            | (self.patch as u64) << 16
            | self.build as u64
    }
}

impl From<u64> for GameVersion {
    fn from(packed: u64) -> Self {
        Self::from_packed(packed)
    }
}

impl From<GameVersion> for u64 {
    fn from(version: GameVersion) -> Self {
        version.to_packed()
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
    }
}

/// Parses `major.minor.patch` or `major.minor.patch.build`.
impl FromStr for GameVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError {
            input: s.to_string(),
        };

        let mut parts = [0u16; 4];
        let mut count = 0;
        for part in s.split('.') {
            if count == parts.len() {
                return Err(invalid());
            }
            parts[count] = part.parse().map_err(|_| invalid())?;
            count += 1;
        }
        if count < 3 {
            return Err(invalid());
        }

        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }
}
