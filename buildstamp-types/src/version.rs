use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for version parsing and mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The literal did not match `MAJOR.MINOR.PATCH`.
    #[error("invalid version format: '{literal}' (expected X.Y.Z)")]
    InvalidFormat {
        /// The rejected input, verbatim.
        literal: String,
    },
}

/// Which component of a version to bump.
///
/// Bumping a component zeroes everything below it: major resets minor and
/// patch, minor resets patch, patch resets nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

/// A three-component version, canonically rendered as `MAJOR.MINOR.PATCH`.
///
/// No pre-release or build-metadata suffixes. Serialized as the canonical
/// string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The recovery value written when persisted state is corrupt or absent.
    pub const INITIAL: Version = Version::new(1, 0, 0);

    /// Strict parse: exactly `^\d+\.\d+\.\d+$`, no normalization.
    pub fn parse_strict(literal: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidFormat {
            literal: literal.to_string(),
        };

        let mut parts = literal.split('.');
        let mut next = || -> Result<u64, VersionError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u64>().map_err(|_| invalid())
        };

        let major = next()?;
        let minor = next()?;
        let patch = next()?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(major, minor, patch))
    }

    /// Lenient parse: trims whitespace, lowercases, strips one leading `v`,
    /// then applies the strict pattern.
    ///
    /// The asymmetry with [`Version::parse_strict`] is intentional: values
    /// read back from disk get the tolerant path, values supplied explicitly
    /// by an operator do not.
    pub fn parse_lenient(raw: &str) -> Result<Self, VersionError> {
        let clean = raw.trim().to_lowercase();
        let clean = clean.strip_prefix('v').unwrap_or(&clean);
        Self::parse_strict(clean).map_err(|_| VersionError::InvalidFormat {
            literal: raw.to_string(),
        })
    }

    /// Returns the version with `part` incremented and all lower-order
    /// components reset to zero.
    pub fn bumped(self, part: VersionPart) -> Version {
        match part {
            VersionPart::Major => Version::new(self.major + 1, 0, 0),
            VersionPart::Minor => Version::new(self.major, self.minor + 1, 0),
            VersionPart::Patch => Version::new(self.major, self.minor, self.patch + 1),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse_strict(s)
    }
}

impl Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Version::parse_strict(&s).map_err(serde::de::Error::custom)
    }
}
