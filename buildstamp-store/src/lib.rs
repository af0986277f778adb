//! File-backed version state machine.
//!
//! `VersionStore` owns the single text file holding the current version.
//! Every mutation is a complete read-modify-persist transaction executed
//! synchronously; there is no locking, so concurrent processes racing on the
//! same file can lose increments (see the `bump_race_loses_an_increment`
//! test).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::{debug, warn};

use buildstamp_types::{Version, VersionPart};

/// Single source of truth for the current version, backed by one text file.
///
/// The raw on-disk text is retained verbatim after [`VersionStore::load`];
/// parsing only happens when an operation needs the structured form, and a
/// raw value that fails to parse self-heals to [`Version::INITIAL`] at that
/// point.
#[derive(Debug)]
pub struct VersionStore {
    path: Utf8PathBuf,
    raw: String,
}

impl VersionStore {
    /// Open the store at `path`, initializing the file to `1.0.0` if it does
    /// not exist. The contents are trimmed but not parsed.
    pub fn load(path: impl Into<Utf8PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        if !path.exists() {
            let store = Self {
                path,
                raw: Version::INITIAL.to_string(),
            };
            store.persist()?;
            debug!("initialized {} to {}", store.path, store.raw);
            return Ok(store);
        }

        let contents =
            fs::read_to_string(&path).with_context(|| format!("read version file {}", path))?;
        Ok(Self {
            path,
            raw: contents.trim().to_string(),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The current textual value, exactly as it will be persisted.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parse the current value leniently (trim, lowercase, one leading `v`).
    ///
    /// A value that does not normalize to `X.Y.Z` is not an error: the store
    /// resets to `1.0.0`, persists the reset immediately, and returns it.
    /// Corrupt version state must never abort a build.
    pub fn parse(&mut self) -> anyhow::Result<Version> {
        match Version::parse_lenient(&self.raw) {
            Ok(v) => Ok(v),
            Err(_) => {
                warn!(
                    "invalid version format: '{}', resetting to {}",
                    self.raw,
                    Version::INITIAL
                );
                self.raw = Version::INITIAL.to_string();
                self.persist()?;
                Ok(Version::INITIAL)
            }
        }
    }

    /// Increment `part`, zeroing all lower-order components, and persist the
    /// canonical rendering.
    pub fn bump(&mut self, part: VersionPart) -> anyhow::Result<Version> {
        let next = self.parse()?.bumped(part);
        self.raw = next.to_string();
        self.persist()?;
        Ok(next)
    }

    /// Set an explicit version. The literal is validated strictly: no
    /// whitespace, no leading `v`. On rejection nothing is written and the
    /// prior value stays in place.
    pub fn set(&mut self, literal: &str) -> anyhow::Result<Version> {
        let version = Version::parse_strict(literal)?;
        self.raw = literal.to_string();
        self.persist()?;
        Ok(version)
    }

    /// Overwrite the backing file with the current raw value.
    ///
    /// Writes to a sibling `.tmp` file and renames it over the target, so a
    /// crash mid-write leaves either the old or the new contents, never a
    /// partial mix.
    pub fn persist(&self) -> anyhow::Result<()> {
        let tmp = Utf8PathBuf::from(format!("{}.tmp", self.path));
        fs::write(&tmp, &self.raw).with_context(|| format!("write {}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("rename {} over {}", tmp, self.path))?;
        Ok(())
    }
}
