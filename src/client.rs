//! Client profiles: isolated working directories for the program under test.

use crate::error::{HarnessError, HarnessResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the store the program creates inside a profile directory.
pub const DATABASE_FILE: &str = "database.sqlite";

/// A logical client of the program under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    id: u32,
    base_dir: PathBuf,
    profile_dir: PathBuf,
}

impl ClientProfile {
    /// Creates the profile for client `id` under `base_dir`.
    ///
    /// The profile directory is `<base_dir>/client<id>`, made absolute against
    /// the current directory so the program resolves it the same way whatever
    /// directory it runs in. Nothing is created on disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if `base_dir` is empty or the current directory is unreadable.
    pub fn new(base_dir: &Path, id: u32) -> HarnessResult<Self> {
        let base_dir = std::path::absolute(base_dir).map_err(|source| HarnessError::Io {
            path: base_dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            id,
            profile_dir: base_dir.join(format!("client{id}")),
            base_dir,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Absolute directory holding every client's profile.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    /// Path of the store file inside the profile directory.
    pub fn database_path(&self) -> PathBuf {
        self.profile_dir.join(DATABASE_FILE)
    }
}

/// Removes `base_dir` and everything under it, so the run starts from nothing.
///
/// A missing directory is not an error.
pub fn reset_base_dir(base_dir: &Path) -> HarnessResult<()> {
    match fs::remove_dir_all(base_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(HarnessError::Io {
            path: base_dir.to_path_buf(),
            source,
        }),
    }
}
