//! Checkpoint participation.
//!
//! The crawl engine's checkpoint system owns checkpoint naming, directory
//! layout and restore orchestration. Components that hold state implement
//! [`Checkpointable`] and write into the directory they are handed.

use crate::base::cookieerror::CookieError;
use std::path::{Path, PathBuf};

/// A named checkpoint and the directory its participants write into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    name: String,
    dir: PathBuf,
}

impl Checkpoint {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `file_name` inside this checkpoint's directory.
    pub fn scoped_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// Hooks driven by the checkpoint system, in order:
/// `start_checkpoint`, `do_checkpoint`, `finish_checkpoint`.
///
/// `set_recovery_checkpoint` is called before start when resuming a crawl.
pub trait Checkpointable {
    fn start_checkpoint(&self, _checkpoint: &Checkpoint) -> Result<(), CookieError> {
        Ok(())
    }

    /// Write this component's state into the checkpoint directory.
    fn do_checkpoint(&self, checkpoint: &Checkpoint) -> Result<(), CookieError>;

    fn finish_checkpoint(&self, _checkpoint: &Checkpoint) -> Result<(), CookieError> {
        Ok(())
    }

    /// Restore from `checkpoint` on the next start.
    fn set_recovery_checkpoint(&self, checkpoint: &Checkpoint);
}
