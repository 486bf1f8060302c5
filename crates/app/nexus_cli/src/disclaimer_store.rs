//! Marker-file persistence for the one-time disclaimer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use nexus_core::disclaimer::DisclaimerStore;

const MARKER_FILE: &str = "disclaimer_seen";

/// Stores the "seen" flag as an empty file in the client state directory.
#[derive(Debug, Clone)]
pub struct FileDisclaimerStore {
    marker: PathBuf,
}

impl FileDisclaimerStore {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            marker: state_dir.as_ref().join(MARKER_FILE),
        }
    }

    /// `<data dir>/nexus`, falling back to the working directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("nexus"))
            .unwrap_or_else(|| PathBuf::from(".nexus"))
    }
}

impl DisclaimerStore for FileDisclaimerStore {
    fn seen(&self) -> bool {
        self.marker.exists()
    }

    fn mark_seen(&mut self) -> io::Result<()> {
        if let Some(parent) = self.marker.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.marker, b"")
    }
}
