//! Export archive handling.
//!
//! [`Archive::open`] accepts either the zip file Discord hands out or a
//! directory where someone already extracted it. Zip input is unpacked into
//! a [`tempfile::TempDir`] owned by the returned value, so the extracted
//! tree is removed on every exit path — normal return, early `?`, or panic
//! unwind — and never outlives the run.
//!
//! Either way, the result must contain a `messages/` entry; an export
//! without one is structurally broken and the run aborts.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::{ChatgraphError, Result};

/// An opened export, extracted if necessary.
#[derive(Debug)]
pub struct Archive {
    root: PathBuf,
    // Keeps the extraction directory alive exactly as long as the archive
    // handle; dropping it removes the tree.
    _extracted: Option<TempDir>,
}

impl Archive {
    /// Opens a `.zip` export or an already-extracted directory.
    ///
    /// # Errors
    ///
    /// - [`ChatgraphError::Config`] when `path` doesn't exist
    /// - [`ChatgraphError::Archive`] when the zip can't be read
    /// - [`ChatgraphError::Structure`] when no `messages/` entry is found
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChatgraphError::config(format!(
                "export path does not exist: {}",
                path.display()
            )));
        }

        let (root, extracted) = if path.is_dir() {
            (path.to_path_buf(), None)
        } else {
            let file = File::open(path)?;
            let mut zip = ZipArchive::new(file)?;
            let temp = tempfile::tempdir()?;
            zip.extract(temp.path())?;
            (temp.path().to_path_buf(), Some(temp))
        };

        let root = locate_export_root(&root)?;
        Ok(Self {
            root,
            _extracted: extracted,
        })
    }

    /// The export's `messages/` directory.
    pub fn messages_root(&self) -> PathBuf {
        self.root.join("messages")
    }
}

/// Finds the directory that directly contains `messages/`.
///
/// Zips sometimes wrap the export in a single top-level directory (e.g.
/// `package/messages/...`); one level of that wrapping is tolerated.
fn locate_export_root(root: &Path) -> Result<PathBuf> {
    if root.join("messages").is_dir() {
        return Ok(root.to_path_buf());
    }

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && entry.path().join("messages").is_dir() {
            return Ok(entry.path());
        }
    }

    Err(ChatgraphError::structure_at(
        "export contains no messages/ entry",
        root,
    ))
}
