//! Staging files for downloads and mux output.
//!
//! Bytes go to a hidden, uniquely named file next to the destination and are
//! only moved to the final name once complete. The move never replaces an
//! existing file, so two writers racing for the same name cannot clobber
//! each other and a half-written file is never visible under its final name.

use crate::error::Result;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Outcome of [`StagedFile::promote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// The staged bytes now live at the final path.
    Written,
    /// Something else created the final path first; the staged bytes were discarded.
    AlreadyPresent,
}

/// A temp file in the destination directory. Dropping it without calling
/// [`promote`](Self::promote) removes it.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
    written: u64,
}

impl StagedFile {
    /// Creates `.<final_name>.<random>.part` inside `dir`.
    pub fn create_in(dir: &Path, final_name: &str) -> Result<Self> {
        let prefix = format!(".{}.", final_name);
        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".part")
            .tempfile_in(dir)?;
        Ok(Self { file, written: 0 })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Bytes appended through [`write_chunk`](Self::write_chunk).
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.as_file_mut().write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Syncs and moves the file to `final_path` without replacing an existing file.
    pub fn promote(self, final_path: &Path) -> Result<Promotion> {
        self.file.as_file().sync_all()?;
        match self.file.persist_noclobber(final_path) {
            Ok(_) => Ok(Promotion::Written),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(
                    path = %final_path.display(),
                    "final path appeared while staging; discarding staged copy"
                );
                Ok(Promotion::AlreadyPresent)
            }
            Err(e) => Err(e.error.into()),
        }
    }
}
