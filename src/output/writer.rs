//! Filesystem artifact writer

use crate::output::traits::{ArtifactWriter, OutputError, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes artifacts into one output directory
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    dir: PathBuf,
}

impl DirectoryWriter {
    /// Creates a writer for `dir`, creating the directory if missing
    pub fn create(dir: impl Into<PathBuf>) -> OutputResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactWriter for DirectoryWriter {
    fn write_artifact(&self, filename: &str, contents: &str) -> OutputResult<()> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename == ".." {
            return Err(OutputError::Format(format!(
                "Refusing to write outside the output directory: {:?}",
                filename
            )));
        }

        let path = self.dir.join(filename);
        fs::write(&path, contents)?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}
