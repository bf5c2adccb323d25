use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

const PREFIX: &str = "opensslutils-";

/// A set of uniquely named files the tool writes its output into.
///
/// The files are created empty when allocated, so no other process can
/// claim the same name, and are removed when the guard is dropped on every
/// exit path. Contents are read back at most once, through
/// [`TempOutputs::read_all`].
#[derive(Debug)]
pub struct TempOutputs {
    paths: Vec<PathBuf>,
}

impl TempOutputs {
    /// Creates one empty file in `dir` per extension, in order.
    pub async fn allocate(dir: &Path, extensions: &[&str]) -> Result<Self> {
        let mut outputs = TempOutputs {
            paths: Vec::with_capacity(extensions.len()),
        };
        for ext in extensions {
            let path = dir.join(format!("{PREFIX}{}.{ext}", random_id()));
            // On error the guard drops and removes what was already created.
            create_private(&path).await?;
            debug!(path = %path.display(), "allocated temporary output");
            outputs.paths.push(path);
        }
        Ok(outputs)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Reads every file once, in allocation order, then removes them.
    pub async fn read_all(self) -> Result<Vec<String>> {
        let mut contents = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            contents.push(tokio::fs::read_to_string(path).await?);
        }
        Ok(contents)
    }
}

// Removal is synchronous, even inside async operations: the files are a few
// kilobytes at most and callers rely on them being gone once the guard is.
impl Drop for TempOutputs {
    fn drop(&mut self) {
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "removed temporary output"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to remove temporary output"
                ),
            }
        }
    }
}

/// 128 random bits, hex encoded.
fn random_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

async fn create_private(path: &Path) -> Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);
    options.open(path).await?;
    Ok(())
}
