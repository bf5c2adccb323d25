use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::OpensslConfig;
use crate::error::{OpensslError, Result};

/// Root under which WSL mounts Windows drives.
pub const WSL_MOUNT_ROOT: &str = "/mnt";

static DRIVE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]):([\\/].*)?$").expect("drive path regex"));

/// How local paths are spelled for the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Paths are passed through unchanged.
    #[default]
    Native,
    /// `C:\dir\file` becomes `/mnt/c/dir/file`, for an openssl running under WSL.
    Wsl,
}

/// Translates local filesystem paths into the syntax the tool expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAdapter {
    mode: PathMode,
}

impl PathAdapter {
    pub fn new(mode: PathMode) -> Self {
        Self { mode }
    }

    /// WSL rewriting is only enabled on Windows hosts that ask for it.
    pub fn from_config(config: &OpensslConfig) -> Self {
        if config.wsl_paths && cfg!(windows) {
            Self::new(PathMode::Wsl)
        } else {
            Self::new(PathMode::Native)
        }
    }

    pub fn mode(&self) -> PathMode {
        self.mode
    }

    /// Spell `path` for the tool's command line.
    ///
    /// # Errors
    /// `InvalidPath` when the path is not valid UTF-8, or when WSL mode is
    /// active and the path is not an absolute drive path such as `C:\dir`.
    pub fn adapt(&self, path: &Path) -> Result<String> {
        let text = path.to_str().ok_or_else(|| {
            OpensslError::InvalidPath(format!("{} is not valid UTF-8", path.display()))
        })?;

        match self.mode {
            PathMode::Native => Ok(text.to_string()),
            PathMode::Wsl => to_wsl_mount(text),
        }
    }
}

fn to_wsl_mount(text: &str) -> Result<String> {
    let caps = DRIVE_PATH.captures(text).ok_or_else(|| {
        OpensslError::InvalidPath(format!("{text} is not an absolute drive path"))
    })?;

    let drive = caps[1].to_ascii_lowercase();
    let mut out = format!("{WSL_MOUNT_ROOT}/{drive}");
    let rest = caps.get(2).map_or("", |m| m.as_str());
    for component in rest.split(['\\', '/']).filter(|c| !c.is_empty()) {
        out.push('/');
        out.push_str(component);
    }
    Ok(out)
}
