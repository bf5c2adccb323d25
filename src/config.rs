//! Tool configuration
//!
//! Settings are resolved in the following order (later overrides earlier):
//! 1. Default values
//! 2. A YAML file, either given explicitly or named by `OPENSSLUTILS_CONFIG`
//! 3. Environment variables prefixed with `OPENSSLUTILS_`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OpensslError, Result};

/// Settings shared by every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpensslConfig {
    /// Path to the openssl executable. A bare name is resolved through `PATH`.
    #[serde(default = "default_tool_path")]
    pub tool_path: PathBuf,
    /// Rewrite `C:\...` paths to `/mnt/c/...` before handing them to the tool.
    /// Only honoured on Windows hosts.
    #[serde(default)]
    pub wsl_paths: bool,
    /// Directory for generated key, CSR and certificate files.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

fn default_tool_path() -> PathBuf {
    PathBuf::from("openssl")
}

impl Default for OpensslConfig {
    fn default() -> Self {
        Self {
            tool_path: default_tool_path(),
            wsl_paths: false,
            temp_dir: None,
        }
    }
}

impl OpensslConfig {
    /// Parse a YAML document. Missing keys fall back to their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Load a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OpensslError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }

    /// Load the configuration file named by `OPENSSLUTILS_CONFIG` (if any),
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os("OPENSSLUTILS_CONFIG") {
            Some(path) => {
                let path = PathBuf::from(path);
                debug!("loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `OPENSSLUTILS_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tool) = lookup("OPENSSLUTILS_TOOL_PATH").filter(|v| !v.is_empty()) {
            self.tool_path = PathBuf::from(tool);
        }
        if let Some(flag) = lookup("OPENSSLUTILS_WSL_PATHS") {
            self.wsl_paths = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(dir) = lookup("OPENSSLUTILS_TEMP_DIR").filter(|v| !v.is_empty()) {
            self.temp_dir = Some(PathBuf::from(dir));
        }
    }

    /// Directory used for temporary outputs.
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_resolve_openssl_through_path() {
        let config = OpensslConfig::default();
        assert_eq!(config.tool_path, PathBuf::from("openssl"));
        assert!(!config.wsl_paths);
        assert_eq!(config.temp_dir(), std::env::temp_dir());
    }

    #[test]
    fn yaml_keys_are_optional() {
        let config = OpensslConfig::from_yaml("wsl_paths: true\n").unwrap();
        assert_eq!(config.tool_path, PathBuf::from("openssl"));
        assert!(config.wsl_paths);

        let config =
            OpensslConfig::from_yaml("tool_path: /usr/local/bin/openssl\ntemp_dir: /var/tmp\n")
                .unwrap();
        assert_eq!(config.tool_path, PathBuf::from("/usr/local/bin/openssl"));
        assert_eq!(config.temp_dir(), PathBuf::from("/var/tmp"));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = OpensslConfig::from_yaml("wsl_paths: [not, a, bool]").unwrap_err();
        assert!(matches!(err, OpensslError::Config(_)));
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let env: HashMap<&str, &str> = [
            ("OPENSSLUTILS_TOOL_PATH", "/opt/openssl3/bin/openssl"),
            ("OPENSSLUTILS_WSL_PATHS", "Yes"),
            ("OPENSSLUTILS_TEMP_DIR", ""),
        ]
        .into_iter()
        .collect();

        let mut config = OpensslConfig::from_yaml("temp_dir: /scratch").unwrap();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.tool_path, PathBuf::from("/opt/openssl3/bin/openssl"));
        assert!(config.wsl_paths);
        assert_eq!(config.temp_dir, Some(PathBuf::from("/scratch")));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = OpensslConfig::from_file(Path::new("/nonexistent/opensslutils.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/opensslutils.yaml"));
    }
}
