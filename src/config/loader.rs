//! Configuration file discovery and loading.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::schema::InventoryConfig;
use crate::error::{InventoryError, Result};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "VSPHERE_INVENTORY_CONFIG";

/// File name looked up next to the executable and in the working directory.
pub const CONFIG_FILE_NAME: &str = "vsphere-inventory.yml";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by `--config` or the environment; must exist.
    Explicit(PathBuf),
    /// Found in a default location.
    Discovered(PathBuf),
    /// No file; built-in defaults.
    Defaults,
}

impl ConfigSource {
    /// Resolve the configuration location.
    ///
    /// Order:
    /// 1. `explicit` (the `--config` flag)
    /// 2. `$VSPHERE_INVENTORY_CONFIG`
    /// 3. `vsphere-inventory.yml` next to the executable
    /// 4. `vsphere-inventory.yml` in the working directory
    pub fn locate(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        if let Ok(value) = std::env::var(CONFIG_ENV_VAR) {
            if !value.is_empty() {
                return ConfigSource::Explicit(expand_path(&value));
            }
        }

        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)));
        let in_cwd = std::env::current_dir()
            .ok()
            .map(|dir| dir.join(CONFIG_FILE_NAME));

        beside_exe
            .into_iter()
            .chain(in_cwd)
            .find(|path| path.is_file())
            .map(ConfigSource::Discovered)
            .unwrap_or(ConfigSource::Defaults)
    }
}

/// Locate and load the configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<InventoryConfig> {
    match ConfigSource::locate(explicit) {
        ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => {
            tracing::debug!("Loading configuration from {:?}", path);
            load_config_file(&path)
        }
        ConfigSource::Defaults => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(InventoryConfig::default())
        }
    }
}

/// Load and validate a configuration file.
pub fn load_config_file(path: &Path) -> Result<InventoryConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(InventoryError::ConfigNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    parse_config(&content, path)
}

/// Parse configuration text. `path` is used for error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<InventoryConfig> {
    let mut config: InventoryConfig = if content.trim().is_empty() {
        InventoryConfig::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| InventoryError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    config.cache.path = expand_path(&config.cache.path.to_string_lossy());
    validate(&config)?;
    Ok(config)
}

/// Check values the schema cannot express.
pub fn validate(config: &InventoryConfig) -> Result<()> {
    if config.cache.path.as_os_str().is_empty() {
        return Err(InventoryError::ConfigValidationError {
            message: "cache.path must not be empty".to_string(),
        });
    }
    let path = &config.cache.path;
    let trailing_separator = path
        .to_string_lossy()
        .ends_with(std::path::is_separator);
    if path.file_name().is_none() || trailing_separator || path.is_dir() {
        return Err(InventoryError::ConfigValidationError {
            message: format!("cache.path {:?} does not name a file", path),
        });
    }
    if config.vsphere.timeout == 0 {
        return Err(InventoryError::ConfigValidationError {
            message: "vsphere.timeout must be at least 1 second".to_string(),
        });
    }
    Ok(())
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references.
///
/// Unknown variables are left as written.
pub fn expand_path(input: &str) -> PathBuf {
    let home = std::env::var("HOME").ok();
    expand_with(input, home.as_deref(), |name| std::env::var(name).ok())
}

fn expand_with(
    input: &str,
    home: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> PathBuf {
    let mut expanded = String::with_capacity(input.len());

    let rest = match (input.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            expanded.push_str(home);
            rest
        }
        _ => input,
    };

    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '$' {
            expanded.push(c);
            continue;
        }

        let (name, consumed) = if rest[i + 1..].starts_with('{') {
            match rest[i + 2..].find('}') {
                Some(end) => (&rest[i + 2..i + 2 + end], end + 2),
                None => ("", 0),
            }
        } else {
            let len = rest[i + 1..]
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(rest.len() - i - 1);
            (&rest[i + 1..i + 1 + len], len)
        };

        match lookup(name) {
            Some(value) if !name.is_empty() => {
                expanded.push_str(&value);
                let end = i + 1 + consumed;
                while chars.peek().is_some_and(|&(j, _)| j < end) {
                    chars.next();
                }
            }
            _ => expanded.push(c),
        }
    }

    PathBuf::from(expanded)
}
