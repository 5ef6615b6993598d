use crate::error::{ImportanceError, Result};
use crate::types::config::ImportanceConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "importance.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".importance/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/importance/config.toml";

pub fn load_config(root: &Path) -> Result<ImportanceConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<ImportanceConfig> {
    let candidates = global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([root.join(DEFAULT_CONFIG_FILE), root.join(DEFAULT_LOCAL_FILE)]);

    let mut merged = Value::Table(Map::new());
    let mut layers = Vec::new();
    for path in candidates {
        if merge_file_if_exists(&mut merged, &path)? {
            layers.push(path);
        }
    }

    let cfg: ImportanceConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ImportanceError::ConfigParse(e.to_string()))?;
    cfg.validate().map_err(|e| with_layers(e, &layers))?;
    tracing::debug!(root = %root.display(), layers = layers.len(), "configuration loaded");
    Ok(cfg)
}

/// Names the files that were merged, so a bad value can be traced to its layer.
fn with_layers(error: ImportanceError, layers: &[PathBuf]) -> ImportanceError {
    match error {
        ImportanceError::ConfigParse(message) if !layers.is_empty() => {
            let sources = layers
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            ImportanceError::ConfigParse(format!("{message} (merged from {sources})"))
        }
        other => other,
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ImportanceError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
