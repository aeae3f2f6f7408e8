use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default confidence threshold for extraction.
///
/// A full-label phrase match alone scores 0.7, scattered label tokens at
/// most 0.35; 0.3 keeps strong partial matches and drops incidental
/// single-token overlap.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkillgraphConfig {
    pub database: Option<String>,
    pub catalog: Option<String>,
    pub threshold: Option<f32>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("skillgraph.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("skillgraph.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<SkillgraphConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: SkillgraphConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &SkillgraphConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
