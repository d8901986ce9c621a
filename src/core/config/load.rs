//! Configuration loading with env-var overrides.
//!
//! Reads a TOML file, follows `[meta] base = "..."` inheritance chains, then
//! applies `OPENAI_API_KEY`, `OPENAI_API_BASE`, `BCA_EXPERT_BIND` and
//! `BCA_EXPERT_LOG_LEVEL` from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::Table;

use crate::error::AppError;

use super::raw::RawConfig;
use super::types::*;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Fold `overlay` into `base`. Nested tables merge; everything else replaces.
fn overlay_table(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(nested) => match base.get_mut(&key) {
                Some(toml::Value::Table(inner)) => overlay_table(inner, nested),
                _ => {
                    base.insert(key, toml::Value::Table(nested));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

fn read_table(path: &Path) -> Result<Table, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    text.parse::<Table>()
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))
}

/// `[meta] base` of `table`, relative to the file that named it.
fn base_of(table: &Table, path: &Path) -> Option<PathBuf> {
    let base = table.get("meta")?.get("base")?.as_str()?;
    let dir = path.parent().unwrap_or(Path::new("."));
    Some(dir.join(base))
}

/// Read `path` and its `[meta] base` chain; nearer files win.
fn read_layered(path: &Path) -> Result<Table, AppError> {
    let mut chain: Vec<(PathBuf, Table)> = Vec::new();
    let mut next = Some(path.to_path_buf());

    while let Some(current) = next {
        let key = current.canonicalize().unwrap_or_else(|_| current.clone());
        if chain.iter().any(|(seen, _)| *seen == key) {
            return Err(AppError::Config(format!(
                "circular base reference detected at: {}",
                current.display()
            )));
        }
        let table = read_table(&current)?;
        next = base_of(&table, &current);
        chain.push((key, table));
    }

    let mut merged = Table::new();
    for (_, layer) in chain.into_iter().rev() {
        overlay_table(&mut merged, layer);
    }
    Ok(merged)
}

/// Load config from `config_path`, or `config/default.toml` when it exists,
/// or the built-in defaults; then apply environment overrides.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let env = EnvOverrides::from_env();

    if let Some(path) = config_path {
        return load_from(Some(Path::new(path)), &env);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_from(Some(default_path), &env)
    } else {
        load_from(None, &env)
    }
}

/// Resolve a [`Config`] from an optional file and explicit overrides.
/// `path = None` skips file loading entirely.
pub fn load_from(path: Option<&Path>, env: &EnvOverrides) -> Result<Config, AppError> {
    let parsed = match path {
        Some(p) => {
            let merged = read_layered(p)?;
            RawConfig::deserialize(toml::Value::Table(merged)).map_err(|e: toml::de::Error| {
                AppError::Config(format!("config error in {}: {e}", p.display()))
            })?
        }
        None => RawConfig::default(),
    };

    if parsed.llm.timeout_seconds == 0 {
        return Err(AppError::Config("llm.timeout_seconds must be greater than zero".into()));
    }

    let level = env.log_level.clone().unwrap_or(parsed.log.level);
    crate::logger::validate_level(&level)?;

    let api_base = env
        .api_base
        .clone()
        .or(parsed.llm.api_base)
        .filter(|b| !b.trim().is_empty());

    Ok(Config {
        server: ServerConfig {
            bind: env.bind.clone().unwrap_or(parsed.server.bind),
            service_name: parsed.server.service_name,
            cors: parsed.server.cors,
        },
        log: LogConfig {
            level,
            file: parsed.log.file.as_deref().map(expand_home),
        },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            api_base,
            model: parsed.llm.model,
            max_tokens: parsed.llm.max_tokens,
            temperature: parsed.llm.temperature,
            timeout_seconds: parsed.llm.timeout_seconds,
        },
        llm_api_key: env.api_key.clone(),
    })
}

/// Replace a leading `~` with the home directory; other paths pass through.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
