use std::{fs, io, path::Path};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/todos";
pub const SETTINGS_FILE: &str = "todo_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

impl ClientSettings {
    /// Validated collection URL with any trailing slash removed.
    pub fn api_url(&self) -> anyhow::Result<Url> {
        normalize_api_url(&self.api_url)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
}

/// Defaults, then `todo_client.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> ClientSettings {
    let settings = load_settings_from(Path::new(SETTINGS_FILE));
    apply_env_overrides(settings, |name| std::env::var(name).ok())
}

pub fn load_settings_from(path: &Path) -> ClientSettings {
    let mut settings = ClientSettings::default();

    match read_settings_file(path) {
        Ok(Some(file_cfg)) => {
            if let Some(v) = file_cfg.api_url {
                settings.api_url = v;
            }
        }
        Ok(None) => {}
        Err(err) => {
            warn!("ignoring settings file: {err:#}");
        }
    }

    settings
}

/// `Ok(None)` when the file does not exist.
fn read_settings_file(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()))
        }
    };
    let file_cfg = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(file_cfg))
}

/// `APP__API_URL` wins over `TODO_API_URL`. Blank values are ignored.
pub fn apply_env_overrides(
    mut settings: ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    for name in ["TODO_API_URL", "APP__API_URL"] {
        if let Some(v) = lookup(name).filter(|v| !v.trim().is_empty()) {
            settings.api_url = v;
        }
    }
    settings
}

pub fn normalize_api_url(raw: &str) -> anyhow::Result<Url> {
    let raw = raw.trim();
    let raw = if raw.is_empty() { DEFAULT_API_URL } else { raw };

    let mut url = Url::parse(raw).with_context(|| format!("invalid api url '{raw}'"))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("api url '{raw}' must be an http(s) URL"));
    }

    let trimmed = url.path().trim_end_matches('/').to_string();
    if trimmed.len() != url.path().len() {
        url.set_path(&trimmed);
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
