use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uphcs_client::client::DEFAULT_BASE_URL;
use uphcs_core::models::clinic::Clinic;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Overrides `base_url` from the config file when set.
pub const API_URL_ENV: &str = "UPHCS_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub base_url: String,
    /// Session token from the last `login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Added in v1. Older configs start with no selection and fall back to
    /// the user's first clinic.
    #[serde(default)]
    pub selected_clinic: Option<Clinic>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            selected_clinic: None,
        }
    }
}

impl CliConfig {
    /// The base URL to talk to: `UPHCS_API_URL` if set and non-empty,
    /// otherwise the configured one.
    pub fn effective_base_url(&self, env_override: Option<&str>) -> String {
        match env_override.map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.base_url.clone(),
        }
    }

    /// Forget the session and the clinic selection.
    pub fn clear_session(&mut self) {
        self.token = None;
        self.selected_clinic = None;
    }
}

/// `<platform config dir>/uphcs/config.json`.
pub fn default_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("uphcs").join("config.json"))
}

/// Load the config at `path`, or defaults when no file exists yet.
pub fn load_or_default(path: &Path) -> eyre::Result<CliConfig> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(CliConfig::default())
    }
}

pub fn load_config(path: &Path) -> eyre::Result<CliConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(raw) => u32::try_from(raw).map_err(|_| {
            eyre::eyre!(
                "config_version {raw} is newer than this build supports ({CURRENT_VERSION}). \
                 Please update uphcs."
            )
        })?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: CliConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update uphcs."
        ));
    }

    // v0 → v1: add selected_clinic
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("selected_clinic").or_insert(serde_json::Value::Null);
        obj.entry("base_url")
            .or_insert(serde_json::Value::String(DEFAULT_BASE_URL.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added selected_clinic)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &CliConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent directory", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // The file holds a session token
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
