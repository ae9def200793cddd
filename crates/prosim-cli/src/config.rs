//! Session configuration – reads/writes `~/.prosim/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted configuration for scoring sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Objective weight of the trunk-corrected shoulder displacement.
    #[serde(default = "default_weight")]
    pub shoulder_weight: f32,

    /// Objective weight of the trunk displacement.
    #[serde(default = "default_weight")]
    pub trunk_weight: f32,

    /// Experimental conditions whose presentation order is randomised by
    /// `prosim order`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,

    /// Seed for condition ordering.  A fresh seed is drawn when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_weight() -> f32 {
    0.5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shoulder_weight: default_weight(),
            trunk_weight: default_weight(),
            conditions: Vec::new(),
            seed: None,
        }
    }
}

/// Return the path to `~/.prosim/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".prosim").join("config.toml")
}

/// Load `~/.prosim/config.toml`, falling back to defaults when it is absent.
pub fn load_or_default() -> Result<Config, String> {
    load_or_default_from(&config_path())
}

/// Load the config at `path` and apply `PROSIM_*` overrides.
///
/// A missing file yields [`Config::default`]; a file that cannot be read or
/// parsed is an error rather than a silent fallback.
pub(crate) fn load_or_default_from(path: &Path) -> Result<Config, String> {
    let mut cfg = read_from(path)?.unwrap_or_default();
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Parse the file at `path` as-is, without environment overrides.
pub(crate) fn read_from(path: &Path) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    Ok(Some(cfg))
}

/// Apply `PROSIM_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `PROSIM_SHOULDER_WEIGHT` | `shoulder_weight` |
/// | `PROSIM_TRUNK_WEIGHT` | `trunk_weight` |
/// | `PROSIM_SEED` | `seed` |
///
/// Values that fail to parse are ignored.
fn apply_env_overrides(cfg: &mut Config) {
    apply_overrides(cfg, |key| std::env::var(key).ok());
}

/// Apply overrides looked up through `var`.
fn apply_overrides(cfg: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PROSIM_SHOULDER_WEIGHT")
        && let Ok(w) = v.parse::<f32>()
    {
        cfg.shoulder_weight = w;
    }
    if let Some(v) = var("PROSIM_TRUNK_WEIGHT")
        && let Ok(w) = v.parse::<f32>()
    {
        cfg.trunk_weight = w;
    }
    if let Some(v) = var("PROSIM_SEED")
        && let Ok(seed) = v.parse::<u64>()
    {
        cfg.seed = Some(seed);
    }
}

/// Save the config to disk, creating `~/.prosim/` if necessary.
pub fn save(cfg: &Config) -> Result<(), String> {
    save_to(cfg, &config_path())
}

/// Save the config to a specific path.
pub(crate) fn save_to(cfg: &Config, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let raw =
        toml::to_string_pretty(cfg).map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn roundtrip_config() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());

        let cfg = Config {
            shoulder_weight: 0.25,
            trunk_weight: 0.75,
            conditions: vec!["rigid".to_string(), "adaptive".to_string()],
            seed: Some(7),
        };
        save_to(&cfg, &path).expect("save");

        let loaded = read_from(&path).expect("load ok").expect("some");
        assert_eq!(loaded.conditions, cfg.conditions);
        assert_eq!(loaded.seed, Some(7));
        assert!((loaded.shoulder_weight - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "conditions = [\"a\"]\n").expect("write");

        let loaded = read_from(&path).expect("load ok").expect("some");
        assert_eq!(loaded.shoulder_weight, 0.5);
        assert_eq!(loaded.trunk_weight, 0.5);
        assert_eq!(loaded.conditions, vec!["a".to_string()]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "shoulder_weight = \"heavy\"\n").expect("write");

        let err = read_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse config"));
    }

    #[test]
    fn config_path_points_to_prosim_dir() {
        let p = config_path_for_home("/home/testuser");
        assert!(p.to_string_lossy().contains(".prosim"));
        assert!(p.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn read_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        assert!(read_from(&path).expect("no error").is_none());
    }

    #[test]
    fn load_or_default_uses_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        let cfg = load_or_default_from(&path).expect("defaults");
        assert!(cfg.conditions.is_empty());
    }

    #[test]
    fn load_or_default_keeps_configured_values() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "conditions = [\"rigid\", \"adaptive\"]\n").expect("write");

        let cfg = load_or_default_from(&path).expect("load ok");
        assert_eq!(cfg.conditions, vec!["rigid".to_string(), "adaptive".to_string()]);
    }

    #[test]
    fn load_or_default_rejects_malformed_file() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "shoulder_weight = 0.25\ntrunk_weight = 0.75\nseed = \"x\"\n",
        )
        .expect("write");

        let err = load_or_default_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse config"));
    }

    #[test]
    fn overrides_apply_to_parsed_values() {
        let vars: HashMap<&str, &str> = [
            ("PROSIM_SHOULDER_WEIGHT", "0.3"),
            ("PROSIM_TRUNK_WEIGHT", "not-a-weight"),
            ("PROSIM_SEED", "42"),
        ]
        .into_iter()
        .collect();
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, |key| vars.get(key).map(|v| v.to_string()));
        assert!((cfg.shoulder_weight - 0.3).abs() < f32::EPSILON);
        assert_eq!(cfg.trunk_weight, 0.5);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn no_overrides_leave_config_unchanged() {
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, |_| None);
        assert_eq!(cfg, Config::default());
    }
}
