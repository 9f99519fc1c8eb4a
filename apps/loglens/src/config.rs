//! Configuration discovery and effective settings resolution.
//!
//! loglens reads `loglens.toml|yaml|yml` from the starting directory (or the
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `output`: `human`
//! - `server.base_url`: `http://localhost:8080`
//! - `server.timeout_secs`: unset (transport default)
//! - `table.max_lines`: 50
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::submit::AnalysisKind;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_MAX_LINES: usize = 50;

const CONFIG_NAMES: [&str; 3] = ["loglens.toml", "loglens.yaml", "loglens.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Collaborator service section under `[server]`.
pub struct ServerCfg {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Token table section under `[table]`.
pub struct TableCfg {
    pub max_lines: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `loglens.toml|yaml`.
pub struct LoglensConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub server: Option<ServerCfg>,
    #[serde(default)]
    pub table: Option<TableCfg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            _ => Err(ConfigError::Output(s.to_string())),
        }
    }
}

/// Where and how to reach the analysis service. Built once per process and
/// handed to the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|_| ConfigError::BaseUrl(base_url.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::BaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Full URL of the endpoint serving `kind`.
    pub fn endpoint(&self, kind: AnalysisKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// CLI-provided values; `None` defers to the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub root: Option<&'a str>,
    pub server: Option<&'a str>,
    pub output: Option<&'a str>,
    pub max_lines: Option<usize>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub config_file: Option<PathBuf>,
    pub client: ClientConfig,
    pub output: OutputMode,
    pub max_lines: usize,
}

/// Walk upward from `start` to find the directory holding the config.
///
/// Stops when a `loglens.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `LoglensConfig` from `root` if a config file is present.
///
/// A file that exists but does not parse is an error, not a silent default.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, LoglensConfig)>, ConfigError> {
    for name in CONFIG_NAMES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let parse_err = |message: String| ConfigError::Parse {
            path: path.to_string_lossy().to_string(),
            message,
        };
        let s = fs::read_to_string(&path).map_err(|e| parse_err(e.to_string()))?;
        let cfg: LoglensConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|e| parse_err(e.to_string()))?
        } else {
            serde_yaml::from_str(&s).map_err(|e| parse_err(e.to_string()))?
        };
        return Ok(Some((path, cfg)));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.root.unwrap_or("."));
    let root = detect_root(&start);
    let (config_file, cfg) = match load_config(&root)? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, LoglensConfig::default()),
    };

    let output = match cli.output.map(str::to_string).or(cfg.output) {
        Some(s) => s.parse()?,
        None => OutputMode::Human,
    };

    let base_url = cli
        .server
        .map(str::to_string)
        .or_else(|| cfg.server.as_ref().and_then(|s| s.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let timeout = cfg
        .server
        .as_ref()
        .and_then(|s| s.timeout_secs)
        .map(Duration::from_secs);
    let client = ClientConfig::new(&base_url, timeout)?;

    let max_lines = cli
        .max_lines
        .or_else(|| cfg.table.as_ref().and_then(|t| t.max_lines))
        .unwrap_or(DEFAULT_MAX_LINES);

    debug!(
        root = %root.display(),
        base_url = %client.base_url,
        max_lines,
        "resolved configuration"
    );
    Ok(Effective {
        root,
        config_file,
        client,
        output,
        max_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(&CliOverrides {
            root: dir.path().to_str(),
            ..Default::default()
        })
        .unwrap();
        assert!(eff.config_file.is_none());
        assert_eq!(eff.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(eff.client.timeout, None);
        assert_eq!(eff.output, OutputMode::Human);
        assert_eq!(eff.max_lines, DEFAULT_MAX_LINES);
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("loglens.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
[server]
base_url = "http://analysis.internal:9000/"
timeout_secs = 5
[table]
max_lines = 10
    "#
        )
        .unwrap();

        let nested = root.join("logs/today");
        fs::create_dir_all(&nested).unwrap();
        let eff = resolve_effective(&CliOverrides {
            root: nested.to_str(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(eff.root, root);
        assert_eq!(eff.output, OutputMode::Json);
        assert_eq!(eff.client.base_url, "http://analysis.internal:9000");
        assert_eq!(eff.client.timeout, Some(Duration::from_secs(5)));
        assert_eq!(eff.max_lines, 10);
        assert_eq!(
            eff.client.endpoint(AnalysisKind::Logs),
            "http://analysis.internal:9000/api/analyze-logs"
        );
    }

    #[test]
    fn test_load_yaml_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("loglens.yaml"),
            "output: json\nserver:\n  base_url: http://yaml-host:8080\ntable:\n  max_lines: 5\n",
        )
        .unwrap();

        let eff = resolve_effective(&CliOverrides {
            root: root.to_str(),
            server: Some("https://cli-host"),
            output: Some("human"),
            max_lines: Some(100),
        })
        .unwrap();
        assert_eq!(eff.client.base_url, "https://cli-host");
        assert_eq!(eff.output, OutputMode::Human);
        assert_eq!(eff.max_lines, 100);
    }

    #[test]
    fn test_broken_config_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("loglens.toml"), "output = [unterminated").unwrap();
        let err = resolve_effective(&CliOverrides {
            root: dir.path().to_str(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            ClientConfig::new("localhost:8080", None),
            Err(ConfigError::BaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://host", None),
            Err(ConfigError::BaseUrl(_))
        ));
        assert!(matches!(
            "xml".parse::<OutputMode>(),
            Err(ConfigError::Output(_))
        ));
    }
}
