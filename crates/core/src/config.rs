use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::chunk::ParseOptions;

/// Prefix shared by every environment override, e.g. `RECIPE_AGENT_SERVER_PORT`.
pub const ENV_PREFIX: &str = "RECIPE_AGENT";

/// Optional YAML file read by [`Config::load`], relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Recipe directories probed, in order, when none is configured.
const RECIPE_DIR_CANDIDATES: &[&str] = &[
    "FitDietAI/recipes",
    "recipes",
    "FitDietAI/recipies",
    "recipies",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok()
}

// ── Overrides ─────────────────────────────────────────────────

/// Environment lookup with profile fallback: `{PROFILE}_{KEY}` first, then `{KEY}`.
struct Overrides<'a> {
    profile: &'a str,
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl Overrides<'_> {
    fn get(&self, key: &str) -> Option<String> {
        let full = format!("{}_{}", ENV_PREFIX, key);
        if !self.profile.is_empty() {
            let prefixed = format!("{}_{}", self.profile, full);
            if let Some(v) = (self.lookup)(&prefixed).filter(|s| !s.is_empty()) {
                return Some(v);
            }
        }
        (self.lookup)(&full).filter(|s| !s.is_empty())
    }

    fn string(&self, key: &str, slot: &mut String) {
        if let Some(v) = self.get(key) {
            *slot = v;
        }
    }

    fn path(&self, key: &str, slot: &mut PathBuf) {
        if let Some(v) = self.get(key) {
            *slot = PathBuf::from(v);
        }
    }

    fn opt(&self, key: &str, slot: &mut Option<String>) {
        if let Some(v) = self.get(key) {
            *slot = Some(v);
        }
    }

    fn parsed<T: FromStr>(&self, key: &str, slot: &mut T) {
        if let Some(v) = self.get(key) {
            match v.parse() {
                Ok(parsed) => *slot = parsed,
                Err(_) => tracing::warn!(key = %key, value = %v, "ignoring unparsable override"),
            }
        }
    }

    fn flag(&self, key: &str, slot: &mut bool) {
        if let Some(v) = self.get(key) {
            match parse_bool(&v) {
                Some(b) => *slot = b,
                None => tracing::warn!(key = %key, value = %v, "ignoring non-boolean override"),
            }
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active profile name (empty = default).
    #[serde(skip)]
    pub profile: String,
    pub server: ServerConfig,
    pub parse: ParseConfig,
    pub deepseek: DeepSeekConfig,
    pub es8: Es8Config,
}

impl Config {
    /// Defaults, then [`DEFAULT_CONFIG_PATH`] if present, then the process
    /// environment (call `load_dotenv()` first). The profile comes from
    /// `RECIPE_AGENT_PROFILE`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Like [`Config::load`] but reading `path` instead of the default file.
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_from(path)?;
        let profile = env_opt(&format!("{}_PROFILE", ENV_PREFIX)).unwrap_or_default();
        Ok(config.with_overrides(&profile, &env_opt))
    }

    /// Read a YAML file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Layer overrides from `lookup` (normally the process environment).
    pub fn with_overrides(
        mut self,
        profile: &str,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Self {
        let profile = profile.trim().to_uppercase();
        let o = Overrides {
            profile: &profile,
            lookup,
        };

        o.string("SERVER_HOST", &mut self.server.host);
        o.parsed("SERVER_PORT", &mut self.server.port);
        o.string("SERVER_CORS_ORIGIN", &mut self.server.cors_origin);

        o.path("PARSE_DIR", &mut self.parse.dir);
        o.path("PARSE_OUT", &mut self.parse.out);
        o.parsed("PARSE_CHUNK_SIZE", &mut self.parse.chunk_size);
        o.parsed("PARSE_OVERLAP", &mut self.parse.overlap);
        o.flag("PARSE_BY_HEADER", &mut self.parse.by_header);
        o.flag("PARSE_TIMESTAMP", &mut self.parse.timestamp);

        o.string("DEEPSEEK_BASE_URL", &mut self.deepseek.base_url);
        o.string("DEEPSEEK_MODEL", &mut self.deepseek.model);
        o.opt("DEEPSEEK_API_KEY", &mut self.deepseek.api_key);

        o.string("ES8_ADDRESS", &mut self.es8.address);
        o.opt("ES8_USERNAME", &mut self.es8.username);
        o.opt("ES8_PASSWORD", &mut self.es8.password);
        o.string("ES8_INDEX", &mut self.es8.index);

        self.profile = profile;
        self
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:    {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  parse:     dir={}, out={}, by_header={}, chunk={}, overlap={}",
            self.parse.dir.display(),
            self.parse.out.display(),
            self.parse.by_header,
            self.parse.chunk_size,
            self.parse.overlap
        );
        tracing::info!(
            "  deepseek:  model={}, key={}",
            self.deepseek.model,
            if self.deepseek.is_configured() { "set" } else { "(none)" }
        );
        tracing::info!("  es8:       address={}, index={}", self.es8.address, self.es8.index);
    }

    /// Return a redacted view safe for API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": { "host": self.server.host, "port": self.server.port },
            "parse": {
                "dir": self.parse.dir,
                "out": self.parse.out,
                "chunk_size": self.parse.chunk_size,
                "overlap": self.parse.overlap,
                "by_header": self.parse.by_header,
                "timestamp": self.parse.timestamp,
            },
            "deepseek": {
                "base_url": self.deepseek.base_url,
                "model": self.deepseek.model,
                "configured": self.deepseek.is_configured(),
            },
            "es8": {
                "address": self.es8.address,
                "index": self.es8.index,
                "authenticated": self.es8.username.is_some() && self.es8.password.is_some(),
            },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origin: "*".to_string(),
        }
    }
}

// ── Parse ─────────────────────────────────────────────────────

/// Defaults for the `parse` command and the HTTP parse endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub dir: PathBuf,
    pub out: PathBuf,
    pub chunk_size: i64,
    pub overlap: i64,
    pub by_header: bool,
    pub timestamp: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            dir: default_recipes_dir(),
            out: Path::new("parse").join("out").join("chunks.jsonl"),
            chunk_size: 1200,
            overlap: 100,
            by_header: true,
            timestamp: true,
        }
    }
}

impl ParseConfig {
    pub fn options(&self) -> ParseOptions {
        ParseOptions {
            by_header: self.by_header,
            chunk_size: self.chunk_size,
            overlap: self.overlap,
            timestamp: self.timestamp,
        }
    }
}

/// First existing candidate directory, else the first candidate.
pub fn default_recipes_dir() -> PathBuf {
    RECIPE_DIR_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_dir())
        .unwrap_or_else(|| PathBuf::from(RECIPE_DIR_CANDIDATES[0]))
}

// ── DeepSeek ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeepSeekConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            api_key: None,
        }
    }
}

impl DeepSeekConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// ── Elasticsearch 8 ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Es8Config {
    pub address: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub index: String,
}

impl Default for Es8Config {
    fn default() -> Self {
        Self {
            address: "http://localhost:9200".to_string(),
            username: None,
            password: None,
            index: "recipes".to_string(),
        }
    }
}
