//! Configuration types for zensearch.
//!
//! [`Config::load`] layers three sources, later ones winning:
//!
//! 1. the built-in defaults embedded below,
//! 2. `~/.config/zensearch/config.toml` (created with the defaults if it does
//!    not yet exist) or an explicit `--config` path,
//! 3. `ZENSEARCH__SECTION__KEY` environment variables.
//!
//! [`Config::defaults`] returns the built-in defaults without touching the
//! filesystem or the environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind              = "127.0.0.1:8080"
cors_allow_origin = "*"

[corpus]
path               = "data/courses.json"
watch              = true
fallback_to_sample = true

[search]
semantic = false
fuzzy    = true
limit    = 20

[synonyms]

[ui]
theme            = "default"
history_size     = 20
history_visible  = 5
suggestion_limit = 8
"#;

const ENV_PREFIX: &str = "ZENSEARCH";
const ENV_SEPARATOR: &str = "__";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub synonyms: SynonymsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_cors_allow_origin")]
    pub cors_allow_origin: String,
}

fn default_bind() -> String { "127.0.0.1:8080".to_string() }
fn default_cors_allow_origin() -> String { "*".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_allow_origin: default_cors_allow_origin(),
        }
    }
}

/// `[corpus]` section of `config.toml`.
///
/// `url` takes precedence over `path` when set.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub url: Option<String>,
    /// Reload `path` when it changes on disk.
    #[serde(default = "default_true")]
    pub watch: bool,
    /// Serve the embedded sample courses when the primary source fails.
    #[serde(default = "default_true")]
    pub fallback_to_sample: bool,
}

fn default_corpus_path() -> PathBuf { PathBuf::from("data/courses.json") }
fn default_true() -> bool { true }

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            url: None,
            watch: true,
            fallback_to_sample: true,
        }
    }
}

/// `[search]` section: defaults applied when a caller leaves an option unset.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub semantic: bool,
    #[serde(default = "default_true")]
    pub fuzzy: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize { 20 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { semantic: false, fuzzy: true, limit: default_limit() }
    }
}

/// `[synonyms]` section. Without a `path` the built-in table is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SynonymsConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    #[serde(default = "default_history_visible")]
    pub history_visible: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

fn default_theme() -> String { "default".to_string() }
fn default_history_size() -> usize { 20 }
fn default_history_visible() -> usize { 5 }
fn default_suggestion_limit() -> usize { 8 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            history_size: default_history_size(),
            history_visible: default_history_visible(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise the per-user file
    /// is used, and created with the defaults on first run.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = config_path();
                if !path.exists() {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
                }
                path
            }
        };

        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(explicit.is_some()),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    }

    /// Parse a TOML document layered over the defaults. No environment.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("zensearch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
