//! Configuration management for Sidebar.
//!
//! Parses `sidebar.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Sidebar Items
//!
//! Each `[[sidebar]]` table is a top-level section. Items inside `items`
//! arrays are validated into [`NavNode`]s while loading:
//!
//! - `{ label, slug }` - explicit entry
//! - `{ label, collapsed?, items }` - nested group
//! - `{ autogenerate = { directory } }` - directory expansion
//! - `{ label, collapsed?, autogenerate = { directory } }` - group holding a
//!   single directory expansion
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.base_url`
//! - `content.source_dir`

mod expand;
mod sidebar;

use serde::{Deserialize, Serialize};
use sidebar_nav::NavGroup;
use std::path::{Path, PathBuf};

use sidebar::SidebarItemRaw;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override site title.
    pub title: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sidebar.toml";

/// Default content directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "src/content/docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Sidebar sections as written in TOML.
    sidebar: Vec<SidebarItemRaw>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Validated sidebar sections (set after loading).
    #[serde(skip)]
    pub sidebar_resolved: Vec<NavGroup>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site-wide settings, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Short site description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Favicon URL path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Public base URL of the deployed site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            description: None,
            favicon: None,
            base_url: None,
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Content root scanned for documents.
    pub source_dir: PathBuf,
    /// File extensions treated as documents (without dot).
    pub extensions: Vec<String>,
    /// Glob patterns, relative to `source_dir`, of files to skip.
    pub exclude: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_owned(), "mdx".to_owned()]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sidebar.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the sidebar is malformed.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// Relative paths are resolved against `config_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(config_dir);
        config.sidebar_resolved = sidebar::build_sections(&config.sidebar)?;
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(title) = &settings.title {
            self.site.title.clone_from(title);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            content: ContentConfigRaw::default(),
            sidebar: Vec::new(),
            content_resolved: ContentConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                ..ContentConfig::default()
            },
            sidebar_resolved: Vec::new(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));

        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_content()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        if let Some(ref base_url) = self.site.base_url {
            require_http_url(base_url, "site.base_url")?;
        }
        Ok(())
    }

    /// Validate content configuration.
    fn validate_content(&self) -> Result<(), ConfigError> {
        let content = &self.content_resolved;

        if content.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "content.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &content.extensions {
            require_non_empty(ext, "content.extensions")?;
        }

        for pattern in &content.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "content.exclude pattern {pattern:?} is invalid: {e}"
                ))
            })?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;

        if let Some(ref url) = self.site.base_url {
            self.site.base_url = Some(expand::expand_env(url, "site.base_url")?);
        }

        if let Some(ref dir) = self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(dir, "content.source_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = self
            .content
            .source_dir
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_DIR);

        self.content_resolved = ContentConfig {
            source_dir: config_dir.join(source_dir),
            extensions: self
                .content
                .extensions
                .iter()
                .flatten()
                .map(|ext| ext.trim_start_matches('.').to_owned())
                .collect(),
            exclude: self.content.exclude.clone().unwrap_or_default(),
        };

        if self.content.extensions.is_none() {
            self.content_resolved.extensions = default_extensions();
        }
    }
}
