//! Configuration module for SpecSync.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.
//! The configuration is resolved once at startup and is read-only afterwards.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::TemplateTag;
use crate::domain::errors::SyncError;

/// Environment variable that overrides `catalog.password`.
pub const PASSWORD_ENV_VAR: &str = "SPECSYNC_PASSWORD";

// ---------------------------------------------------------------------------
// Policy enums
// ---------------------------------------------------------------------------

/// What to do when a scenario's test case already exists in its folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingTestCaseOption {
    /// Leave the existing test case untouched.
    #[default]
    Skip,
    /// Patch the existing test case in place.
    Update,
    /// Delete the existing test case and create it again.
    Delete,
}

impl Display for ExistingTestCaseOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for ExistingTestCaseOption {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(Self::Skip),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(SyncError::Configuration(format!(
                "invalid existing test case option '{other}'; valid options: skip, update, delete"
            ))),
        }
    }
}

/// Remote test case template used for created and updated test cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestCaseTemplate {
    /// BDD narrative.
    #[default]
    Bdd,
    /// Structured step table.
    Steps,
}

impl TestCaseTemplate {
    /// Template tag the remote catalog stores for this template.
    pub fn tag(self) -> TemplateTag {
        match self {
            Self::Bdd => TemplateTag::Bdd,
            Self::Steps => TemplateTag::Steps,
        }
    }
}

impl Display for TestCaseTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bdd => write!(f, "bdd"),
            Self::Steps => write!(f, "steps"),
        }
    }
}

impl FromStr for TestCaseTemplate {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bdd" => Ok(Self::Bdd),
            "steps" => Ok(Self::Steps),
            other => Err(SyncError::Configuration(format!(
                "invalid test case template '{other}'; valid options: bdd, steps"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for SpecSync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Remote catalog connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without the `/projects/{p}` suffix.
    pub base_url: String,
    /// Project identifier every request is scoped to.
    pub project: String,
    /// Basic-auth user name.
    pub username: String,
    /// Basic-auth password or API token. Overridden by `SPECSYNC_PASSWORD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Reconciliation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Policy applied when a test case with the scenario's title already exists.
    pub existing_test_case_option: ExistingTestCaseOption,
    /// Template of created and updated test cases.
    pub test_case_template: TestCaseTemplate,
    /// Mirror local directories as remote folders.
    pub preserve_directory_structure: bool,
    /// Milliseconds to wait after creating a folder before continuing.
    pub folder_creation_delay_ms: u64,
    /// Optional remote folder every synchronized document lands under.
    pub root_folder: Option<String>,
    /// Extension (without the dot) of specification files.
    pub feature_extension: String,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    ///
    /// Unknown enum values (e.g. `test_case_template: gherkin`) are rejected
    /// here with [`SyncError::Configuration`] rather than at first use.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, SyncError> {
        serde_yaml::from_str(content).map_err(|e| SyncError::Configuration(e.to_string()))
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/specsync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("specsync")
            .join("config.yaml")
    }
}

impl CatalogConfig {
    /// Password from `SPECSYNC_PASSWORD`, falling back to the file value.
    pub fn resolve_password(&self) -> Result<String, SyncError> {
        self.resolve_password_with(std::env::var(PASSWORD_ENV_VAR).ok())
    }

    fn resolve_password_with(&self, env_value: Option<String>) -> Result<String, SyncError> {
        env_value
            .filter(|v| !v.is_empty())
            .or_else(|| self.password.clone().filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                SyncError::Configuration(format!(
                    "no catalog password configured; set catalog.password or {PASSWORD_ENV_VAR}"
                ))
            })
    }
}

impl SyncConfig {
    /// Settling delay applied after each folder creation.
    pub fn folder_creation_delay(&self) -> Duration {
        Duration::from_millis(self.folder_creation_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            existing_test_case_option: ExistingTestCaseOption::Skip,
            test_case_template: TestCaseTemplate::Bdd,
            preserve_directory_structure: false,
            folder_creation_delay_ms: 1000,
            root_folder: None,
            feature_extension: "feature".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"catalog.base_url"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- catalog ---
        if self.catalog.base_url.trim().is_empty() {
            errors.push(ValidationError {
                field: "catalog.base_url".into(),
                message: "must not be empty".into(),
            });
        } else if !self.catalog.base_url.starts_with("http://")
            && !self.catalog.base_url.starts_with("https://")
        {
            errors.push(ValidationError {
                field: "catalog.base_url".into(),
                message: format!(
                    "must start with http:// or https://, got '{}'",
                    self.catalog.base_url
                ),
            });
        }
        if self.catalog.project.trim().is_empty() {
            errors.push(ValidationError {
                field: "catalog.project".into(),
                message: "must not be empty".into(),
            });
        }
        if self.catalog.username.trim().is_empty() {
            errors.push(ValidationError {
                field: "catalog.username".into(),
                message: "must not be empty".into(),
            });
        }

        // --- sync ---
        if self.sync.feature_extension.is_empty() {
            errors.push(ValidationError {
                field: "sync.feature_extension".into(),
                message: "must not be empty".into(),
            });
        } else if self.sync.feature_extension.starts_with('.') {
            errors.push(ValidationError {
                field: "sync.feature_extension".into(),
                message: "must not start with a dot".into(),
            });
        }
        if let Some(root) = &self.sync.root_folder {
            if root.trim().is_empty() {
                errors.push(ValidationError {
                    field: "sync.root_folder".into(),
                    message: "must not be blank when set".into(),
                });
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use specsync_core::config::{ConfigBuilder, TestCaseTemplate};
///
/// let config = ConfigBuilder::new()
///     .catalog_base_url("https://catalog.example.com/api/v1")
///     .catalog_project("PRJ")
///     .sync_test_case_template(TestCaseTemplate::Steps)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- catalog ---

    pub fn catalog_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.catalog.base_url = url.into();
        self
    }

    pub fn catalog_project(mut self, project: impl Into<String>) -> Self {
        self.config.catalog.project = project.into();
        self
    }

    pub fn catalog_username(mut self, username: impl Into<String>) -> Self {
        self.config.catalog.username = username.into();
        self
    }

    pub fn catalog_password(mut self, password: impl Into<String>) -> Self {
        self.config.catalog.password = Some(password.into());
        self
    }

    // --- sync ---

    pub fn sync_existing_test_case_option(mut self, option: ExistingTestCaseOption) -> Self {
        self.config.sync.existing_test_case_option = option;
        self
    }

    pub fn sync_test_case_template(mut self, template: TestCaseTemplate) -> Self {
        self.config.sync.test_case_template = template;
        self
    }

    pub fn sync_preserve_directory_structure(mut self, preserve: bool) -> Self {
        self.config.sync.preserve_directory_structure = preserve;
        self
    }

    pub fn sync_folder_creation_delay_ms(mut self, ms: u64) -> Self {
        self.config.sync.folder_creation_delay_ms = ms;
        self
    }

    pub fn sync_root_folder(mut self, name: impl Into<String>) -> Self {
        self.config.sync.root_folder = Some(name.into());
        self
    }

    pub fn sync_feature_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.sync.feature_extension = extension.into();
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
