//! Config command - View and manage SpecSync configuration
//!
//! Provides the `specsync config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON) with the password masked
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use specsync_core::config::Config;

use super::GlobalOptions;
use crate::output::plural;

/// Shown in place of the configured password
const MASKED: &str = "********";

/// Keys accepted by `config set`, with a short description
const SUPPORTED_KEYS: &[(&str, &str)] = &[
    ("catalog.base_url", "Catalog API base URL"),
    ("catalog.project", "Project identifier"),
    ("catalog.username", "Basic-auth user name"),
    ("catalog.password", "Basic-auth password (\"none\" clears it)"),
    ("sync.existing_test_case_option", "skip|update|delete"),
    ("sync.test_case_template", "bdd|steps"),
    ("sync.preserve_directory_structure", "true|false"),
    ("sync.folder_creation_delay_ms", "Delay after folder creation (ms)"),
    ("sync.root_folder", "Remote root folder (\"none\" clears it)"),
    ("sync.feature_extension", "Feature file extension"),
    ("logging.level", "trace|debug|info|warn|error"),
];

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "sync.test_case_template")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub fn execute(&self, options: &GlobalOptions) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(options),
            ConfigCommand::Set { key, value } => self.execute_set(key, value, options),
            ConfigCommand::Validate => self.execute_validate(options),
        }
    }

    /// Show current configuration
    fn execute_show(&self, options: &GlobalOptions) -> Result<()> {
        let formatter = options.formatter();
        let config_path = &options.config_path;
        let config = masked(Config::load_or_default(config_path));

        info!(config_path = %config_path.display(), "Showing configuration");

        if options.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;

            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    /// Set a configuration value using dot-notation
    fn execute_set(&self, key: &str, value: &str, options: &GlobalOptions) -> Result<()> {
        let formatter = options.formatter();
        let config_path = &options.config_path;
        let mut config = Config::load_or_default(config_path);
        let shown_value = if key == "catalog.password" { MASKED } else { value };

        info!(key = %key, value = %shown_value, "Setting configuration value");

        if let Err(e) = apply_config_value(&mut config, key, value) {
            if options.is_json() {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "value": shown_value,
                    "error": format!("{e:#}"),
                }));
            } else {
                formatter.error(&format!("Failed to set '{}': {:#}", key, e));
                formatter.info("");
                formatter.info("Supported keys:");
                for (name, description) in SUPPORTED_KEYS {
                    formatter.info(&format!("  {name:<36} - {description}"));
                }
            }
            return Err(e.context(format!("Failed to set '{key}'")));
        }

        // Only errors on the key being set block the write; a fresh file is
        // expected to be incomplete until every catalog key has been set.
        let key_errors: Vec<String> = config
            .validate()
            .into_iter()
            .filter(|e| e.field == key)
            .map(|e| e.message)
            .collect();

        if !key_errors.is_empty() {
            if options.is_json() {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "value": shown_value,
                    "errors": key_errors,
                }));
            } else {
                formatter.error(&format!(
                    "Invalid value for '{}': {}",
                    key,
                    key_errors.join("; ")
                ));
            }
            anyhow::bail!("Invalid value for '{}'", key);
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create configuration directory")?;
        }

        let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
        std::fs::write(config_path, &yaml).context("Failed to write configuration file")?;

        if options.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "key": key,
                "value": shown_value,
                "config_path": config_path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Set {} = {}", key, shown_value));
            formatter.info(&format!("Saved to {}", config_path.display()));
        }

        Ok(())
    }

    /// Validate configuration file
    fn execute_validate(&self, options: &GlobalOptions) -> Result<()> {
        let formatter = options.formatter();
        let config_path = &options.config_path;

        let config = match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                let message = if config_path.exists() {
                    format!("Failed to parse configuration: {e}")
                } else {
                    "Configuration file not found".to_string()
                };

                if options.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [message],
                    }));
                } else {
                    formatter.error(&message);
                    formatter.info(&format!("File: {}", config_path.display()));
                    if !config_path.exists() {
                        formatter.info(
                            "Run 'specsync config set <key> <value>' to create one.",
                        );
                    }
                }
                anyhow::bail!("Configuration is invalid");
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors = config.validate();

        if options.is_json() {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": error_strings,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", config_path.display()));
        } else {
            let count = errors.len() as u32;
            formatter.error(&format!(
                "Configuration has {} error{}:",
                count,
                plural(count)
            ));
            formatter.info(&format!("File: {}", config_path.display()));
            formatter.info("");
            for error in &errors {
                formatter.info(&format!("  {} - {}", error.field, error.message));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Configuration is invalid")
        }
    }
}

/// Replaces a configured password with a fixed mask
fn masked(mut config: Config) -> Config {
    if config.catalog.password.is_some() {
        config.catalog.password = Some(MASKED.to_string());
    }
    config
}

/// `None` for the values that clear an optional setting
fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Apply a dot-notation key/value pair to a Config struct
///
/// See [`SUPPORTED_KEYS`] for the accepted keys.
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        // --- catalog ---
        "catalog.base_url" => {
            config.catalog.base_url = value.to_string();
        }
        "catalog.project" => {
            config.catalog.project = value.to_string();
        }
        "catalog.username" => {
            config.catalog.username = value.to_string();
        }
        "catalog.password" => {
            config.catalog.password = optional(value);
        }

        // --- sync ---
        "sync.existing_test_case_option" => {
            config.sync.existing_test_case_option = value.parse()?;
        }
        "sync.test_case_template" => {
            config.sync.test_case_template = value.parse()?;
        }
        "sync.preserve_directory_structure" => {
            config.sync.preserve_directory_structure = value
                .parse::<bool>()
                .context("Expected true or false")?;
        }
        "sync.folder_creation_delay_ms" => {
            config.sync.folder_creation_delay_ms = value
                .parse::<u64>()
                .context("Expected a non-negative integer")?;
        }
        "sync.root_folder" => {
            config.sync.root_folder = optional(value);
        }
        "sync.feature_extension" => {
            config.sync.feature_extension = value.to_string();
        }

        // --- logging ---
        "logging.level" => {
            config.logging.level = value.to_string();
        }

        _ => {
            anyhow::bail!("Unknown configuration key: '{}'", key);
        }
    }

    Ok(())
}
