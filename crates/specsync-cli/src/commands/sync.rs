//! Sync command - Synchronize feature files with the test catalog
//!
//! Provides the `specsync sync` CLI command which:
//! 1. Loads and validates the configuration, applying command-line overrides
//! 2. Creates the catalog HTTP adapter and the Gherkin parser
//! 3. Runs the SyncEngine over the given path and displays the report

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use specsync_catalog::{CatalogClient, HttpTestCatalog};
use specsync_core::config::{Config, ExistingTestCaseOption, SyncConfig, TestCaseTemplate};
use specsync_sync::{GherkinParser, SyncEngine};

use super::GlobalOptions;

/// Sync command with clap options
#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Feature file or directory to synchronize
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Template of created test cases (bdd, steps)
    #[arg(long)]
    pub template: Option<TestCaseTemplate>,

    /// Policy for test cases that already exist (skip, update, delete)
    #[arg(long)]
    pub existing: Option<ExistingTestCaseOption>,

    /// Mirror local directories as remote folders
    #[arg(long)]
    pub preserve_structure: bool,

    /// Milliseconds to wait after each folder creation
    #[arg(long)]
    pub folder_delay_ms: Option<u64>,

    /// Remote folder every synchronized document lands under
    #[arg(long)]
    pub root_folder: Option<String>,
}

impl SyncCommand {
    /// Execute the sync command
    ///
    /// Wires up the catalog adapter and parser, creates the SyncEngine,
    /// runs sync() and displays the results.
    pub async fn execute(&self, options: &GlobalOptions) -> Result<()> {
        let formatter = options.formatter();

        // Step 1: Load config
        let mut config = Config::load(&options.config_path).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                options.config_path.display()
            )
        })?;
        self.apply_overrides(&mut config.sync);

        info!(config_path = %options.config_path.display(), "Loaded configuration");

        // Step 2: Validate
        let errors = config.validate();
        if !errors.is_empty() {
            if options.is_json() {
                let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "errors": error_strings,
                }));
            } else {
                for error in &errors {
                    formatter.error(&error.to_string());
                }
            }
            anyhow::bail!("Configuration is invalid");
        }

        // Step 3: Create adapters
        let client =
            CatalogClient::from_config(&config.catalog).context("Failed to create catalog client")?;
        let catalog = Arc::new(HttpTestCatalog::new(client));
        let parser = Arc::new(GherkinParser::new());
        let engine = SyncEngine::new(catalog, parser, config.sync);

        // Step 4: Run sync
        formatter.info(&format!("Synchronizing {} ...", self.path.display()));

        let report = match engine.sync(&self.path).await {
            Ok(report) => report,
            Err(e) => {
                if options.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "success": false,
                        "path": self.path.display().to_string(),
                        "error": e.to_string(),
                    }));
                } else {
                    formatter.error(&format!("Sync failed: {e}"));
                }
                return Err(e).context("Sync aborted");
            }
        };

        // Step 5: Display results
        formatter.sync_report(&self.path, &report);

        Ok(())
    }

    /// Applies command-line flags on top of the file configuration
    fn apply_overrides(&self, sync: &mut SyncConfig) {
        if let Some(template) = self.template {
            sync.test_case_template = template;
        }
        if let Some(existing) = self.existing {
            sync.existing_test_case_option = existing;
        }
        if self.preserve_structure {
            sync.preserve_directory_structure = true;
        }
        if let Some(delay) = self.folder_delay_ms {
            sync.folder_creation_delay_ms = delay;
        }
        if let Some(root) = &self.root_folder {
            sync.root_folder = Some(root.clone());
        }
    }
}
