//! Feature tree synchronization engine
//!
//! The [`SyncEngine`] walks a local tree of feature files and reconciles it
//! with the remote catalog, one remote call at a time.
//!
//! ## Sync Flow
//!
//! 1. **Root folder**: ensure the configured root folder, if any
//! 2. **Walk**: visit directory entries depth-first in listing order
//! 3. **Directories**: in structure-preserving mode, ensure a folder named
//!    after the directory and recurse under it; otherwise recurse with the
//!    same parent
//! 4. **Documents**: parse, ensure a folder named after the file stem, then
//!    resolve one test case per scenario
//!
//! The first unrecovered failure aborts the run. Folders and test cases
//! created before the failure are kept.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use specsync_core::config::SyncConfig;
use specsync_core::domain::{FolderId, PayloadBuilder, SyncError};
use specsync_core::ports::{IDocumentParser, ITestCatalog};
use specsync_core::usecases::{FolderResolver, ResolvedFolder, TestCaseOutcome, TestCaseResolver};

// ============================================================================
// SyncReport
// ============================================================================

/// Summary of a completed synchronization run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Feature files synchronized
    pub documents: u32,
    /// Feature files that contained no feature
    pub documents_skipped: u32,
    pub folders_created: u32,
    pub folders_reused: u32,
    pub test_cases_created: u32,
    pub test_cases_updated: u32,
    pub test_cases_recreated: u32,
    pub test_cases_skipped: u32,
    /// Updates refused because the remote template differs
    pub template_mismatches: u32,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

impl SyncReport {
    /// Counts a folder resolution
    pub fn record_folder(&mut self, folder: &ResolvedFolder) {
        if folder.created {
            self.folders_created += 1;
        } else {
            self.folders_reused += 1;
        }
    }

    /// Counts a test case outcome
    pub fn record(&mut self, outcome: &TestCaseOutcome) {
        match outcome {
            TestCaseOutcome::Created(_) => self.test_cases_created += 1,
            TestCaseOutcome::Skipped(_) => self.test_cases_skipped += 1,
            TestCaseOutcome::Updated(_) => self.test_cases_updated += 1,
            TestCaseOutcome::Recreated { .. } => self.test_cases_recreated += 1,
            TestCaseOutcome::TemplateMismatch { .. } => self.template_mismatches += 1,
        }
    }

    /// Total test cases touched or inspected
    pub fn test_cases_total(&self) -> u32 {
        self.test_cases_created
            + self.test_cases_updated
            + self.test_cases_recreated
            + self.test_cases_skipped
            + self.template_mismatches
    }
}

// ============================================================================
// SyncEngine
// ============================================================================

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SyncError>> + Send + 'a>>;

/// Tree walker reconciling local feature files with the remote catalog
pub struct SyncEngine {
    parser: Arc<dyn IDocumentParser + Send + Sync>,
    folders: FolderResolver,
    test_cases: TestCaseResolver,
    config: SyncConfig,
}

impl SyncEngine {
    /// Creates a new SyncEngine
    ///
    /// # Arguments
    /// * `catalog` - Remote catalog port
    /// * `parser` - Document parser port
    /// * `config` - Reconciliation policy, read-only for the whole run
    pub fn new(
        catalog: Arc<dyn ITestCatalog + Send + Sync>,
        parser: Arc<dyn IDocumentParser + Send + Sync>,
        config: SyncConfig,
    ) -> Self {
        let folders = FolderResolver::new(catalog.clone(), config.folder_creation_delay());
        let test_cases = TestCaseResolver::from_config(catalog, &config);
        Self {
            parser,
            folders,
            test_cases,
            config,
        }
    }

    /// Synchronizes the tree (or single feature file) at `root`
    ///
    /// # Returns
    /// A [`SyncReport`] summarizing the run
    ///
    /// # Errors
    /// Returns the first failure encountered; earlier remote changes stay in place
    #[tracing::instrument(skip(self, root), fields(root = %root.display()))]
    pub async fn sync(&self, root: &Path) -> Result<SyncReport, SyncError> {
        let start = Instant::now();
        let mut report = SyncReport::default();

        info!(
            option = %self.config.existing_test_case_option,
            template = %self.config.test_case_template,
            preserve_structure = self.config.preserve_directory_structure,
            "Starting sync"
        );

        let metadata = tokio::fs::metadata(root).await.map_err(|e| {
            error!(path = %root.display(), error = %e, "Cannot access sync root");
            SyncError::Io(e)
        })?;

        let parent = match self.config.root_folder.as_deref() {
            Some(name) => {
                let folder = self.folders.ensure_folder(name, None).await?;
                report.record_folder(&folder);
                Some(folder.id)
            }
            None => None,
        };

        if metadata.is_dir() {
            self.walk_directory(root, parent, &mut report).await?;
        } else {
            self.sync_document(root, parent, &mut report).await?;
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            documents = report.documents,
            folders_created = report.folders_created,
            test_cases_created = report.test_cases_created,
            test_cases_updated = report.test_cases_updated,
            test_cases_recreated = report.test_cases_recreated,
            test_cases_skipped = report.test_cases_skipped,
            template_mismatches = report.template_mismatches,
            duration_ms = report.duration_ms,
            "Sync completed"
        );

        Ok(report)
    }

    /// Recursively walks `dir`, carrying the remote parent folder
    fn walk_directory<'a>(
        &'a self,
        dir: &'a Path,
        parent: Option<FolderId>,
        report: &'a mut SyncReport,
    ) -> WalkFuture<'a> {
        Box::pin(async move {
            let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
                error!(path = %dir.display(), error = %e, "Failed to read directory");
                SyncError::Io(e)
            })?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;

                if file_type.is_dir() {
                    let child_parent = if self.config.preserve_directory_structure {
                        let name = entry.file_name().to_string_lossy().into_owned();
                        let folder = self.folders.ensure_folder(&name, parent.as_ref()).await?;
                        report.record_folder(&folder);
                        Some(folder.id)
                    } else {
                        parent
                    };
                    self.walk_directory(&path, child_parent, report).await?;
                } else if file_type.is_file() {
                    if self.is_feature_file(&path) {
                        self.sync_document(&path, parent, report).await?;
                    }
                } else {
                    debug!(path = %path.display(), "Skipping non-regular entry");
                }
            }

            Ok(())
        })
    }

    /// Parses one feature file and reconciles each of its scenarios
    async fn sync_document(
        &self,
        path: &Path,
        parent: Option<FolderId>,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let document = match self.parser.parse(path) {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!(path = %path.display(), "No feature in file, skipping");
                report.documents_skipped += 1;
                return Ok(());
            }
            Err(e) => {
                error!(path = %path.display(), error = %format!("{e:#}"), "Failed to parse document");
                return Err(SyncError::Parse {
                    path: path.to_path_buf(),
                    reason: format!("{e:#}"),
                });
            }
        };

        let folder_name = document_folder_name(path).ok_or_else(|| SyncError::Parse {
            path: path.to_path_buf(),
            reason: "file has no name".to_string(),
        })?;

        if document.scenarios.is_empty() {
            warn!(path = %path.display(), "Feature has no scenarios");
        }

        let folder = self
            .folders
            .ensure_folder(&folder_name, parent.as_ref())
            .await
            .map_err(|e| {
                error!(path = %path.display(), error = %e, "Document aborted");
                e
            })?;
        report.record_folder(&folder);

        for scenario in &document.scenarios {
            let builder = PayloadBuilder::new(
                scenario,
                &document.name,
                scenario.background_text(),
                self.config.test_case_template,
            );
            let outcome = self
                .test_cases
                .resolve(&folder.id, &scenario.name, &builder)
                .await
                .map_err(|e| {
                    error!(
                        path = %path.display(),
                        scenario = %scenario.name,
                        error = %e,
                        "Document aborted"
                    );
                    e
                })?;
            report.record(&outcome);
        }

        report.documents += 1;
        info!(
            path = %path.display(),
            folder = %folder.id,
            scenarios = document.scenarios.len(),
            "Document synchronized"
        );
        Ok(())
    }

    fn is_feature_file(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.config.feature_extension.as_str())
    }
}

/// Remote folder name for a document: the file name without its extension
fn document_folder_name(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}
