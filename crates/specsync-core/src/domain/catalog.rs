//! Remote catalog entities
//!
//! Folders and test cases as the remote test-management catalog reports
//! them. The server does not enforce unique folder names per parent nor
//! unique test case titles per folder; the use cases enforce both by
//! searching before creating.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::newtypes::{FolderId, TestCaseId};

/// A folder in the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFolder {
    pub id: FolderId,
    pub name: String,
    /// Parent folder (`None` for top-level folders)
    pub parent_id: Option<FolderId>,
}

/// Template tag stored on a remote test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateTag {
    /// Structured step table
    Steps,
    /// BDD narrative
    Bdd,
    /// Any tag this tool does not produce
    #[serde(other)]
    Other,
}

impl Display for TemplateTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TemplateTag::Steps => write!(f, "steps"),
            TemplateTag::Bdd => write!(f, "bdd"),
            TemplateTag::Other => write!(f, "other"),
        }
    }
}

/// A test case in the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTestCase {
    pub id: TestCaseId,
    pub title: String,
    pub template: TemplateTag,
    pub folder_id: FolderId,
}

/// Body of a folder creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFolder {
    pub name: String,
    pub description: String,
    pub parent_id: Option<FolderId>,
}

impl NewFolder {
    pub fn new(name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        let name = name.into();
        Self {
            description: format!("Synchronized from {name}"),
            name,
            parent_id,
        }
    }
}
