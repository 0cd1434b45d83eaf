//! Newtype wrappers for remote identifiers
//!
//! The remote catalog assigns numeric identifiers to folders and numeric or
//! textual identifiers to test cases. Wrapping them keeps a folder ID from
//! being passed where a test case ID is expected.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Server-assigned identifier of a remote folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(u64);

impl FolderId {
    /// Wrap a raw identifier
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for FolderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned identifier of a remote test case
///
/// Catalogs hand these out either as plain numbers (`12`) or as keys such as
/// `"TC-16"`; both are kept as text. The identifier is interpolated into
/// request paths, so only URL path-safe characters are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "WireTestCaseId", into = "String")]
pub struct TestCaseId(String);

impl TestCaseId {
    /// Create a new TestCaseId
    ///
    /// # Errors
    /// Returns error if the ID is empty or contains characters that are not
    /// safe in a URL path segment
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidRemoteId(
                "test case ID cannot be empty".to_string(),
            ));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | ':'))
        {
            return Err(DomainError::InvalidRemoteId(format!(
                "test case ID contains invalid characters: '{id}'"
            )));
        }

        Ok(Self(id))
    }
}

impl Display for TestCaseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifiers are always valid
impl From<u64> for TestCaseId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<TestCaseId> for String {
    fn from(id: TestCaseId) -> Self {
        id.0
    }
}

/// Test case identifier as it appears on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum WireTestCaseId {
    Number(u64),
    Text(String),
}

impl TryFrom<WireTestCaseId> for TestCaseId {
    type Error = DomainError;

    fn try_from(wire: WireTestCaseId) -> Result<Self, Self::Error> {
        match wire {
            WireTestCaseId::Number(id) => Ok(Self::from(id)),
            WireTestCaseId::Text(id) => Self::new(id),
        }
    }
}
