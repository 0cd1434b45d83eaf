//! Parsed specification documents
//!
//! A [`Document`] is produced once per local feature file by the document
//! parser adapter and consumed immediately by the sync engine. Nothing in
//! this module is persisted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a step came from within its feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Shared precondition step from a `Background:` block
    Background,
    /// Step belonging to the scenario itself
    Scenario,
}

/// A single Given/When/Then step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step keyword as written (e.g. "Given", "And")
    pub keyword: String,
    /// Step text following the keyword
    pub text: String,
    /// Whether the step is a background step or a scenario step
    pub kind: StepKind,
}

impl Step {
    /// Creates a scenario step
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            kind: StepKind::Scenario,
        }
    }

    /// Creates a background step
    pub fn background(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            kind: StepKind::Background,
        }
    }

    /// Returns true if this step came from a background block
    pub fn is_background(&self) -> bool {
        self.kind == StepKind::Background
    }

    /// Renders the step as `"{keyword} {text}"`
    pub fn line(&self) -> String {
        format!("{} {}", self.keyword, self.text)
    }
}

/// A named sequence of steps describing one test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name, used verbatim as the remote test case title
    pub name: String,
    /// Ordered steps, background steps first
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Background text: every background step rendered on its own line
    ///
    /// Empty when the scenario has no background steps.
    pub fn background_text(&self) -> String {
        self.steps
            .iter()
            .filter(|s| s.is_background())
            .map(Step::line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Steps that belong to the scenario itself, in order
    pub fn scenario_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| !s.is_background())
    }
}

/// A parsed feature file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Feature name
    pub name: String,
    /// Source path (document identity)
    pub path: PathBuf,
    /// Scenarios in file order
    pub scenarios: Vec<Scenario>,
}

impl Document {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, scenarios: Vec<Scenario>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            scenarios,
        }
    }

    /// Source path of the document
    pub fn path(&self) -> &Path {
        &self.path
    }
}
