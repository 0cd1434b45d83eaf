//! Test case payload builder
//!
//! Converts a parsed scenario into one of the two remote test case shapes:
//! a structured step table or a BDD narrative. The builder captures
//! everything it needs up front so the resolver can produce a payload
//! lazily, only once it knows whether a create or an update is due.

use serde::Serialize;

use super::catalog::TemplateTag;
use super::document::{Scenario, Step};
use super::newtypes::FolderId;
use crate::config::TestCaseTemplate;

/// Indent placed before every line of a BDD narrative
const BDD_LINE_INDENT: &str = "  ";

/// Prefix added to non-empty background text in the BDD shape
const BDD_BACKGROUND_PREFIX: &str = "Background: ";

/// One row of the step table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepEntry {
    pub step: String,
    pub result: String,
}

/// Template-specific part of a test case payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PayloadBody {
    /// Step table; preconditions carry the background verbatim, even when empty
    Steps {
        preconditions: String,
        steps: Vec<StepEntry>,
    },
    /// Narrative; preconditions are absent (not empty) without a background
    Bdd {
        #[serde(skip_serializing_if = "Option::is_none")]
        preconditions: Option<String>,
        bdd_scenario: String,
    },
}

/// Payload sent to create, recreate or update a remote test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCasePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
    pub title: String,
    pub description: String,
    pub template: TemplateTag,
    #[serde(flatten)]
    pub body: PayloadBody,
}

/// Deferred payload construction for a single scenario
///
/// Two entry points exist on purpose: [`for_folder`](Self::for_folder) is
/// used when a test case is created (or recreated) inside a folder, and
/// [`for_update`](Self::for_update) when an existing one is patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadBuilder {
    scenario_name: String,
    feature_name: String,
    background: String,
    steps: Vec<Step>,
    template: TestCaseTemplate,
}

impl PayloadBuilder {
    /// Captures a scenario, its feature name and its background text
    pub fn new(
        scenario: &Scenario,
        feature_name: impl Into<String>,
        background: impl Into<String>,
        template: TestCaseTemplate,
    ) -> Self {
        Self {
            scenario_name: scenario.name.clone(),
            feature_name: feature_name.into(),
            background: background.into(),
            steps: scenario.scenario_steps().cloned().collect(),
            template,
        }
    }

    /// Payload for creating the test case inside `folder_id`
    pub fn for_folder(&self, folder_id: FolderId) -> TestCasePayload {
        self.build(Some(folder_id))
    }

    /// Payload for patching an existing test case
    pub fn for_update(&self) -> TestCasePayload {
        self.build(None)
    }

    fn build(&self, folder_id: Option<FolderId>) -> TestCasePayload {
        let body = match self.template {
            TestCaseTemplate::Steps => PayloadBody::Steps {
                preconditions: self.background.clone(),
                steps: self
                    .steps
                    .iter()
                    .map(|s| StepEntry {
                        step: s.line(),
                        result: String::new(),
                    })
                    .collect(),
            },
            TestCaseTemplate::Bdd => PayloadBody::Bdd {
                preconditions: (!self.background.is_empty())
                    .then(|| format!("{BDD_BACKGROUND_PREFIX}{}", self.background)),
                bdd_scenario: self
                    .steps
                    .iter()
                    .map(|s| format!("{BDD_LINE_INDENT}{}", s.line()))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
        };

        TestCasePayload {
            folder_id,
            title: self.scenario_name.clone(),
            description: format!(
                "<p>Feature: {}<br>Scenario: {}</p>",
                escape_html(&self.feature_name),
                escape_html(&self.scenario_name)
            ),
            template: self.template.tag(),
            body,
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
