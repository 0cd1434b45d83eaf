//! Gherkin document parser
//!
//! Implements [`IDocumentParser`] on top of the `gherkin` crate. Background
//! steps of the feature (and of the enclosing rule) are prepended to every
//! scenario and tagged [`StepKind::Background`](specsync_core::domain::StepKind).

use std::path::Path;

use anyhow::{Context, Result};
use gherkin::GherkinEnv;
use tracing::{debug, instrument};

use specsync_core::domain::{Document, Scenario, Step};
use specsync_core::ports::IDocumentParser;

/// Parser for `.feature` files
#[derive(Debug, Default, Clone, Copy)]
pub struct GherkinParser;

impl GherkinParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses feature text read from `path`
    ///
    /// Text made only of blank lines and comments yields `Ok(None)`.
    pub fn parse_str(&self, content: &str, path: &Path) -> Result<Option<Document>> {
        if !has_content(content) {
            return Ok(None);
        }

        let feature = gherkin::Feature::parse(content, GherkinEnv::default())
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid Gherkin in {}", path.display()))?;

        let feature_background = background_steps(feature.background.as_ref());
        let mut scenarios: Vec<Scenario> = feature
            .scenarios
            .iter()
            .map(|s| convert_scenario(s, &feature_background))
            .collect();

        for rule in &feature.rules {
            let mut background = feature_background.clone();
            background.extend(background_steps(rule.background.as_ref()));
            scenarios.extend(rule.scenarios.iter().map(|s| convert_scenario(s, &background)));
        }

        debug!(
            feature = %feature.name,
            scenarios = scenarios.len(),
            "Parsed feature"
        );
        Ok(Some(Document::new(feature.name.trim(), path, scenarios)))
    }
}

impl IDocumentParser for GherkinParser {
    #[instrument(skip(self, path), fields(path = %path.display()))]
    fn parse(&self, path: &Path) -> Result<Option<Document>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.parse_str(&content, path)
    }
}

/// Whether any line is neither blank nor a comment
fn has_content(content: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}

fn background_steps(background: Option<&gherkin::Background>) -> Vec<Step> {
    background
        .map(|b| {
            b.steps
                .iter()
                .map(|s| Step::background(s.keyword.trim(), s.value.trim()))
                .collect()
        })
        .unwrap_or_default()
}

fn convert_scenario(scenario: &gherkin::Scenario, background: &[Step]) -> Scenario {
    let steps = background
        .iter()
        .cloned()
        .chain(
            scenario
                .steps
                .iter()
                .map(|s| Step::new(s.keyword.trim(), s.value.trim())),
        )
        .collect();
    Scenario::new(scenario.name.trim(), steps)
}
