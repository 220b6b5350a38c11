//! Presentation of an [`Expansion`]: a plain text listing and a JSON batch
//! of labelled test cases.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Expansion, RuleKind};

/// One labelled utterance of an intent rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub text: String,
    pub intent: String,
    pub entities: Vec<TestCaseEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseEntity {
    pub entity: String,
    pub start_pos: usize,
    pub end_pos: usize,
}

/// Collect a [`TestCase`] for every utterance of every intent rule, in
/// expansion order.
#[must_use]
pub fn test_cases(expansion: &Expansion) -> Vec<TestCase> {
    expansion
        .iter()
        .filter(|rule| rule.kind() == RuleKind::Intent)
        .flat_map(|rule| {
            rule.utterances().iter().map(move |utterance| TestCase {
                text: utterance.text.clone(),
                intent: rule.id().to_owned(),
                entities: utterance
                    .entities
                    .iter()
                    .map(|e| TestCaseEntity {
                        entity: e.name.clone(),
                        start_pos: e.start,
                        end_pos: e.end,
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Serialize the test cases of `expansion` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns the serializer error, which does not occur for these types in
/// practice.
pub fn render_test_cases(expansion: &Expansion) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&test_cases(expansion))
}

/// Render every rule and its texts.
///
/// With a non-empty `only` set, rules outside it are listed as skipped.
#[must_use]
pub fn render_listing(expansion: &Expansion, only: Option<&HashSet<String>>) -> String {
    Listing {
        expansion,
        only: only.filter(|set| !set.is_empty()),
    }
    .to_string()
}

struct Listing<'a> {
    expansion: &'a Expansion,
    only: Option<&'a HashSet<String>>,
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.expansion {
            if self.only.is_some_and(|set| !set.contains(rule.id())) {
                writeln!(f, "Rule '{}' - Print Skipped", rule.id())?;
                continue;
            }

            match rule.kind() {
                RuleKind::Default => writeln!(f, "Rule '{}':", rule.id())?,
                kind => writeln!(f, "Rule '{}' ({kind}):", rule.id())?,
            }
            for text in rule.texts() {
                writeln!(f, "  {text}")?;
            }
        }
        Ok(())
    }
}

/// Split rule-name arguments on spaces, commas and semicolons.
#[must_use]
pub fn parse_rule_filter<S: AsRef<str>>(args: &[S]) -> HashSet<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split([' ', ',', ';']))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
