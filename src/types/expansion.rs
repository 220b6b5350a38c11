use std::collections::HashMap;
use std::fmt;

use super::rule::{Rule, RuleKind};
use super::utterance::Utterance;

/// The generated product of a single rule.
#[derive(Debug, Clone)]
pub struct ExpandedRule {
    pub(crate) rule: Rule,
    /// Trimmed strings that still carry entity markup. Rules referencing this
    /// one expand from these so spans nest across levels.
    pub(crate) marked: Vec<String>,
    pub(crate) utterances: Vec<Utterance>,
}

impl ExpandedRule {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.rule.id
    }

    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.rule.kind
    }

    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Markup-carrying strings as consumed by referencing rules.
    #[must_use]
    pub fn marked(&self) -> &[String] {
        &self.marked
    }

    /// Final utterances with their entity spans.
    #[must_use]
    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    /// Plain texts of the final utterances.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.utterances.iter().map(|u| u.text.as_str())
    }
}

/// All expanded rules of a successful run, in expansion order.
///
/// Entries are written once each, in dependency order, and never change
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    rules: Vec<ExpandedRule>,
    indices: HashMap<String, usize>,
}

impl Expansion {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, expanded: ExpandedRule) {
        self.indices
            .insert(expanded.rule.id.clone(), self.rules.len());
        self.rules.push(expanded);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExpandedRule> {
        self.indices.get(id).map(|&idx| &self.rules[idx])
    }

    #[must_use]
    pub fn rules(&self) -> &[ExpandedRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpandedRule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule ids in the order they were expanded.
    ///
    /// Every rule appears after all rules it references.
    #[must_use]
    pub fn expansion_order(&self) -> Vec<&str> {
        self.rules.iter().map(ExpandedRule::id).collect()
    }

    /// Plain texts produced by `id`, or `None` if no such rule was expanded.
    #[must_use]
    pub fn texts_of(&self, id: &str) -> Option<Vec<&str>> {
        self.get(id).map(|r| r.texts().collect())
    }
}

impl<'a> IntoIterator for &'a Expansion {
    type Item = &'a ExpandedRule;
    type IntoIter = std::slice::Iter<'a, ExpandedRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let utterances: usize = self.rules.iter().map(|r| r.utterances.len()).sum();
        write!(
            f,
            "Expansion({} rules, {} utterances)",
            self.rules.len(),
            utterances
        )
    }
}
