use std::fmt;

use super::expr::Sequence;

/// The role a rule plays in generation.
///
/// `Entity` rules have every expansion wrapped in span markup so the text
/// they contribute can be recovered as an [`Entity`](super::Entity) later.
/// `Intent` rules are generation roots and are never reported as unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleKind {
    #[default]
    Default,
    Entity,
    Intent,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Default => write!(f, "Default"),
            RuleKind::Entity => write!(f, "Entity"),
            RuleKind::Intent => write!(f, "Intent"),
        }
    }
}

/// A named pattern definition.
///
/// Rules are created via [`GrammarBuilder`](super::GrammarBuilder) or by
/// parsing a DSL string with [`Grammar::from_dsl()`](super::Grammar::from_dsl).
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: String,
    pub kind: RuleKind,
    pub body: Sequence,
}

impl Rule {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: RuleKind, body: impl Into<Sequence>) -> Self {
        Self {
            id: id.into(),
            kind,
            body: body.into(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RuleKind::Default => write!(f, "{}: {};", self.id, self.body),
            RuleKind::Entity => write!(f, "entity {}: {};", self.id, self.body),
            RuleKind::Intent => write!(f, "intent {}: {};", self.id, self.body),
        }
    }
}
