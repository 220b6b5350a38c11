use std::fmt;

use super::diagnostics::DiagnosticSink;
use super::error::GenerateError;
use super::expansion::Expansion;
use super::expr::Sequence;
use super::rule::{Rule, RuleKind};

/// Builder for constructing a [`Grammar`] in code.
///
/// # Example
///
/// ```
/// use ugen::{GrammarBuilder, rule_ref, strings};
///
/// let expansion = GrammarBuilder::new()
///     .entity("CITY", strings(["Prague", "Brno"]))
///     .intent("Fly", strings(["fly to"]).then(rule_ref("CITY")))
///     .generate(())
///     .unwrap();
///
/// assert_eq!(
///     expansion.texts_of("Fly"),
///     Some(vec!["fly to Prague", "fly to Brno"])
/// );
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    rules: Vec<Rule>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a plain rule.
    #[must_use]
    pub fn rule(self, id: &str, body: impl Into<Sequence>) -> Self {
        self.push(Rule::new(id, RuleKind::Default, body))
    }

    /// Define an entity rule; its expansions are reported as entity spans.
    #[must_use]
    pub fn entity(self, id: &str, body: impl Into<Sequence>) -> Self {
        self.push(Rule::new(id, RuleKind::Entity, body))
    }

    /// Define an intent rule, a generation root.
    #[must_use]
    pub fn intent(self, id: &str, body: impl Into<Sequence>) -> Self {
        self.push(Rule::new(id, RuleKind::Intent, body))
    }

    #[must_use]
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn build(self) -> Grammar {
        Grammar { rules: self.rules }
    }

    /// Validate and expand the rules.
    ///
    /// # Errors
    ///
    /// See [`Grammar::generate()`].
    pub fn generate(self, sink: impl DiagnosticSink) -> Result<Expansion, GenerateError> {
        self.build().generate(sink)
    }
}

/// An ordered set of rules, as authored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Validate the rules, then expand each into its complete string set.
    ///
    /// Validation diagnostics (duplicate ids, undefined references, cycles,
    /// unused rules) are reported to `sink` as they are found. Pass `()` to
    /// drop them.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Invalid`] if validation reported any error, in
    /// which case nothing is expanded, or [`GenerateError::Expand`] if an
    /// internal invariant broke during expansion.
    pub fn generate(&self, mut sink: impl DiagnosticSink) -> Result<Expansion, GenerateError> {
        let order = crate::resolve::resolve(&self.rules, &mut sink)?;
        let expansion = crate::expand::expand(&order)?;
        Ok(expansion)
    }

    /// Parse a DSL string into a `Grammar`.
    ///
    /// # Errors
    ///
    /// Returns [`UgenError`](crate::UgenError) on parse failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::UgenError> {
        Ok(Self::new(crate::parse::parse(input)?))
    }

    /// Read and parse a DSL file.
    ///
    /// # Errors
    ///
    /// Returns [`UgenError`](crate::UgenError) on I/O or parse failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::UgenError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_dsl(&input)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rule_ref, strings, CompileError, Diagnostics};

    #[test]
    fn builder_collects_rules_in_order() {
        let grammar = GrammarBuilder::new()
            .rule("greeting", strings(["hi"]))
            .entity("CITY", strings(["Prague"]))
            .intent("Fly", rule_ref("greeting").then(rule_ref("CITY")))
            .build();

        let kinds: Vec<(&str, RuleKind)> = grammar
            .rules()
            .iter()
            .map(|r| (r.id.as_str(), r.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("greeting", RuleKind::Default),
                ("CITY", RuleKind::Entity),
                ("Fly", RuleKind::Intent),
            ]
        );
    }

    #[test]
    fn duplicate_aborts_before_expansion() {
        let mut sink = Diagnostics::new();
        let result = GrammarBuilder::new()
            .intent("X", strings(["a"]))
            .intent("X", strings(["b"]))
            .generate(&mut sink);
        assert!(matches!(result, Err(GenerateError::Invalid { errors: 1 })));
        assert_eq!(
            sink.errors,
            vec![CompileError::DuplicateRule { name: "X".into() }]
        );
    }

    #[test]
    fn generate_without_sink_still_fails() {
        let result = GrammarBuilder::new()
            .intent("r", rule_ref("Z"))
            .generate(());
        assert!(matches!(result, Err(GenerateError::Invalid { .. })));
    }

    #[test]
    fn display_renders_every_rule() {
        let grammar = GrammarBuilder::new()
            .entity("CITY", strings(["Prague", "Brno"]))
            .intent("Fly", strings(["fly"]).then(rule_ref("CITY").optional()))
            .build();
        assert_eq!(
            grammar.to_string(),
            "entity CITY: [Prague, Brno];\nintent Fly: [fly], CITY?;\n"
        );
    }

    #[test]
    fn generate_is_repeatable() {
        let grammar = GrammarBuilder::new()
            .rule("w", strings(["a", "b"]))
            .intent("top", rule_ref("w").then(rule_ref("w")))
            .build();
        let first = grammar.generate(()).unwrap();
        let second = grammar.generate(()).unwrap();
        assert_eq!(first.texts_of("top"), second.texts_of("top"));
        assert_eq!(
            first.texts_of("top"),
            Some(vec!["a a", "a b", "b a", "b b"])
        );
    }
}
