use thiserror::Error;

/// Validation errors in an authored rule set. Any of these stops the run
/// before expansion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("duplicate rule identifier '{name}'")]
    DuplicateRule { name: String },

    #[error("undefined rule reference '{reference}' in rule '{rule}'")]
    UndefinedRuleRef { rule: String, reference: String },

    #[error("circular dependency detected for rule(s): '{}'", rules.join(","))]
    CyclicDependency { rules: Vec<String> },
}

/// Validation findings that do not block expansion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileWarning {
    #[error("rule '{name}' is not referenced by any rule; remove it or mark it as intent")]
    UnusedRule { name: String },
}

/// Broken internal preconditions hit while expanding or decoding. Well-formed
/// input that passed validation never produces these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    #[error("rule '{reference}' was referenced before it was expanded")]
    UncachedRule { reference: String },

    #[error("rule '{rule}' contains an empty expression")]
    EmptyExpression { rule: String },

    #[error("malformed entity markup at {position}: expected '['")]
    MissingNameOpen { position: usize },

    #[error("malformed entity markup at {position}: expected ']'")]
    MissingNameClose { position: usize },

    #[error("malformed entity markup: entity '{entity}' has no end marker")]
    MissingEntityEnd { entity: String },
}

/// Outcome of a failed [`GrammarBuilder::generate()`](super::GrammarBuilder::generate).
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("rule set is invalid ({errors} error(s) reported)")]
    Invalid { errors: usize },

    #[error(transparent)]
    Expand(#[from] ExpandError),
}
