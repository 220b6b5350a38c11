mod error;
mod expand;
mod graph;
mod markup;
pub mod output;
pub mod parse;
mod resolve;
mod types;

pub use error::UgenError;
pub use markup::{ENTITY_END, ENTITY_START, decode_entities, is_sentinel, wrap_entity};
pub use types::{
    Alternation, Callbacks, CompileError, CompileWarning, DiagnosticSink, Diagnostics, Entity,
    ExpandError, ExpandedRule, Expansion, GenerateError, Grammar, GrammarBuilder, Rule, RuleKind,
    Sequence, Term, TermKind, TracingSink, Utterance, group, rule_ref, strings,
};
