mod diagnostics;
mod error;
mod expansion;
mod expr;
mod grammar;
mod rule;
mod utterance;

pub use diagnostics::{Callbacks, DiagnosticSink, Diagnostics, TracingSink};
pub use error::{CompileError, CompileWarning, ExpandError, GenerateError};
pub use expansion::{ExpandedRule, Expansion};
pub use expr::{Alternation, Sequence, Term, TermKind, group, rule_ref, strings};
pub use grammar::{Grammar, GrammarBuilder};
pub use rule::{Rule, RuleKind};
pub use utterance::{Entity, Utterance};
