//! Front end for the rules language.
//!
//! ```text
//! entity CITY: [Prague, Brno];
//! intent Fly: [fly]?, ([to], CITY) | [home];
//! ```

mod error;
mod grammar;

pub use error::ParseError;

use crate::Rule;

/// Parse DSL source into its rules, in authored order.
///
/// # Errors
///
/// Returns [`ParseError`] with the line and column of the first syntax error.
pub fn parse(input: &str) -> Result<Vec<Rule>, ParseError> {
    use winnow::Parser;
    grammar::parse_grammar.parse(input).map_err(|e| {
        let (line, column) = line_column(input, e.offset());
        ParseError::new(e.to_string(), line, column)
    })
}

/// 1-based line and column (in chars) of a byte offset.
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let before = input.get(..offset).unwrap_or(input);
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |last| last.chars().count())
        + 1;
    (line, column)
}
