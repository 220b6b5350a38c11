//! Entity span markup.
//!
//! Expansions of entity rules are wrapped as `START [name] text END`, where
//! START and END are two reserved control characters that never appear in
//! authored literals. Wrapped strings nest freely; [`decode_entities`]
//! strips all markup and reports each span with offsets into the final
//! plain text.

use crate::{Entity, ExpandError, Utterance};

/// Opens an entity span (ASCII record separator).
pub const ENTITY_START: char = '\u{1E}';
/// Closes an entity span (ASCII unit separator).
pub const ENTITY_END: char = '\u{1F}';

/// Returns `true` for the two reserved markup characters.
#[must_use]
pub fn is_sentinel(c: char) -> bool {
    c == ENTITY_START || c == ENTITY_END
}

/// Wrap `text` in span markup for the entity `name`.
#[must_use]
pub fn wrap_entity(name: &str, text: &str) -> String {
    format!("{ENTITY_START}[{name}]{text}{ENTITY_END}")
}

/// Strip all span markup from `marked`, returning the plain text and the
/// recovered entities.
///
/// Spans are listed in the order they are closed: a nested span precedes
/// the span that encloses it, and a later sibling precedes an earlier one.
///
/// # Errors
///
/// Returns an [`ExpandError`] if the markup is malformed (missing `[`, `]`
/// or end marker). Strings built by the expander never are.
pub fn decode_entities(marked: &str) -> Result<Utterance, ExpandError> {
    if !marked.contains(ENTITY_START) {
        return Ok(Utterance::plain(marked));
    }

    let mut chars: Vec<char> = marked.chars().collect();
    let mut entities = Vec::new();
    extract(&mut chars, 0, &mut entities)?;

    Ok(Utterance {
        text: chars.into_iter().collect(),
        entities,
    })
}

fn extract(
    chars: &mut Vec<char>,
    cursor: usize,
    entities: &mut Vec<Entity>,
) -> Result<(), ExpandError> {
    let Some(start) = find(chars, cursor, ENTITY_START) else {
        return Ok(());
    };

    if chars.get(start + 1) != Some(&'[') {
        return Err(ExpandError::MissingNameOpen { position: start });
    }
    let close =
        find(chars, start + 2, ']').ok_or(ExpandError::MissingNameClose { position: start })?;
    let name: String = chars[start + 2..close].iter().collect();
    chars.drain(start..=close);

    // Everything opened after this span's start, nested or not, is resolved
    // first, so the next END at or after `start` is this span's own.
    extract(chars, start, entities)?;

    let end = find(chars, start, ENTITY_END).ok_or_else(|| ExpandError::MissingEntityEnd {
        entity: name.clone(),
    })?;
    let text: String = chars[start..end].iter().collect();
    chars.remove(end);

    // ENDs still to the left belong to enclosing or earlier spans that the
    // callers further up have not closed yet.
    let pending = chars[..start].iter().filter(|c| **c == ENTITY_END).count();

    entities.push(Entity {
        name,
        text,
        start: start - pending,
        end: end - pending,
    });
    Ok(())
}

fn find(chars: &[char], from: usize, target: char) -> Option<usize> {
    chars
        .get(from..)?
        .iter()
        .position(|c| *c == target)
        .map(|i| i + from)
}
