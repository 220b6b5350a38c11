use crate::markup::{decode_entities, wrap_entity};
use crate::{
    Alternation, ExpandError, ExpandedRule, Expansion, Rule, RuleKind, Sequence, Term, TermKind,
};

/// Expand every rule in `order`, which must list each rule after all rules
/// it references.
pub(crate) fn expand(order: &[&Rule]) -> Result<Expansion, ExpandError> {
    let mut expansion = Expansion::with_capacity(order.len());

    for rule in order {
        tracing::debug!(rule = %rule.id, "producing rule");
        let produced = expand_rule(rule, &expansion)?;
        let expanded = clean(rule, produced)?;
        tracing::trace!(
            rule = %rule.id,
            utterances = expanded.utterances.len(),
            "rule expanded"
        );
        expansion.insert(expanded);
    }

    Ok(expansion)
}

/// A partially folded string set and whether it may be left out entirely.
#[derive(Debug)]
struct Fold {
    strings: Vec<String>,
    optional: bool,
}

fn expand_rule(rule: &Rule, cache: &Expansion) -> Result<Vec<String>, ExpandError> {
    let mut strings = expand_sequence(&rule.body, rule, cache)?;
    if rule.kind == RuleKind::Entity {
        for s in &mut strings {
            *s = wrap_entity(&rule.id, s);
        }
    }
    Ok(strings)
}

fn expand_sequence(
    sequence: &Sequence,
    rule: &Rule,
    cache: &Expansion,
) -> Result<Vec<String>, ExpandError> {
    let mut groups = sequence.groups.iter();
    let first = groups.next().ok_or_else(|| ExpandError::EmptyExpression {
        rule: rule.id.clone(),
    })?;

    let mut acc = expand_alternation(first, rule, cache)?;
    for group in groups {
        let next = expand_alternation(group, rule, cache)?;
        acc = cross(acc, next);
    }
    Ok(acc.strings)
}

/// A lone term keeps its optional marker; a real alternation never does.
fn expand_alternation(
    alternation: &Alternation,
    rule: &Rule,
    cache: &Expansion,
) -> Result<Fold, ExpandError> {
    let mut terms = alternation.terms.iter();
    let first = terms.next().ok_or_else(|| ExpandError::EmptyExpression {
        rule: rule.id.clone(),
    })?;

    let mut acc = Fold {
        strings: expand_term(first, rule, cache)?,
        optional: first.optional,
    };
    for term in terms {
        let next = expand_term(term, rule, cache)?;
        acc = union(acc, next);
    }
    Ok(acc)
}

fn expand_term(term: &Term, rule: &Rule, cache: &Expansion) -> Result<Vec<String>, ExpandError> {
    match &term.kind {
        TermKind::Strings(items) => Ok(items.clone()),
        TermKind::Reference(id) => cache
            .get(id)
            .map(|expanded| expanded.marked.clone())
            .ok_or_else(|| ExpandError::UncachedRule {
                reference: id.clone(),
            }),
        TermKind::Group(inner) => expand_sequence(inner, rule, cache),
    }
}

fn union(left: Fold, right: Vec<String>) -> Fold {
    let mut strings = left.strings;
    strings.extend(right);
    Fold {
        strings,
        optional: false,
    }
}

/// Every `l r` pair, then the right side alone if the left may be absent,
/// then the left side alone if the right may be absent, then the empty
/// string if both may be.
fn cross(left: Fold, right: Fold) -> Fold {
    let mut strings = Vec::with_capacity(
        left.strings.len() * right.strings.len() + left.strings.len() + right.strings.len() + 1,
    );

    for l in &left.strings {
        for r in &right.strings {
            strings.push(format!("{l} {r}"));
        }
    }
    if left.optional {
        strings.extend(right.strings.iter().cloned());
    }
    if right.optional {
        strings.extend(left.strings.iter().cloned());
    }
    if left.optional && right.optional {
        strings.push(String::new());
    }

    Fold {
        strings,
        optional: false,
    }
}

/// Trim, drop blanks, and decode entity markup into the final utterances.
fn clean(rule: &Rule, produced: Vec<String>) -> Result<ExpandedRule, ExpandError> {
    let mut marked = Vec::with_capacity(produced.len());
    let mut utterances = Vec::with_capacity(produced.len());

    for s in produced {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            continue;
        }
        utterances.push(decode_entities(trimmed)?);
        marked.push(trimmed.to_owned());
    }

    Ok(ExpandedRule {
        rule: rule.clone(),
        marked,
        utterances,
    })
}
