use std::collections::{HashMap, HashSet};

use crate::graph::topological_sort;
use crate::{
    CompileError, CompileWarning, DiagnosticSink, GenerateError, Rule, RuleKind, Sequence,
    TermKind,
};

/// Validate the rule set and return its rules in expansion order.
///
/// Every rule appears after all rules it references. Rules that take part in
/// no reference at all come last, in authored order. All diagnostics of the
/// failing phase are reported to `sink` before `GenerateError::Invalid` is
/// returned.
pub(crate) fn resolve<'a>(
    rules: &'a [Rule],
    sink: &mut impl DiagnosticSink,
) -> Result<Vec<&'a Rule>, GenerateError> {
    let rule_map = check_ids(rules, sink)?;

    let order = dependency_order(rules, sink)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut expansion = Vec::with_capacity(rule_map.len());
    for id in order {
        if seen.insert(id) {
            if let Some(rule) = rule_map.get(id) {
                expansion.push(*rule);
            }
        }
    }
    for rule in rules {
        if seen.insert(rule.id.as_str()) {
            expansion.push(rule);
        }
    }

    tracing::debug!(
        order = ?expansion.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        "resolved expansion order"
    );

    Ok(expansion)
}

/// Duplicate, missing-reference and unused-rule checks.
fn check_ids<'a>(
    rules: &'a [Rule],
    sink: &mut impl DiagnosticSink,
) -> Result<HashMap<&'a str, &'a Rule>, GenerateError> {
    let mut errors = 0;

    let mut rule_map: HashMap<&str, &Rule> = HashMap::with_capacity(rules.len());
    let mut first_occurrences: Vec<&Rule> = Vec::with_capacity(rules.len());
    for rule in rules {
        if rule_map.contains_key(rule.id.as_str()) {
            sink.error(&CompileError::DuplicateRule {
                name: rule.id.clone(),
            });
            errors += 1;
        } else {
            rule_map.insert(rule.id.as_str(), rule);
            first_occurrences.push(rule);
        }
    }

    let mut referenced: HashSet<&str> = HashSet::new();
    for rule in rules {
        for_each_reference(&rule.body, &mut |reference| {
            if !rule_map.contains_key(reference) {
                sink.error(&CompileError::UndefinedRuleRef {
                    rule: rule.id.clone(),
                    reference: reference.to_owned(),
                });
                errors += 1;
            }
            referenced.insert(reference);
        });
    }

    for rule in first_occurrences {
        if rule.kind != RuleKind::Intent && !referenced.contains(rule.id.as_str()) {
            sink.warning(&CompileWarning::UnusedRule {
                name: rule.id.clone(),
            });
        }
    }

    if errors > 0 {
        return Err(GenerateError::Invalid { errors });
    }
    Ok(rule_map)
}

/// Builds the id -> referenced ids relation and sorts it leaf-first,
/// reporting every rule that sits on a cycle in a single error.
fn dependency_order<'a>(
    rules: &'a [Rule],
    sink: &mut impl DiagnosticSink,
) -> Result<Vec<&'a str>, GenerateError> {
    let mut sources: Vec<&str> = Vec::new();
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for rule in rules {
        for_each_reference(&rule.body, &mut |reference| {
            let deps = adj.entry(rule.id.as_str()).or_insert_with(|| {
                sources.push(rule.id.as_str());
                Vec::new()
            });
            if !deps.contains(&reference) {
                deps.push(reference);
            }
        });
    }

    let sorted = topological_sort(sources, |id| adj.get(id).cloned().unwrap_or_default());

    if !sorted.cycles.is_empty() {
        let mut seen = HashSet::new();
        let ids: Vec<String> = sorted
            .cycles
            .iter()
            .flatten()
            .filter(|id| seen.insert(**id))
            .map(|id| (*id).to_owned())
            .collect();
        sink.error(&CompileError::CyclicDependency { rules: ids });
        return Err(GenerateError::Invalid { errors: 1 });
    }

    Ok(sorted.sorted)
}

/// Calls `f` with every rule id referenced anywhere in `body`, including
/// inside nested groups, in authored order.
pub(crate) fn for_each_reference<'a>(body: &'a Sequence, f: &mut impl FnMut(&'a str)) {
    for alternation in &body.groups {
        for term in &alternation.terms {
            match &term.kind {
                TermKind::Reference(id) => f(id.as_str()),
                TermKind::Group(inner) => for_each_reference(inner, f),
                TermKind::Strings(_) => {}
            }
        }
    }
}
