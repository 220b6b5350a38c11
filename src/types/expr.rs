use std::fmt;

/// Concatenation level of a rule body: groups are combined left to right
/// as a cross product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub groups: Vec<Alternation>,
}

/// Union level of a rule body: the string sets of all terms are chained
/// in authored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternation {
    pub terms: Vec<Term>,
}

/// An atomic expansion unit with its optional marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub kind: TermKind,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind {
    /// A fixed list of literal strings.
    Strings(Vec<String>),
    /// The expansion of another rule, looked up by id.
    Reference(String),
    /// A parenthesised sub-expression.
    Group(Sequence),
}

impl Term {
    #[must_use]
    pub fn new(kind: TermKind) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    /// Mark this term as optional (`term?` in the DSL).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn or(self, other: Term) -> Alternation {
        Alternation {
            terms: vec![self, other],
        }
    }

    #[must_use]
    pub fn then(self, next: impl Into<Alternation>) -> Sequence {
        Sequence::from(self).then(next)
    }
}

impl Alternation {
    #[must_use]
    pub fn or(mut self, other: Term) -> Alternation {
        self.terms.push(other);
        self
    }

    #[must_use]
    pub fn then(self, next: impl Into<Alternation>) -> Sequence {
        Sequence::from(self).then(next)
    }
}

impl Sequence {
    #[must_use]
    pub fn then(mut self, next: impl Into<Alternation>) -> Sequence {
        self.groups.push(next.into());
        self
    }
}

impl From<Term> for Alternation {
    fn from(term: Term) -> Self {
        Alternation { terms: vec![term] }
    }
}

impl From<Alternation> for Sequence {
    fn from(alternation: Alternation) -> Self {
        Sequence {
            groups: vec![alternation],
        }
    }
}

impl From<Term> for Sequence {
    fn from(term: Term) -> Self {
        Sequence::from(Alternation::from(term))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TermKind::Strings(items) => write!(f, "[{}]", items.join(", "))?,
            TermKind::Reference(id) => write!(f, "{id}")?,
            TermKind::Group(inner) => write!(f, "({inner})")?,
        }
        if self.optional {
            write!(f, "?")?;
        }
        Ok(())
    }
}

impl fmt::Display for Alternation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{group}")?;
        }
        Ok(())
    }
}

/// A literal term producing each of `items` in order.
#[must_use]
pub fn strings<I, S>(items: I) -> Term
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Term::new(TermKind::Strings(items.into_iter().map(Into::into).collect()))
}

#[must_use]
pub fn rule_ref(id: &str) -> Term {
    Term::new(TermKind::Reference(id.to_owned()))
}

#[must_use]
pub fn group(inner: impl Into<Sequence>) -> Term {
    Term::new(TermKind::Group(inner.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_creates_literal_term() {
        let term = strings(["a", "b"]);
        assert_eq!(
            term,
            Term {
                kind: TermKind::Strings(vec!["a".to_owned(), "b".to_owned()]),
                optional: false,
            }
        );
    }

    #[test]
    fn rule_ref_creates_reference() {
        assert_eq!(
            rule_ref("CITY").kind,
            TermKind::Reference("CITY".to_owned())
        );
    }

    #[test]
    fn optional_sets_marker_only() {
        let term = rule_ref("x").optional();
        assert!(term.optional);
        assert_eq!(term.kind, TermKind::Reference("x".to_owned()));
    }

    #[test]
    fn or_chaining_stays_flat() {
        let alt = rule_ref("a").or(rule_ref("b")).or(rule_ref("c"));
        assert_eq!(alt.terms.len(), 3);
        assert_eq!(alt.terms[2], rule_ref("c"));
    }

    #[test]
    fn then_chaining_builds_groups_in_order() {
        let seq = rule_ref("a")
            .then(rule_ref("b").or(rule_ref("c")))
            .then(rule_ref("d").optional());
        assert_eq!(seq.groups.len(), 3);
        assert_eq!(seq.groups[0].terms, vec![rule_ref("a")]);
        assert_eq!(seq.groups[1].terms.len(), 2);
        assert!(seq.groups[2].terms[0].optional);
    }

    #[test]
    fn display_renders_dsl_syntax() {
        let seq = strings(["hi", "hello"])
            .then(rule_ref("name").or(group(strings(["you"]).then(strings(["there"]))).optional()));
        assert_eq!(seq.to_string(), "[hi, hello], name | ([you], [there])?");
    }
}
