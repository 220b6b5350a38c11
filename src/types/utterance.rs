use std::fmt;

/// A labelled span of an [`Utterance`].
///
/// `start` and `end` are half-open character offsets into the utterance text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A fully expanded, markup-free string together with the entity spans
/// recovered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub entities: Vec<Entity>,
}

impl Utterance {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entities: Vec::new(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}..{}] '{}'", self.name, self.start, self.end, self.text)
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_has_no_entities() {
        let u = Utterance::plain("hello there");
        assert_eq!(u.text, "hello there");
        assert!(u.entities.is_empty());
    }

    #[test]
    fn entity_display() {
        let e = Entity {
            name: "CITY".into(),
            text: "Prague".into(),
            start: 0,
            end: 6,
        };
        assert_eq!(e.to_string(), "CITY[0..6] 'Prague'");
    }
}
