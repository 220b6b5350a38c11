use winnow::ascii::{Caseless, multispace1, till_line_ending};
use winnow::combinator::{alt, cut_err, opt, preceded, repeat, terminated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::markup::is_sentinel;
use crate::{Alternation, Rule, RuleKind, Sequence, Term, TermKind};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_whitespace()).void(),
            ('#', till_line_ending).void(),
            ("//", till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers ------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '.'
        }),
    )
        .take()
        .parse_next(input)
}

fn rule_kind(input: &mut &str) -> ModalResult<RuleKind> {
    terminated(
        alt((
            Caseless("entity").value(RuleKind::Entity),
            Caseless("intent").value(RuleKind::Intent),
        )),
        multispace1,
    )
    .parse_next(input)
}

// -- Terms ------------------------------------------------------------------

fn tuple_char(c: char) -> bool {
    c != ']' && !is_sentinel(c)
}

/// `[a, b, c]` with items trimmed and blank items dropped.
fn string_tuple(input: &mut &str) -> ModalResult<Vec<String>> {
    let body = preceded(
        '[',
        cut_err(terminated(take_while(0.., tuple_char), ']')).context(StrContext::Expected(
            StrContextValue::CharLiteral(']'),
        )),
    )
    .parse_next(input)?;

    let items: Vec<String> = body
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if items.is_empty() {
        return Err(ErrMode::from_input(input).cut());
    }
    Ok(items)
}

fn sub_expression(input: &mut &str) -> ModalResult<Sequence> {
    preceded('(', cut_err(terminated(sequence, (ws, ')'))))
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)
}

fn term(input: &mut &str) -> ModalResult<Term> {
    ws.parse_next(input)?;
    let kind = alt((
        string_tuple.map(TermKind::Strings),
        sub_expression.map(TermKind::Group),
        ident.map(|id: &str| TermKind::Reference(id.to_owned())),
    ))
    .context(StrContext::Expected(StrContextValue::Description("term")))
    .parse_next(input)?;

    let optional = opt((ws, '?')).parse_next(input)?.is_some();
    Ok(Term { kind, optional })
}

// -- Expressions (precedence: ',' < '|' < '?') ------------------------------

fn alternation(input: &mut &str) -> ModalResult<Alternation> {
    let first = term(input)?;
    let rest: Vec<Term> = repeat(0.., preceded((ws, '|'), cut_err(term))).parse_next(input)?;

    let mut terms = Vec::with_capacity(rest.len() + 1);
    terms.push(first);
    terms.extend(rest);
    Ok(Alternation { terms })
}

fn sequence(input: &mut &str) -> ModalResult<Sequence> {
    let first = alternation(input)?;
    let rest: Vec<Alternation> =
        repeat(0.., preceded((ws, ','), cut_err(alternation))).parse_next(input)?;

    let mut groups = Vec::with_capacity(rest.len() + 1);
    groups.push(first);
    groups.extend(rest);
    Ok(Sequence { groups })
}

// -- Rule definitions -------------------------------------------------------

fn rule_def(input: &mut &str) -> ModalResult<Rule> {
    ws.parse_next(input)?;
    let kind = opt(rule_kind).parse_next(input)?.unwrap_or_default();

    let id = ident
        .context(StrContext::Expected(StrContextValue::Description(
            "rule name",
        )))
        .parse_next(input)?;

    ws.parse_next(input)?;
    cut_err(':')
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;

    let body = cut_err(sequence)
        .context(StrContext::Expected(StrContextValue::Description(
            "rule body",
        )))
        .parse_next(input)?;

    ws.parse_next(input)?;
    cut_err(';')
        .context(StrContext::Expected(StrContextValue::CharLiteral(';')))
        .parse_next(input)?;

    Ok(Rule {
        id: id.to_owned(),
        kind,
        body,
    })
}

// -- Top-level parser -------------------------------------------------------

pub(super) fn parse_grammar(input: &mut &str) -> ModalResult<Vec<Rule>> {
    let rules: Vec<Rule> = repeat(0.., rule_def).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;
    use crate::{group, rule_ref, strings};

    use super::*;

    fn body(input: &str) -> Sequence {
        let rules = parse(input).unwrap();
        assert_eq!(rules.len(), 1);
        rules.into_iter().next().unwrap().body
    }

    #[test]
    fn parse_default_rule() {
        let result = parse("greeting: [hi, hello];").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "greeting");
        assert_eq!(result[0].kind, RuleKind::Default);
        assert_eq!(result[0].body, Sequence::from(strings(["hi", "hello"])));
    }

    #[test]
    fn parse_rule_kinds_case_insensitive() {
        let result = parse("ENTITY CITY: [Prague];\nIntent Fly: CITY;").unwrap();
        assert_eq!(result[0].kind, RuleKind::Entity);
        assert_eq!(result[1].kind, RuleKind::Intent);
        assert_eq!(result[1].id, "Fly");
    }

    #[test]
    fn keyword_prefix_is_an_identifier() {
        let result = parse("entity: [x];\nintentional: entity;").unwrap();
        assert_eq!(result[0].id, "entity");
        assert_eq!(result[0].kind, RuleKind::Default);
        assert_eq!(result[1].id, "intentional");
        assert_eq!(result[1].body, Sequence::from(rule_ref("entity")));
    }

    #[test]
    fn tuple_items_trimmed_and_blanks_dropped() {
        assert_eq!(
            body("r: [ New York ,, Brno , ];"),
            Sequence::from(strings(["New York", "Brno"]))
        );
    }

    #[test]
    fn sequence_and_alternation_precedence() {
        assert_eq!(
            body("r: [a] | [b], c;"),
            strings(["a"]).or(strings(["b"])).then(rule_ref("c"))
        );
    }

    #[test]
    fn optional_marker_binds_to_term() {
        assert_eq!(
            body("r: [a], b ?, [c] | d?;"),
            strings(["a"])
                .then(rule_ref("b").optional())
                .then(strings(["c"]).or(rule_ref("d").optional()))
        );
    }

    #[test]
    fn nested_sub_expression() {
        assert_eq!(
            body("r: [go], ([to], CITY | [home])?;"),
            strings(["go"]).then(
                group(strings(["to"]).then(rule_ref("CITY").or(strings(["home"])))).optional()
            )
        );
    }

    #[test]
    fn comments_ignored() {
        let result = parse("# header\nr: [a]; // trailing\n# end").unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn empty_input_has_no_rules() {
        assert!(parse("  \n# nothing\n").unwrap().is_empty());
    }

    #[test]
    fn missing_semicolon_is_error() {
        assert!(parse("r: [a]").is_err());
    }

    #[test]
    fn empty_tuple_is_error() {
        assert!(parse("r: [ , ];").is_err());
    }

    #[test]
    fn unclosed_tuple_is_error() {
        assert!(parse("r: [a, b;").is_err());
    }

    #[test]
    fn sentinel_in_literal_is_error() {
        assert!(parse("r: [a\u{1E}b];").is_err());
    }

    #[test]
    fn unclosed_group_is_error() {
        assert!(parse("r: ([a], [b];").is_err());
    }

    #[test]
    fn missing_body_is_error() {
        assert!(parse("r: ;").is_err());
    }
}
