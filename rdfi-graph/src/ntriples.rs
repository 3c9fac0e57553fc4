//! N-Triples term syntax
//!
//! Rendering and parsing of single terms: `<iri>`, `_:label`, `"lex"`,
//! `"lex"@lang` and `"lex"^^<datatype>`.

use crate::datatype::Datatype;
use crate::error::{GraphError, Result};
use crate::term::{Literal, Term};
use std::fmt;
use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::stream::AsChar;
use winnow::token::{any, none_of, take_till, take_while};

/// Escape a lexical form for use inside a double-quoted string
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

pub(crate) fn write_term(f: &mut fmt::Formatter<'_>, term: &Term) -> fmt::Result {
    match term {
        Term::Named(iri) => write!(f, "<{}>", iri),
        Term::Blank(label) => write!(f, "_:{}", label),
        Term::Literal(lit) => {
            write!(f, "\"{}\"", escape_string(lit.lexical()))?;
            if let Some(lang) = lit.language() {
                write!(f, "@{}", lang)
            } else if !lit.datatype().is_xsd_string() {
                write!(f, "^^<{}>", lit.datatype())
            } else {
                Ok(())
            }
        }
    }
}

/// Parse one N-Triples term. Surrounding whitespace is ignored.
pub fn parse_term(text: &str) -> Result<Term> {
    let trimmed = text.trim();
    let raw = raw_term
        .parse(trimmed)
        .map_err(|e| GraphError::parse(text, e.offset(), "not an N-Triples term"))?;
    raw.into_term()
}

enum RawTerm<'a> {
    Named(&'a str),
    Blank(&'a str),
    Literal {
        lexical: String,
        suffix: Option<Suffix<'a>>,
    },
}

enum Suffix<'a> {
    Lang(&'a str),
    Datatype(&'a str),
}

impl RawTerm<'_> {
    fn into_term(self) -> Result<Term> {
        match self {
            RawTerm::Named(iri) => Ok(Term::named(iri)),
            RawTerm::Blank(label) => Ok(Term::blank(label)),
            RawTerm::Literal { lexical, suffix } => {
                let lit = match suffix {
                    None => Literal::string(lexical),
                    Some(Suffix::Lang(lang)) => Literal::lang(lexical, lang)?,
                    Some(Suffix::Datatype(dt)) => Literal::typed(lexical, Datatype::from_iri(dt))?,
                };
                Ok(Term::Literal(lit))
            }
        }
    }
}

fn raw_term<'a>(input: &mut &'a str) -> ModalResult<RawTerm<'a>> {
    alt((
        iri_ref.map(RawTerm::Named),
        blank_label.map(RawTerm::Blank),
        literal,
    ))
    .parse_next(input)
}

fn iri_ref<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('<', take_till(0.., |c: char| c == '>' || c.is_whitespace()), '>').parse_next(input)
}

fn blank_label<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded("_:", take_while(1.., |c: char| !c.is_whitespace())).parse_next(input)
}

fn literal<'a>(input: &mut &'a str) -> ModalResult<RawTerm<'a>> {
    let lexical = delimited('"', string_body, '"').parse_next(input)?;
    let suffix = opt(alt((
        preceded(
            '@',
            take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-'),
        )
        .map(Suffix::Lang),
        preceded("^^", iri_ref).map(Suffix::Datatype),
    )))
    .parse_next(input)?;
    Ok(RawTerm::Literal { lexical, suffix })
}

fn string_body(input: &mut &str) -> ModalResult<String> {
    repeat(
        0..,
        alt((none_of(['"', '\\']), preceded('\\', escape_char))),
    )
    .fold(String::new, |mut acc, c| {
        acc.push(c);
        acc
    })
    .parse_next(input)
}

fn escape_char(input: &mut &str) -> ModalResult<char> {
    let c: char = any.parse_next(input)?;
    match c {
        't' => Ok('\t'),
        'b' => Ok('\x08'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\x0C'),
        '"' => Ok('"'),
        '\'' => Ok('\''),
        '\\' => Ok('\\'),
        'u' => hex_char(input, 4),
        'U' => hex_char(input, 8),
        _ => Err(ErrMode::Backtrack(ContextError::new())),
    }
}

fn hex_char(input: &mut &str, digits: usize) -> ModalResult<char> {
    let hex: &str = take_while(digits..=digits, AsChar::is_hex_digit).parse_next(input)?;
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_and_blank() {
        assert_eq!(parse_term("<http://ex.org/a>").unwrap(), Term::named("http://ex.org/a"));
        assert_eq!(parse_term("  _:b1 ").unwrap(), Term::blank("b1"));
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse_term("\"l1\"").unwrap(), Term::string("l1"));

        let tagged = parse_term("\"chat\"@fr").unwrap();
        assert_eq!(tagged.as_literal().unwrap().language(), Some("fr"));

        let typed = parse_term("\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>").unwrap();
        assert!(typed.as_literal().unwrap().datatype().is_numeric());
    }

    #[test]
    fn test_parse_escapes() {
        let term = parse_term(r#""a\"b\né""#).unwrap();
        assert_eq!(term.value(), "a\"b\né");
    }

    #[test]
    fn test_display_escapes_and_reparses() {
        let term = Term::string("say \"hi\"\n");
        let text = term.to_string();
        assert_eq!(text, r#""say \"hi\"\n""#);
        assert_eq!(parse_term(&text).unwrap(), term);
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "n1", "<unterminated", "\"open", "_:", "\"x\"^^bad", "<a> trailing"] {
            let err = parse_term(bad).unwrap_err();
            assert!(matches!(err, GraphError::Parse { .. }), "{bad}");
        }
    }

    #[test]
    fn test_language_with_bad_shape_is_invalid_argument() {
        let err = parse_term("\"x\"@-en").unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }
}
