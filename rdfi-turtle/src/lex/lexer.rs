//! Turtle lexer built on winnow.
//!
//! Produces the whole token stream up front. The first invalid token stops
//! the scan with a message that points at the offending line and column.

use std::sync::Arc;

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt, peek, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location, Stream};
use winnow::token::{any, one_of, take, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::token::{Token, TokenKind};
use crate::error::{Result, TurtleError};

/// Lexer input: tracks byte offsets for token spans.
pub type Input<'a> = LocatingSlice<&'a str>;

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Lexer for one Turtle document.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Tokenize the entire input. The last token is always `Eof`.
    pub fn tokenize(self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut input = LocatingSlice::new(self.input);

        loop {
            skip_ws_and_comments(&mut input);

            if input.is_empty() {
                let pos = input.current_token_start();
                tokens.push(Token::new(TokenKind::Eof, pos, pos));
                break;
            }

            let start = input.current_token_start();
            match next_token(&mut input) {
                Ok(kind) => {
                    let end = input.current_token_start();
                    tokens.push(Token::new(kind, start, end));
                }
                Err(_) => return Err(self.make_error(start, &input)),
            }
        }

        Ok(tokens)
    }

    fn make_error(&self, position: usize, input: &Input<'_>) -> TurtleError {
        let remaining: &str = input.as_ref();
        let bad_char = remaining.chars().next().unwrap_or('?');
        let (line, col) = self.line_col(position);
        let context = format!(
            "\n  |\n{} | {}\n  | {}^",
            line,
            self.get_line(line),
            " ".repeat(col.saturating_sub(1))
        );

        let what = match bad_char {
            '"' | '\'' => "unterminated or malformed string literal".to_string(),
            '<' => "invalid or unterminated IRI".to_string(),
            c if !c.is_ascii() && !is_pn_chars_base(c) => {
                format!("unexpected character '{}' (U+{:04X})", c.escape_unicode(), c as u32)
            }
            c if is_pn_chars_base(c) => {
                let word: String = remaining.chars().take_while(|c| is_pn_chars(*c)).collect();
                format!("unexpected word '{}' (not a keyword or prefixed name)", word)
            }
            c => format!("unexpected character '{}'", c),
        };

        TurtleError::lexer(
            position,
            format!("{} at line {}, column {}{}", what, line, col, context),
        )
    }

    /// Byte position to 1-indexed (line, column).
    fn line_col(&self, position: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;
        for (i, c) in self.input.char_indices() {
            if i >= position {
                break;
            }
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    fn get_line(&self, line_num: usize) -> &str {
        self.input
            .lines()
            .nth(line_num.saturating_sub(1))
            .unwrap_or("")
    }
}

fn skip_ws_and_comments(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str> = take_while(0.., is_ws).parse_next(input);

        if input.starts_with('#') {
            let _: ModalResult<&str> = take_till(0.., |c| c == '\n' || c == '\r').parse_next(input);
            let _: ModalResult<Option<char>> = opt(one_of(['\n', '\r'])).parse_next(input);
        } else {
            break;
        }
    }
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        parse_double_caret,
        parse_iri_ref,
        // before prefixed names, `_` would otherwise start one
        parse_blank_node_label,
        parse_anon,
        parse_nil,
        parse_at_directive,
        parse_default_prefix,
        parse_prefixed_name_or_keyword,
        parse_string_literal,
        parse_number,
        parse_punctuation,
    ))
    .parse_next(input)
}

// =============================================================================
// IRIs
// =============================================================================

fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('<', parse_iri_content, '>')
        .map(|s: String| TokenKind::Iri(Arc::from(s)))
        .parse_next(input)
}

/// IRI body with `\u`/`\U` escapes decoded. May be empty (`<>` is the base).
fn parse_iri_content(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., is_iri_char).parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with('>') {
            return Ok(result);
        }
        if !input.starts_with('\\') {
            return backtrack();
        }
        '\\'.parse_next(input)?;
        match any.parse_next(input)? {
            'u' => result.push(parse_hex_char(input, 4)?),
            'U' => result.push(parse_hex_char(input, 8)?),
            _ => return backtrack(),
        }
    }
}

/// Exactly `digits` hex digits naming a Unicode scalar value.
fn parse_hex_char(input: &mut Input<'_>, digits: usize) -> ModalResult<char> {
    let hex: &str = take_while(digits..=digits, AsChar::is_hex_digit).parse_next(input)?;
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => Ok(c),
        None => backtrack(),
    }
}

// =============================================================================
// Directives and language tags
// =============================================================================

fn parse_at_directive(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '@'.parse_next(input)?;
    let word: &str =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-').parse_next(input)?;

    Ok(match word {
        "prefix" => TokenKind::KwPrefix,
        "base" => TokenKind::KwBase,
        _ => TokenKind::LangTag(Arc::from(word)),
    })
}

// =============================================================================
// Prefixed names and keywords
// =============================================================================

/// `:local` or bare `:`.
fn parse_default_prefix(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ':'.parse_next(input)?;
    Ok(match opt(parse_pn_local).parse_next(input)? {
        Some(local) => TokenKind::PrefixedName {
            prefix: Arc::from(""),
            local: Arc::from(local),
        },
        None => TokenKind::PrefixedNameNs(Arc::from("")),
    })
}

/// `prefix:local`, `prefix:` or one of `a`, `true`, `false`, `PREFIX`, `BASE`.
fn parse_prefixed_name_or_keyword(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let start = input.checkpoint();

    let first: char = any.parse_next(input)?;
    if !is_pn_chars_base(first) {
        input.reset(&start);
        return backtrack();
    }

    let mut word = String::new();
    word.push(first);
    loop {
        let chunk: &str = take_while(0.., is_pn_chars).parse_next(input)?;
        word.push_str(chunk);

        // interior dots only
        let rest: &str = input.as_ref();
        if rest.starts_with('.') && rest[1..].chars().next().is_some_and(is_pn_chars) {
            '.'.parse_next(input)?;
            word.push('.');
        } else {
            break;
        }
    }

    if peek(opt(':')).parse_next(input)?.is_some() {
        if !is_pn_prefix_start(first) {
            input.reset(&start);
            return backtrack();
        }
        ':'.parse_next(input)?;
        return Ok(match opt(parse_pn_local).parse_next(input)? {
            Some(local) => TokenKind::PrefixedName {
                prefix: Arc::from(word),
                local: Arc::from(local),
            },
            None => TokenKind::PrefixedNameNs(Arc::from(word)),
        });
    }

    match word.as_str() {
        "a" => Ok(TokenKind::KwA),
        "true" => Ok(TokenKind::KwTrue),
        "false" => Ok(TokenKind::KwFalse),
        "PREFIX" => Ok(TokenKind::KwSparqlPrefix),
        "BASE" => Ok(TokenKind::KwSparqlBase),
        _ => {
            input.reset(&start);
            backtrack()
        }
    }
}

/// Local part of a prefixed name. `%XX` is kept as written, `\x` escapes
/// are decoded.
fn parse_pn_local(input: &mut Input<'_>) -> ModalResult<String> {
    let first = input.chars().next();
    if !first.is_some_and(|c| is_pn_local_start(c) || c == '%' || c == '\\') {
        return backtrack();
    }

    let mut result = String::new();
    loop {
        let chunk: &str = take_while(0.., |c: char| is_pn_chars(c) || c == ':').parse_next(input)?;
        result.push_str(chunk);

        let rest: &str = input.as_ref();
        if rest.starts_with('.') {
            let continues = rest[1..]
                .chars()
                .next()
                .is_some_and(|c| is_pn_chars(c) || matches!(c, ':' | '%' | '\\'));
            if !continues {
                break;
            }
            '.'.parse_next(input)?;
            result.push('.');
        } else if rest.starts_with('%') {
            '%'.parse_next(input)?;
            let hex: &str = take_while(2..=2, AsChar::is_hex_digit).parse_next(input)?;
            result.push('%');
            result.push_str(hex);
        } else if rest.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped: char = any.parse_next(input)?;
            if !"_~.-!$&'()*+,;=/?#@%".contains(escaped) {
                return backtrack();
            }
            result.push(escaped);
        } else {
            break;
        }
    }

    if result.is_empty() {
        return backtrack();
    }
    Ok(result)
}

// =============================================================================
// Blank nodes
// =============================================================================

fn parse_blank_node_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded("_:", parse_blank_node_name)
        .map(|name: &str| TokenKind::BlankNodeLabel(Arc::from(name)))
        .parse_next(input)
}

fn parse_blank_node_name<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    let start = input.checkpoint();
    let name: &str = (
        take_while(1, |c: char| is_pn_chars_u(c) || c.is_ascii_digit()),
        take_while(0.., |c: char| is_pn_chars(c) || c == '.'),
    )
        .take()
        .parse_next(input)?;

    // a trailing dot terminates the statement instead
    let trimmed = name.trim_end_matches('.');
    if trimmed.len() < name.len() {
        input.reset(&start);
        return take(trimmed.chars().count()).parse_next(input);
    }
    Ok(name)
}

fn parse_anon(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ('[', take_while(0.., is_ws), ']')
        .map(|_| TokenKind::Anon)
        .parse_next(input)
}

fn parse_nil(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ('(', take_while(0.., is_ws), ')')
        .map(|_| TokenKind::Nil)
        .parse_next(input)
}

// =============================================================================
// String literals
// =============================================================================

fn parse_string_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    // long forms first: `""` would otherwise lex as an empty short string
    alt((
        quoted("\"\"\"", '"', true),
        quoted("'''", '\'', true),
        quoted("\"", '"', false),
        quoted("'", '\'', false),
    ))
    .map(|s| TokenKind::String(Arc::from(s)))
    .parse_next(input)
}

/// A string between `delim` pairs. Short strings stop at a line break.
fn quoted<'a>(
    mut delim: &'static str,
    quote: char,
    long: bool,
) -> impl Parser<Input<'a>, String, ErrMode<ContextError>> {
    move |input: &mut Input<'a>| {
        delim.parse_next(input)?;
        let body = string_body(input, delim, quote, long)?;
        delim.parse_next(input)?;
        Ok(body)
    }
}

fn string_body(input: &mut Input<'_>, delim: &str, quote: char, long: bool) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., |c: char| {
            c != quote && c != '\\' && (long || (c != '\n' && c != '\r'))
        })
        .parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with(delim) {
            return Ok(result);
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            result.push(parse_escape_char(input)?);
        } else if long && input.starts_with(quote) {
            // lone quote inside a long string
            let c: char = any.parse_next(input)?;
            result.push(c);
        } else {
            return Ok(result);
        }
    }
}

fn parse_escape_char(input: &mut Input<'_>) -> ModalResult<char> {
    match any.parse_next(input)? {
        't' => Ok('\t'),
        'b' => Ok('\x08'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\x0C'),
        '"' => Ok('"'),
        '\'' => Ok('\''),
        '\\' => Ok('\\'),
        'u' => parse_hex_char(input, 4),
        'U' => parse_hex_char(input, 8),
        _ => backtrack(),
    }
}

// =============================================================================
// Numbers
// =============================================================================

fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((parse_double, parse_decimal, parse_integer)).parse_next(input)
}

fn parse_integer(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let lexical: &str = (opt(one_of(['+', '-'])), digit1).take().parse_next(input)?;

    let rest: &str = input.as_ref();
    if rest.starts_with(['e', 'E'])
        || (rest.starts_with('.') && rest[1..].starts_with(|c: char| c.is_ascii_digit()))
    {
        return backtrack();
    }
    Ok(TokenKind::Integer(Arc::from(lexical)))
}

fn parse_decimal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let lexical: &str = (opt(one_of(['+', '-'])), opt(digit1), '.', digit1)
        .take()
        .parse_next(input)?;

    if input.starts_with(['e', 'E']) {
        return backtrack();
    }
    Ok(TokenKind::Decimal(Arc::from(lexical)))
}

fn parse_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let lexical: &str = (
        opt(one_of(['+', '-'])),
        alt((
            (digit1, '.', opt(digit1)).void(),
            ('.', digit1).void(),
            digit1.void(),
        )),
        one_of(['e', 'E']),
        opt(one_of(['+', '-'])),
        digit1,
    )
        .take()
        .parse_next(input)?;

    Ok(TokenKind::Double(Arc::from(lexical)))
}

// =============================================================================
// Punctuation
// =============================================================================

fn parse_double_caret(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "^^".map(|_| TokenKind::DoubleCaret).parse_next(input)
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| match c {
        '.' => Some(TokenKind::Dot),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        _ => None,
    })
    .parse_next(input)
}

/// Tokenize a Turtle document.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Eof))
            .collect()
    }

    fn a(s: &str) -> Arc<str> {
        Arc::from(s)
    }

    #[test]
    fn test_iri() {
        assert_eq!(tok("<http://example.org/>"), vec![TokenKind::Iri(a("http://example.org/"))]);
        assert_eq!(tok("<>"), vec![TokenKind::Iri(a(""))]);
        assert_eq!(tok("<n1>"), vec![TokenKind::Iri(a("n1"))]);
        assert_eq!(tok(r"<ex:é>"), vec![TokenKind::Iri(a("ex:é"))]);
    }

    #[test]
    fn test_prefixed_name() {
        assert_eq!(
            tok("ex:name"),
            vec![TokenKind::PrefixedName { prefix: a("ex"), local: a("name") }]
        );
        assert_eq!(tok("ex:"), vec![TokenKind::PrefixedNameNs(a("ex"))]);
        assert_eq!(
            tok(":name"),
            vec![TokenKind::PrefixedName { prefix: a(""), local: a("name") }]
        );
        assert_eq!(tok(":"), vec![TokenKind::PrefixedNameNs(a(""))]);
    }

    #[test]
    fn test_prefixed_name_before_statement_dot() {
        assert_eq!(
            tok("ex:a.b ex:c."),
            vec![
                TokenKind::PrefixedName { prefix: a("ex"), local: a("a.b") },
                TokenKind::PrefixedName { prefix: a("ex"), local: a("c") },
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn test_local_escapes() {
        assert_eq!(
            tok(r"ex:a\/b ex:%20"),
            vec![
                TokenKind::PrefixedName { prefix: a("ex"), local: a("a/b") },
                TokenKind::PrefixedName { prefix: a("ex"), local: a("%20") },
            ]
        );
    }

    #[test]
    fn test_blank_node() {
        assert_eq!(tok("_:b1"), vec![TokenKind::BlankNodeLabel(a("b1"))]);
        assert_eq!(
            tok("_:b1."),
            vec![TokenKind::BlankNodeLabel(a("b1")), TokenKind::Dot]
        );
        assert_eq!(tok("[]"), vec![TokenKind::Anon]);
        assert_eq!(tok("[ ]"), vec![TokenKind::Anon]);
    }

    #[test]
    fn test_nil() {
        assert_eq!(tok("()"), vec![TokenKind::Nil]);
        assert_eq!(tok("( )"), vec![TokenKind::Nil]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(tok("a"), vec![TokenKind::KwA]);
        assert_eq!(tok("true"), vec![TokenKind::KwTrue]);
        assert_eq!(tok("false"), vec![TokenKind::KwFalse]);
        assert_eq!(tok("@prefix"), vec![TokenKind::KwPrefix]);
        assert_eq!(tok("@base"), vec![TokenKind::KwBase]);
        assert_eq!(tok("PREFIX"), vec![TokenKind::KwSparqlPrefix]);
        assert_eq!(tok("BASE"), vec![TokenKind::KwSparqlBase]);
    }

    #[test]
    fn test_lang_tag() {
        assert_eq!(tok("@en"), vec![TokenKind::LangTag(a("en"))]);
        assert_eq!(tok("@en-US"), vec![TokenKind::LangTag(a("en-US"))]);
    }

    #[test]
    fn test_strings() {
        assert_eq!(tok("\"hello\""), vec![TokenKind::String(a("hello"))]);
        assert_eq!(tok("'hello'"), vec![TokenKind::String(a("hello"))]);
        assert_eq!(tok("\"\""), vec![TokenKind::String(a(""))]);
        assert_eq!(tok("\"hello\\nworld\""), vec![TokenKind::String(a("hello\nworld"))]);
        assert_eq!(tok(r#""café""#), vec![TokenKind::String(a("café"))]);
    }

    #[test]
    fn test_long_strings() {
        assert_eq!(
            tok("\"\"\"hello\nworld\"\"\""),
            vec![TokenKind::String(a("hello\nworld"))]
        );
        assert_eq!(
            tok("'''it's \"quoted\"'''"),
            vec![TokenKind::String(a("it's \"quoted\""))]
        );
        assert_eq!(
            tok("\"\"\"say \"hi\" \"\"\""),
            vec![TokenKind::String(a("say \"hi\" "))]
        );
    }

    #[test]
    fn test_numbers_keep_lexical_form() {
        assert_eq!(tok("42"), vec![TokenKind::Integer(a("42"))]);
        assert_eq!(tok("-42"), vec![TokenKind::Integer(a("-42"))]);
        assert_eq!(tok("007"), vec![TokenKind::Integer(a("007"))]);
        assert_eq!(tok("3.14"), vec![TokenKind::Decimal(a("3.14"))]);
        assert_eq!(tok(".5"), vec![TokenKind::Decimal(a(".5"))]);
        assert_eq!(tok("1e10"), vec![TokenKind::Double(a("1e10"))]);
        assert_eq!(tok("-1.5E-3"), vec![TokenKind::Double(a("-1.5E-3"))]);
    }

    #[test]
    fn test_integer_before_statement_dot() {
        assert_eq!(tok("1."), vec![TokenKind::Integer(a("1")), TokenKind::Dot]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(tok(".;,"), vec![TokenKind::Dot, TokenKind::Semicolon, TokenKind::Comma]);
        assert_eq!(tok("^^"), vec![TokenKind::DoubleCaret]);
        assert_eq!(
            tok("[ ( ) ]"),
            vec![TokenKind::LBracket, TokenKind::Nil, TokenKind::RBracket]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            tok("ex:name # a comment\nex:value"),
            vec![
                TokenKind::PrefixedName { prefix: a("ex"), local: a("name") },
                TokenKind::PrefixedName { prefix: a("ex"), local: a("value") },
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("<s> <p> \"o\" .").unwrap();
        assert_eq!((tokens[0].start, tokens[0].end), (0, 3));
        assert_eq!((tokens[2].start, tokens[2].end), (8, 11));
        assert!(tokens.last().unwrap().is_eof());
    }

    #[test]
    fn test_error_unexpected_char() {
        let msg = tokenize("ex:name $ ex:value").unwrap_err().to_string();
        assert!(msg.contains("unexpected character"));
        assert!(msg.contains('$'));
        assert!(msg.contains("line 1"));
    }

    #[test]
    fn test_error_bare_word() {
        let err = tokenize("this is not valid").unwrap_err();
        assert_eq!(err.position(), Some(0));
        assert!(err.to_string().contains("'this'"));
    }

    #[test]
    fn test_error_unterminated_string() {
        let msg = tokenize("ex:name \"unterminated").unwrap_err().to_string();
        assert!(msg.contains("string literal"));
        assert!(msg.contains("line 1"));
    }

    #[test]
    fn test_error_with_line_info() {
        let msg = tokenize("ex:name \"ok\" .\nex:other $ .").unwrap_err().to_string();
        assert!(msg.contains("line 2"));
        assert!(msg.contains('$'));
    }
}
