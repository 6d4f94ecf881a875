use crate::ast::{is_raw_text_element, Attribute, ESCAPABLE_RAW_TEXT_ELEMENTS};
use crate::entities::decode_entities;
use logos::{Lexer, Logos};
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// Raw markup lexemes. Tags are matched as a whole; their insides are
/// lexed separately by [`TagLexeme`].
#[derive(Logos, Debug, Clone, PartialEq)]
enum Lexeme<'src> {
    #[token("<!--", lex_comment)]
    Comment(&'src str),

    // <!DOCTYPE ...>, <![CDATA[ ...>, <?xml ...?>
    #[regex(r"<![a-zA-Z\[][^>]*>", |lex| lex.slice())]
    #[regex(r"<\?[^>]*>", |lex| lex.slice())]
    Declaration(&'src str),

    #[regex(r"<[a-zA-Z]", lex_start_tag)]
    StartTag(&'src str),

    #[regex(r"</[a-zA-Z][^>]*>", |lex| lex.slice())]
    EndTag(&'src str),

    #[regex(r"</([^a-zA-Z>][^>]*)?>")]
    BogusEndTag,

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    #[token("<")]
    LessThan,
}

/// Lexemes inside a start tag, after the `<`
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\x0C]+")]
enum TagLexeme<'src> {
    #[regex(r#"[^ \t\n\r\x0C"'>/=]+"#, |lex| lex.slice())]
    Word(&'src str),

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| unquote(lex.slice()))]
    #[regex(r"'[^']*'", |lex| unquote(lex.slice()))]
    Quoted(&'src str),

    #[token("/")]
    Slash,
}

fn unquote(quoted: &str) -> &str {
    &quoted[1..quoted.len() - 1]
}

fn lex_comment<'src>(lex: &mut Lexer<'src, Lexeme<'src>>) -> &'src str {
    let rest = lex.remainder();
    match rest.find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            &rest[..end]
        }
        None => {
            lex.bump(rest.len());
            rest
        }
    }
}

fn lex_start_tag<'src>(lex: &mut Lexer<'src, Lexeme<'src>>) -> &'src str {
    let rest = lex.remainder();
    lex.bump(start_tag_len(rest));
    lex.slice()
}

/// Length of the remainder of a start tag, up to and including the closing
/// `>`. A `>` inside a quoted attribute value does not close the tag.
fn start_tag_len(rest: &str) -> usize {
    #[derive(Clone, Copy)]
    enum Scan {
        Normal,
        AfterEquals,
        Quoted(u8),
    }

    let mut state = Scan::Normal;
    for (index, byte) in rest.bytes().enumerate() {
        state = match (state, byte) {
            (Scan::Quoted(q), b) if b == q => Scan::Normal,
            (Scan::Quoted(q), _) => Scan::Quoted(q),
            (_, b'>') => return index + 1,
            (_, b'=') => Scan::AfterEquals,
            (Scan::AfterEquals, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C') => Scan::AfterEquals,
            (Scan::AfterEquals, b @ (b'"' | b'\'')) => Scan::Quoted(b),
            _ => Scan::Normal,
        };
    }
    rest.len()
}

/// HTML token produced by [`tokenize`]
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    Doctype(&'src str),
    Comment(&'src str),
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    /// Entity-decoded character data
    Text(Cow<'src, str>),
    /// Verbatim content of a raw-text element
    RawText(&'src str),
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Doctype(s) => write!(f, "doctype {}", s),
            Token::Comment(_) => write!(f, "comment"),
            Token::StartTag { name, .. } => write!(f, "<{}>", name),
            Token::EndTag { name } => write!(f, "</{}>", name),
            Token::Text(t) => write!(f, "text '{}'", t),
            Token::RawText(t) => write!(f, "raw text '{}'", t),
        }
    }
}

/// Tokenize HTML source. Never fails: anything unrecognisable becomes text.
pub fn tokenize(source: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let mut lexer = Lexeme::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let lexeme = match result {
            Ok(lexeme) => lexeme,
            Err(_) => {
                tokens.push((Token::Text(Cow::Borrowed(lexer.slice())), span));
                continue;
            }
        };

        match lexeme {
            Lexeme::Comment(body) => tokens.push((Token::Comment(body), span)),
            Lexeme::Declaration(body) => tokens.push((Token::Doctype(body), span)),
            Lexeme::StartTag(raw) => {
                let token = parse_start_tag(raw);
                let raw_name = match &token {
                    Token::StartTag { name, .. } if is_text_only_element(name) => Some(name.clone()),
                    _ => None,
                };
                tokens.push((token, span));

                if let Some(name) = raw_name {
                    let rest = lexer.remainder();
                    let len = raw_text_len(rest, &name);
                    let start = lexer.span().end;
                    let body = &rest[..len];
                    lexer.bump(len);
                    if !body.is_empty() {
                        let token = if is_raw_text_element(&name) {
                            Token::RawText(body)
                        } else {
                            Token::Text(decode_entities(body))
                        };
                        tokens.push((token, start..start + len));
                    }
                }
            }
            Lexeme::EndTag(raw) => tokens.push((
                Token::EndTag {
                    name: tag_name(&raw[2..]),
                },
                span,
            )),
            Lexeme::BogusEndTag => {}
            Lexeme::Text(text) => tokens.push((Token::Text(decode_entities(text)), span)),
            Lexeme::LessThan => tokens.push((Token::Text(Cow::Borrowed("<")), span)),
        }
    }

    tokens
}

fn is_text_only_element(name: &str) -> bool {
    is_raw_text_element(name) || ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&name)
}

/// Length of raw text up to the matching `</name`, or the whole remainder
fn raw_text_len(rest: &str, name: &str) -> usize {
    let needle = format!("</{}", name);
    rest.to_ascii_lowercase().find(&needle).unwrap_or(rest.len())
}

fn tag_name(raw: &str) -> String {
    raw.split(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Parse `<name attr=value ...>` into a start tag token
fn parse_start_tag(raw: &str) -> Token<'_> {
    let inner = raw.strip_prefix('<').unwrap_or(raw);
    let inner = inner.strip_suffix('>').unwrap_or(inner);

    let mut lexer = TagLexeme::lexer(inner);
    let name = match lexer.next() {
        Some(Ok(TagLexeme::Word(word))) => word.to_ascii_lowercase(),
        _ => tag_name(inner),
    };

    let mut attributes: Vec<Attribute> = Vec::new();
    let mut pending: Option<String> = None;
    let mut self_closing = false;

    while let Some(result) = lexer.next() {
        let Ok(lexeme) = result else { continue };
        match lexeme {
            TagLexeme::Word(word) => {
                if let Some(previous) = pending.take() {
                    push_attribute(&mut attributes, previous, String::new());
                }
                pending = Some(word.to_ascii_lowercase());
                self_closing = false;
            }
            TagLexeme::Equals => {
                if let Some(attr_name) = pending.take() {
                    let value = attribute_value(&mut lexer);
                    push_attribute(&mut attributes, attr_name, value);
                }
                self_closing = false;
            }
            TagLexeme::Slash => self_closing = true,
            TagLexeme::Quoted(_) => self_closing = false,
        }
    }

    if let Some(last) = pending {
        push_attribute(&mut attributes, last, String::new());
    }

    Token::StartTag {
        name,
        attributes,
        self_closing,
    }
}

fn is_html_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Read the value following `=`. Unquoted values run to the next space and
/// may contain `/`; an unterminated quote runs to the end of the tag.
fn attribute_value<'src>(lexer: &mut Lexer<'src, TagLexeme<'src>>) -> String {
    let rest = lexer.remainder();
    let trimmed = rest.trim_start_matches(is_html_space);
    let skipped = rest.len() - trimmed.len();

    let (value, consumed) = match trimmed.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let body = &trimmed[1..];
            match body.find(quote) {
                Some(end) => (&body[..end], end + 2),
                None => (body, trimmed.len()),
            }
        }
        Some(_) => {
            let len = trimmed.find(is_html_space).unwrap_or(trimmed.len());
            (&trimmed[..len], len)
        }
        None => ("", 0),
    };

    lexer.bump(skipped + consumed);
    decode_entities(value).into_owned()
}

/// First occurrence of an attribute name wins
fn push_attribute(attributes: &mut Vec<Attribute>, name: String, value: String) {
    if !attributes.iter().any(|attr| attr.name == name) {
        attributes.push(Attribute::new(name, value));
    }
}
