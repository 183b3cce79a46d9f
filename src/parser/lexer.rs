//! SQL tokenization
//!
//! Breaks SQL input into tokens. Unquoted identifiers are folded to
//! lowercase; keywords are matched case-insensitively. Comments are consumed
//! and discarded since the output is canonical, not a reprint of the source.

use crate::error::Error;
use crate::Result;

/// Token types for the SQL lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Select,
    From,
    Where,
    And,
    Or,
    Not,
    As,
    With,
    Recursive,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    Limit,
    Offset,
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Using,
    Returning,
    Distinct,
    On,
    Conflict,
    Do,
    Nothing,
    For,
    Share,

    // Identifiers and literals
    Ident(String),
    StringLiteral(String),
    IntegerLiteral(i64),
    FloatLiteral(f64),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Concat, // ||

    // Punctuation
    Comma,
    Dot,
    Semicolon,
    LParen,
    RParen,

    // Special
    Eof,
}

/// A token plus its `(offset, len)` byte span in the input
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: (usize, usize),
}

fn keyword(word: &str) -> Option<Token> {
    let token = match word {
        "select" => Token::Select,
        "from" => Token::From,
        "where" => Token::Where,
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "as" => Token::As,
        "with" => Token::With,
        "recursive" => Token::Recursive,
        "group" => Token::Group,
        "by" => Token::By,
        "having" => Token::Having,
        "order" => Token::Order,
        "asc" => Token::Asc,
        "desc" => Token::Desc,
        "limit" => Token::Limit,
        "offset" => Token::Offset,
        "insert" => Token::Insert,
        "into" => Token::Into,
        "values" => Token::Values,
        "update" => Token::Update,
        "set" => Token::Set,
        "delete" => Token::Delete,
        "using" => Token::Using,
        "returning" => Token::Returning,
        "distinct" => Token::Distinct,
        "on" => Token::On,
        "conflict" => Token::Conflict,
        "do" => Token::Do,
        "nothing" => Token::Nothing,
        "for" => Token::For,
        "share" => Token::Share,
        _ => return None,
    };
    Some(token)
}

/// Tokenize SQL input
pub fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let c = bytes[pos] as char;

        // Whitespace
        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        // Single-line comment
        if c == '-' && bytes.get(pos + 1) == Some(&b'-') {
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
            continue;
        }

        // Multi-line comment
        if c == '/' && bytes.get(pos + 1) == Some(&b'*') {
            pos += 2;
            loop {
                if pos + 1 >= bytes.len() {
                    return Err(Error::ParseError {
                        message: "Unterminated block comment".to_string(),
                        span: Some((start, 2)),
                    });
                }
                if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                    pos += 2;
                    break;
                }
                pos += 1;
            }
            continue;
        }

        // String literal, '' escapes a quote
        if c == '\'' {
            pos += 1;
            let mut value = String::new();
            let mut seg_start = pos;
            loop {
                if pos >= bytes.len() {
                    return Err(Error::ParseError {
                        message: "Unterminated string literal".to_string(),
                        span: Some((start, pos - start)),
                    });
                }
                if bytes[pos] == b'\'' {
                    value.push_str(&input[seg_start..pos]);
                    if bytes.get(pos + 1) == Some(&b'\'') {
                        value.push('\'');
                        pos += 2;
                        seg_start = pos;
                        continue;
                    }
                    pos += 1;
                    break;
                }
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::StringLiteral(value),
                span: (start, pos - start),
            });
            continue;
        }

        // Quoted identifier, case preserved
        if c == '"' {
            pos += 1;
            let ident_start = pos;
            while pos < bytes.len() && bytes[pos] != b'"' {
                pos += 1;
            }
            if pos >= bytes.len() {
                return Err(Error::ParseError {
                    message: "Unterminated quoted identifier".to_string(),
                    span: Some((start, pos - start)),
                });
            }
            let name = input[ident_start..pos].to_string();
            pos += 1;
            tokens.push(Spanned {
                token: Token::Ident(name),
                span: (start, pos - start),
            });
            continue;
        }

        // Number
        if c.is_ascii_digit() {
            while pos < bytes.len() && (bytes[pos] as char).is_ascii_digit() {
                pos += 1;
            }
            let mut is_float = false;
            if pos < bytes.len()
                && bytes[pos] == b'.'
                && bytes.get(pos + 1).is_some_and(|b| (*b as char).is_ascii_digit())
            {
                is_float = true;
                pos += 1;
                while pos < bytes.len() && (bytes[pos] as char).is_ascii_digit() {
                    pos += 1;
                }
            }
            let text = &input[start..pos];
            let token = if is_float {
                Token::FloatLiteral(text.parse().map_err(|_| Error::ParseError {
                    message: format!("Invalid numeric literal: {text}"),
                    span: Some((start, pos - start)),
                })?)
            } else {
                Token::IntegerLiteral(text.parse().map_err(|_| Error::ParseError {
                    message: format!("Integer literal out of range: {text}"),
                    span: Some((start, pos - start)),
                })?)
            };
            tokens.push(Spanned {
                token,
                span: (start, pos - start),
            });
            continue;
        }

        // Identifier or keyword
        if c.is_ascii_alphabetic() || c == '_' {
            while pos < bytes.len() {
                let b = bytes[pos] as char;
                if b.is_ascii_alphanumeric() || b == '_' || b == '$' {
                    pos += 1;
                } else {
                    break;
                }
            }
            let word = input[start..pos].to_lowercase();
            let token = keyword(&word).unwrap_or(Token::Ident(word));
            tokens.push(Spanned {
                token,
                span: (start, pos - start),
            });
            continue;
        }

        // Operators and punctuation
        let (token, len) = match c {
            '+' => (Token::Plus, 1),
            '-' => (Token::Minus, 1),
            '*' => (Token::Star, 1),
            '/' => (Token::Slash, 1),
            '%' => (Token::Percent, 1),
            '=' => (Token::Eq, 1),
            '<' => match bytes.get(pos + 1) {
                Some(b'=') => (Token::LtEq, 2),
                Some(b'>') => (Token::NotEq, 2),
                _ => (Token::Lt, 1),
            },
            '>' => match bytes.get(pos + 1) {
                Some(b'=') => (Token::GtEq, 2),
                _ => (Token::Gt, 1),
            },
            '!' => match bytes.get(pos + 1) {
                Some(b'=') => (Token::NotEq, 2),
                _ => {
                    return Err(Error::ParseError {
                        message: "Unexpected character '!'".to_string(),
                        span: Some((start, 1)),
                    })
                }
            },
            '|' => match bytes.get(pos + 1) {
                Some(b'|') => (Token::Concat, 2),
                _ => {
                    return Err(Error::ParseError {
                        message: "Unexpected character '|'".to_string(),
                        span: Some((start, 1)),
                    })
                }
            },
            ',' => (Token::Comma, 1),
            '.' => (Token::Dot, 1),
            ';' => (Token::Semicolon, 1),
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            _ => {
                // Fall back to char-based decoding for non-ASCII input.
                let other = input[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(Error::ParseError {
                    message: format!("Unexpected character '{other}'"),
                    span: Some((start, other.len_utf8())),
                });
            }
        };
        pos += len;
        tokens.push(Spanned {
            token,
            span: (start, len),
        });
    }

    tokens.push(Spanned {
        token: Token::Eof,
        span: (input.len(), 0),
    });
    Ok(tokens)
}
