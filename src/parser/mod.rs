//! SQL parsing: hand-written lexer plus recursive-descent statement parser
//!
//! The printer consumes the [`Node`] trees produced here through the shape
//! contract in `ast`; it never looks back at the source text.

pub mod expr;
pub mod lexer;
pub mod stmt;

use crate::ast::Node;
use crate::error::{Error, Result};
use expr::Parser;
use lexer::{tokenize, Token};

/// Parse a single SQL statement into its AST
pub fn parse(input: &str) -> Result<Node> {
    let tokens = tokenize(input)?;

    let mut parser = Parser::new(&tokens);
    if parser.is_eof() {
        return Err(Error::ParseError {
            message: "Empty input".to_string(),
            span: None,
        });
    }

    let stmt = stmt::parse_statement(&mut parser)?;

    // Only a trailing semicolon may follow the statement.
    while parser.check(&Token::Semicolon) {
        parser.advance();
    }
    if !parser.is_eof() {
        return Err(parser.error(format!(
            "Unexpected token after statement: {:?}",
            parser.current()
        )));
    }

    Ok(stmt)
}

/// Parse a `;`-separated sequence of SQL statements
pub fn parse_statements(input: &str) -> Result<Vec<Node>> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(&tokens);
    let mut statements = Vec::new();

    while !parser.is_eof() {
        while parser.check(&Token::Semicolon) {
            parser.advance();
        }
        if parser.is_eof() {
            break;
        }

        statements.push(stmt::parse_statement(&mut parser)?);

        if !parser.check(&Token::Semicolon) && !parser.is_eof() {
            return Err(parser.error(format!(
                "Unexpected token after statement: {:?}",
                parser.current()
            )));
        }
    }

    Ok(statements)
}
