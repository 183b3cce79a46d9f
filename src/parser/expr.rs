//! Expression parsing
//!
//! Token-stream cursor plus a precedence-climbing expression grammar. The
//! grammar flattens `AND`/`OR` chains into a single operand list and encodes
//! unary minus as a binary expression with no left operand.

use crate::ast::{BinaryExpr, BoolExpr, BoolOp, ColumnRef, Constant, FuncCall, Node};
use crate::error::Error;
use crate::parser::lexer::{Spanned, Token};
use crate::Result;

/// Cursor over the lexed token stream
pub struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Current token without consuming it
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].token
    }

    /// Byte span of the current token
    pub fn span(&self) -> (usize, usize) {
        self.tokens[self.pos.min(self.tokens.len() - 1)].span
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    /// Check whether the current token has the same discriminant as `token`
    pub fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(token)
    }

    /// Consume the current token when it matches
    pub fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, token: &Token) -> Result<()> {
        if self.consume(token) {
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected {:?}, found {:?}",
                token,
                self.current()
            )))
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Parse error positioned at the current token
    pub fn error(&self, message: String) -> Error {
        Error::ParseError {
            message,
            span: Some(self.span()),
        }
    }
}

/// Parse an identifier token
pub fn parse_identifier(parser: &mut Parser) -> Result<String> {
    match parser.current() {
        Token::Ident(name) => {
            let name = name.clone();
            parser.advance();
            Ok(name)
        }
        other => Err(parser.error(format!("Expected identifier, found {other:?}"))),
    }
}

/// Parse an expression
pub fn parse_expression(parser: &mut Parser) -> Result<Node> {
    parse_or(parser)
}

fn parse_or(parser: &mut Parser) -> Result<Node> {
    let first = parse_and(parser)?;
    if !parser.check(&Token::Or) {
        return Ok(first);
    }
    let mut args = vec![first];
    while parser.consume(&Token::Or) {
        args.push(parse_and(parser)?);
    }
    Ok(Node::BoolExpr(BoolExpr {
        boolop: BoolOp::Or,
        args,
    }))
}

fn parse_and(parser: &mut Parser) -> Result<Node> {
    let first = parse_not(parser)?;
    if !parser.check(&Token::And) {
        return Ok(first);
    }
    let mut args = vec![first];
    while parser.consume(&Token::And) {
        args.push(parse_not(parser)?);
    }
    Ok(Node::BoolExpr(BoolExpr {
        boolop: BoolOp::And,
        args,
    }))
}

fn parse_not(parser: &mut Parser) -> Result<Node> {
    if parser.consume(&Token::Not) {
        let arg = parse_not(parser)?;
        return Ok(Node::BoolExpr(BoolExpr {
            boolop: BoolOp::Not,
            args: vec![arg],
        }));
    }
    parse_comparison(parser)
}

fn comparison_op(token: &Token) -> Option<&'static str> {
    match token {
        Token::Eq => Some("="),
        Token::NotEq => Some("<>"),
        Token::Lt => Some("<"),
        Token::LtEq => Some("<="),
        Token::Gt => Some(">"),
        Token::GtEq => Some(">="),
        _ => None,
    }
}

fn parse_comparison(parser: &mut Parser) -> Result<Node> {
    let left = parse_additive(parser)?;
    if let Some(op) = comparison_op(parser.current()) {
        parser.advance();
        let right = parse_additive(parser)?;
        return Ok(Node::BinaryExpr(BinaryExpr {
            lexpr: Some(Box::new(left)),
            name: op.to_string(),
            rexpr: Some(Box::new(right)),
        }));
    }
    Ok(left)
}

fn parse_additive(parser: &mut Parser) -> Result<Node> {
    let mut left = parse_multiplicative(parser)?;
    loop {
        let op = match parser.current() {
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Concat => "||",
            _ => break,
        };
        parser.advance();
        let right = parse_multiplicative(parser)?;
        left = Node::BinaryExpr(BinaryExpr {
            lexpr: Some(Box::new(left)),
            name: op.to_string(),
            rexpr: Some(Box::new(right)),
        });
    }
    Ok(left)
}

fn parse_multiplicative(parser: &mut Parser) -> Result<Node> {
    let mut left = parse_unary(parser)?;
    loop {
        let op = match parser.current() {
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            _ => break,
        };
        parser.advance();
        let right = parse_unary(parser)?;
        left = Node::BinaryExpr(BinaryExpr {
            lexpr: Some(Box::new(left)),
            name: op.to_string(),
            rexpr: Some(Box::new(right)),
        });
    }
    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Node> {
    if parser.consume(&Token::Minus) {
        let expr = parse_unary(parser)?;
        return Ok(Node::BinaryExpr(BinaryExpr {
            lexpr: None,
            name: "-".to_string(),
            rexpr: Some(Box::new(expr)),
        }));
    }
    if parser.consume(&Token::Plus) {
        return parse_unary(parser);
    }
    parse_primary(parser)
}

fn parse_primary(parser: &mut Parser) -> Result<Node> {
    match parser.current().clone() {
        Token::StringLiteral(value) => {
            parser.advance();
            Ok(Node::Constant(Constant::String(value)))
        }
        Token::IntegerLiteral(value) => {
            parser.advance();
            Ok(Node::Constant(Constant::Integer(value)))
        }
        Token::FloatLiteral(value) => {
            parser.advance();
            Ok(Node::Constant(Constant::Float(value)))
        }
        // Grouping is not represented in the tree; the canonical output does
        // not re-emit parentheses around sub-expressions.
        Token::LParen => {
            parser.advance();
            let inner = parse_expression(parser)?;
            parser.expect(&Token::RParen)?;
            Ok(inner)
        }
        Token::Star => {
            parser.advance();
            Ok(Node::ColumnRef(ColumnRef {
                fields: vec![Node::AllColumns],
            }))
        }
        Token::Ident(_) => parse_column_or_call(parser),
        other => Err(parser.error(format!("Unexpected token in expression: {other:?}"))),
    }
}

/// Parse a column reference (`a`, `a.b.c`, `a.*`) or a function call
fn parse_column_or_call(parser: &mut Parser) -> Result<Node> {
    let first = parse_identifier(parser)?;

    if parser.consume(&Token::LParen) {
        let mut args = Vec::new();
        if !parser.check(&Token::RParen) {
            loop {
                if parser.consume(&Token::Star) {
                    args.push(Node::AllColumns);
                } else {
                    args.push(parse_expression(parser)?);
                }
                if !parser.consume(&Token::Comma) {
                    break;
                }
            }
        }
        parser.expect(&Token::RParen)?;
        return Ok(Node::FuncCall(FuncCall {
            funcname: first,
            args,
        }));
    }

    let mut fields = vec![Node::Ident(first)];
    while parser.consume(&Token::Dot) {
        if parser.consume(&Token::Star) {
            fields.push(Node::AllColumns);
            break;
        }
        fields.push(Node::Ident(parse_identifier(parser)?));
    }
    Ok(Node::ColumnRef(ColumnRef { fields }))
}
