//! Statement parsing
//!
//! Parses SQL statements (SELECT, INSERT, UPDATE, DELETE, and the WITH
//! prefix shared by all four) into [`Node`] trees.

use crate::ast::*;
use crate::parser::expr::{parse_expression, parse_identifier, Parser};
use crate::parser::lexer::Token;
use crate::Result;

/// Parse a single SQL statement from tokens
pub fn parse_statement(parser: &mut Parser) -> Result<Node> {
    match parser.current() {
        Token::Select | Token::Values => parse_select_statement(parser).map(Node::Select),
        Token::With => parse_with_statement(parser),
        Token::Insert => parse_insert_statement(parser).map(Node::Insert),
        Token::Update => parse_update_statement(parser).map(Node::Update),
        Token::Delete => parse_delete_statement(parser).map(Node::Delete),
        other => Err(parser.error(format!("Unexpected token: {other:?}"))),
    }
}

/// Parse a WITH-prefixed statement and attach the clause to its body
fn parse_with_statement(parser: &mut Parser) -> Result<Node> {
    parser.expect(&Token::With)?;
    let recursive = parser.consume(&Token::Recursive);

    let mut ctes = Vec::new();
    loop {
        ctes.push(parse_cte(parser)?);
        if !parser.consume(&Token::Comma) {
            break;
        }
    }
    let with = Box::new(Node::With(WithClause { recursive, ctes }));

    match parser.current() {
        Token::Select | Token::Values => {
            let mut stmt = parse_select_statement(parser)?;
            stmt.with_clause = Some(with);
            Ok(Node::Select(stmt))
        }
        Token::Insert => {
            let mut stmt = parse_insert_statement(parser)?;
            stmt.with_clause = Some(with);
            Ok(Node::Insert(stmt))
        }
        Token::Update => {
            let mut stmt = parse_update_statement(parser)?;
            stmt.with_clause = Some(with);
            Ok(Node::Update(stmt))
        }
        Token::Delete => {
            let mut stmt = parse_delete_statement(parser)?;
            stmt.with_clause = Some(with);
            Ok(Node::Delete(stmt))
        }
        other => Err(parser.error(format!("Expected statement after WITH, found {other:?}"))),
    }
}

/// Parse a single CTE
fn parse_cte(parser: &mut Parser) -> Result<Node> {
    let ctename = parse_identifier(parser)?;

    let mut aliascolnames = Vec::new();
    if parser.consume(&Token::LParen) {
        loop {
            aliascolnames.push(Node::Ident(parse_identifier(parser)?));
            if !parser.consume(&Token::Comma) {
                break;
            }
        }
        parser.expect(&Token::RParen)?;
    }

    parser.expect(&Token::As)?;
    parser.expect(&Token::LParen)?;
    let ctequery = Box::new(parse_statement(parser)?);
    parser.expect(&Token::RParen)?;

    Ok(Node::CommonTableExpr(CommonTableExpr {
        ctename,
        aliascolnames,
        ctequery,
    }))
}

/// Parse SELECT statement (or a standalone VALUES list)
pub fn parse_select_statement(parser: &mut Parser) -> Result<SelectStmt> {
    let mut stmt = SelectStmt::default();

    if parser.check(&Token::Values) {
        stmt.values_lists = parse_values_lists(parser)?;
        return Ok(stmt);
    }

    parser.expect(&Token::Select)?;

    if parser.consume(&Token::Distinct) {
        stmt.distinct_clause = Some(Box::new(Node::Distinct));
    }

    stmt.target_list = parse_target_list(parser)?;

    if parser.consume(&Token::Into) {
        let rel = Box::new(parse_relation(parser)?);
        stmt.into_clause = Some(Box::new(Node::IntoClause(IntoClause { rel })));
    }

    if parser.consume(&Token::From) {
        stmt.from_clause = parse_relation_list(parser)?;
    }

    if parser.consume(&Token::Where) {
        stmt.where_clause = Some(Box::new(parse_expression(parser)?));
    }

    if parser.consume(&Token::Group) {
        parser.expect(&Token::By)?;
        loop {
            stmt.group_clause.push(parse_expression(parser)?);
            if !parser.consume(&Token::Comma) {
                break;
            }
        }
    }

    if parser.consume(&Token::Having) {
        stmt.having_clause = Some(Box::new(parse_expression(parser)?));
    }

    if parser.consume(&Token::Order) {
        parser.expect(&Token::By)?;
        loop {
            stmt.sort_clause.push(parse_sort_by(parser)?);
            if !parser.consume(&Token::Comma) {
                break;
            }
        }
    }

    if parser.consume(&Token::Limit) {
        stmt.limit_count = Some(Box::new(parse_expression(parser)?));
    }
    if parser.consume(&Token::Offset) {
        stmt.limit_offset = Some(Box::new(parse_expression(parser)?));
    }

    if parser.consume(&Token::For) {
        let strength = if parser.consume(&Token::Update) {
            LockStrength::Update
        } else if parser.consume(&Token::Share) {
            LockStrength::Share
        } else {
            return Err(parser.error(format!(
                "Expected UPDATE or SHARE after FOR, found {:?}",
                parser.current()
            )));
        };
        stmt.locking_clause
            .push(Node::Locking(LockingClause { strength }));
    }

    Ok(stmt)
}

/// Parse one or more parenthesized VALUES rows
fn parse_values_lists(parser: &mut Parser) -> Result<Vec<Vec<Node>>> {
    parser.expect(&Token::Values)?;
    let mut rows = Vec::new();
    loop {
        parser.expect(&Token::LParen)?;
        let mut row = Vec::new();
        loop {
            row.push(parse_expression(parser)?);
            if !parser.consume(&Token::Comma) {
                break;
            }
        }
        parser.expect(&Token::RParen)?;
        rows.push(row);
        if !parser.consume(&Token::Comma) {
            break;
        }
    }
    Ok(rows)
}

/// Parse the SELECT target list into ResTarget nodes
fn parse_target_list(parser: &mut Parser) -> Result<Vec<Node>> {
    let mut targets = Vec::new();
    loop {
        targets.push(parse_res_target(parser)?);
        if !parser.consume(&Token::Comma) {
            break;
        }
    }
    Ok(targets)
}

/// Parse one result target: an expression with an optional alias
fn parse_res_target(parser: &mut Parser) -> Result<Node> {
    let val = parse_expression(parser)?;

    let name = if parser.consume(&Token::As) {
        Some(parse_identifier(parser)?)
    } else if let Token::Ident(alias) = parser.current() {
        // Bare alias without AS
        let alias = alias.clone();
        parser.advance();
        Some(alias)
    } else {
        None
    };

    Ok(Node::ResTarget(ResTarget {
        name,
        val: Some(Box::new(val)),
    }))
}

/// Parse a comma-separated relation list
fn parse_relation_list(parser: &mut Parser) -> Result<Vec<Node>> {
    let mut relations = Vec::new();
    loop {
        relations.push(parse_relation(parser)?);
        if !parser.consume(&Token::Comma) {
            break;
        }
    }
    Ok(relations)
}

/// Parse a possibly catalog/schema-qualified relation name
fn parse_qualified_name(parser: &mut Parser) -> Result<Relation> {
    let mut parts = vec![parse_identifier(parser)?];
    while parser.consume(&Token::Dot) {
        parts.push(parse_identifier(parser)?);
        if parts.len() > 3 {
            return Err(parser.error("Too many qualifiers in relation name".to_string()));
        }
    }

    // The final part is always the relation name.
    let relname = parts.pop().unwrap_or_default();
    Ok(Relation {
        schemaname: parts.pop(),
        catalogname: parts.pop(),
        relname,
        alias: None,
    })
}

/// Parse a relation reference: a qualified name plus an optional alias with
/// a column-rename list
fn parse_relation(parser: &mut Parser) -> Result<Node> {
    let mut relation = parse_qualified_name(parser)?;

    let explicit_as = parser.consume(&Token::As);
    if explicit_as || matches!(parser.current(), Token::Ident(_)) {
        let aliasname = parse_identifier(parser)?;
        let mut colnames = Vec::new();
        if parser.consume(&Token::LParen) {
            loop {
                colnames.push(Node::Ident(parse_identifier(parser)?));
                if !parser.consume(&Token::Comma) {
                    break;
                }
            }
            parser.expect(&Token::RParen)?;
        }
        relation.alias = Some(Box::new(Node::Alias(Alias { aliasname, colnames })));
    }

    Ok(Node::Relation(relation))
}

/// Parse a single ORDER BY item
fn parse_sort_by(parser: &mut Parser) -> Result<Node> {
    let node = Box::new(parse_expression(parser)?);
    let direction = if parser.consume(&Token::Asc) {
        SortDirection::Asc
    } else if parser.consume(&Token::Desc) {
        SortDirection::Desc
    } else {
        SortDirection::Default
    };
    Ok(Node::SortBy(SortBy { node, direction }))
}

/// Parse INSERT statement
pub fn parse_insert_statement(parser: &mut Parser) -> Result<InsertStmt> {
    parser.expect(&Token::Insert)?;
    parser.expect(&Token::Into)?;

    let mut stmt = InsertStmt {
        relation: Some(Box::new(parse_relation_name_only(parser)?)),
        ..InsertStmt::default()
    };

    if parser.consume(&Token::LParen) {
        loop {
            stmt.cols.push(Node::Ident(parse_identifier(parser)?));
            if !parser.consume(&Token::Comma) {
                break;
            }
        }
        parser.expect(&Token::RParen)?;
    }

    if parser.check(&Token::Values) {
        let source = SelectStmt {
            values_lists: parse_values_lists(parser)?,
            ..SelectStmt::default()
        };
        stmt.select_stmt = Some(Box::new(Node::Select(source)));
    } else if parser.check(&Token::Select) {
        let source = parse_select_statement(parser)?;
        stmt.select_stmt = Some(Box::new(Node::Select(source)));
    }

    if parser.consume(&Token::On) {
        parser.expect(&Token::Conflict)?;
        stmt.on_conflict_clause = Some(Box::new(parse_on_conflict(parser)?));
    }

    if parser.consume(&Token::Returning) {
        stmt.returning_list = parse_target_list(parser)?;
    }

    Ok(stmt)
}

/// Parse the remainder of an ON CONFLICT clause (after `ON CONFLICT`)
fn parse_on_conflict(parser: &mut Parser) -> Result<Node> {
    let mut infer_cols = Vec::new();
    if parser.consume(&Token::LParen) {
        loop {
            infer_cols.push(Node::Ident(parse_identifier(parser)?));
            if !parser.consume(&Token::Comma) {
                break;
            }
        }
        parser.expect(&Token::RParen)?;
    }

    parser.expect(&Token::Do)?;
    let action = if parser.consume(&Token::Nothing) {
        ConflictAction::Nothing
    } else if parser.consume(&Token::Update) {
        parser.expect(&Token::Set)?;
        ConflictAction::Update(parse_set_list(parser)?)
    } else {
        return Err(parser.error(format!(
            "Expected NOTHING or UPDATE after DO, found {:?}",
            parser.current()
        )));
    };

    Ok(Node::OnConflict(OnConflictClause { infer_cols, action }))
}

/// Parse UPDATE statement
pub fn parse_update_statement(parser: &mut Parser) -> Result<UpdateStmt> {
    parser.expect(&Token::Update)?;

    let mut stmt = UpdateStmt {
        relation: Some(Box::new(parse_relation(parser)?)),
        ..UpdateStmt::default()
    };

    parser.expect(&Token::Set)?;
    stmt.target_list = parse_set_list(parser)?;

    if parser.consume(&Token::From) {
        stmt.from_clause = parse_relation_list(parser)?;
    }

    if parser.consume(&Token::Where) {
        stmt.where_clause = Some(Box::new(parse_expression(parser)?));
    }

    if parser.consume(&Token::Returning) {
        stmt.returning_list = parse_target_list(parser)?;
    }

    Ok(stmt)
}

/// Parse SET assignments into ResTarget nodes (name = column, val = value)
fn parse_set_list(parser: &mut Parser) -> Result<Vec<Node>> {
    let mut targets = Vec::new();
    loop {
        let name = parse_identifier(parser)?;
        parser.expect(&Token::Eq)?;
        let val = parse_expression(parser)?;
        targets.push(Node::ResTarget(ResTarget {
            name: Some(name),
            val: Some(Box::new(val)),
        }));
        if !parser.consume(&Token::Comma) {
            break;
        }
    }
    Ok(targets)
}

/// Parse DELETE statement
pub fn parse_delete_statement(parser: &mut Parser) -> Result<DeleteStmt> {
    parser.expect(&Token::Delete)?;
    parser.expect(&Token::From)?;

    let mut stmt = DeleteStmt {
        relation: Some(Box::new(parse_relation(parser)?)),
        ..DeleteStmt::default()
    };

    if parser.consume(&Token::Using) {
        stmt.using_clause = parse_relation_list(parser)?;
    }

    if parser.consume(&Token::Where) {
        stmt.where_clause = Some(Box::new(parse_expression(parser)?));
    }

    if parser.consume(&Token::Returning) {
        stmt.returning_list = parse_target_list(parser)?;
    }

    Ok(stmt)
}

/// Parse an unaliased relation name (INSERT targets take no alias)
fn parse_relation_name_only(parser: &mut Parser) -> Result<Node> {
    parse_qualified_name(parser).map(Node::Relation)
}
