//! SQL pretty-printing logic
//!
//! One depth-first pass over the AST: [`PrettyPrinter::visit`] routes each
//! node to the rule for its kind, and each rule emits literal tokens into
//! the [`Emitter`] and recurses into child nodes. Kinds without a rule are
//! recorded on a diagnostic side channel and contribute no tokens, so a
//! render never fails on an unformattable sub-tree.

pub mod printer;
pub mod rules;

use crate::ast::*;
use crate::parser;
use crate::Result;
use printer::Emitter;

/// A node kind the printer had no rule for, reported out-of-band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedNode {
    pub kind: &'static str,
}

/// Result of one render pass: the canonical text plus any node kinds that
/// were skipped because no formatting rule exists for them
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub text: String,
    pub unrecognized: Vec<UnrecognizedNode>,
}

/// Parse SQL and render every statement in sequence
pub fn render_sql(input: &str) -> Result<Rendered> {
    let statements = parser::parse_statements(input)?;
    Ok(render_nodes(&statements))
}

/// Render already-parsed nodes
pub fn render_nodes(nodes: &[Node]) -> Rendered {
    let mut printer = PrettyPrinter::new();
    for node in nodes {
        printer.visit(node);
    }
    printer.finish()
}

/// AST printer: dispatcher plus one formatting rule per node kind
pub struct PrettyPrinter {
    out: Emitter,
    unrecognized: Vec<UnrecognizedNode>,
}

impl PrettyPrinter {
    pub fn new() -> Self {
        Self {
            out: Emitter::new(),
            unrecognized: Vec::new(),
        }
    }

    /// Printer with a custom indentation width
    pub fn with_indent(width: usize) -> Self {
        Self {
            out: Emitter::with_indent(width),
            unrecognized: Vec::new(),
        }
    }

    pub fn finish(self) -> Rendered {
        Rendered {
            text: self.out.finish(),
            unrecognized: self.unrecognized,
        }
    }

    /// Dispatch a node to the rule for its kind. Every kind is listed
    /// explicitly; adding a variant forces a decision here.
    pub fn visit(&mut self, node: &Node) {
        match node {
            Node::Select(stmt) => self.select_stmt(stmt),
            Node::Insert(stmt) => self.insert_stmt(stmt),
            Node::Update(stmt) => self.update_stmt(stmt),
            Node::Delete(stmt) => self.delete_stmt(stmt),
            Node::With(with) => self.with_clause(with),
            Node::ResTarget(target) => self.res_target(target),
            Node::ColumnRef(column) => self.column_ref(column),
            Node::AllColumns => self.out.emit("*"),
            Node::BinaryExpr(expr) => self.binary_expr(expr),
            Node::BoolExpr(expr) => self.bool_expr(expr),
            Node::Constant(value) => self.constant(value),
            Node::Ident(name) => self.out.emit(name),
            Node::Relation(relation) => self.relation(relation),
            Node::Alias(alias) => self.alias(alias),
            // No rules yet for these kinds; the fallback reports them and
            // the traversal carries on around the gap.
            Node::CommonTableExpr(_)
            | Node::FuncCall(_)
            | Node::SortBy(_)
            | Node::Distinct
            | Node::IntoClause(_)
            | Node::OnConflict(_)
            | Node::Locking(_) => self.fallback(node),
        }
    }

    fn visit_opt(&mut self, node: Option<&Node>) {
        if let Some(node) = node {
            self.visit(node);
        }
    }

    fn visit_all(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.visit(node);
        }
    }

    /// Fallback rule: no tokens, one diagnostic
    fn fallback(&mut self, node: &Node) {
        self.unrecognized.push(UnrecognizedNode { kind: node.kind() });
    }

    fn kw(&mut self, keyword: &str) {
        self.out.emit(&rules::format_keyword(keyword));
    }

    fn select_stmt(&mut self, stmt: &SelectStmt) {
        self.visit_opt(stmt.with_clause.as_deref());
        self.kw("SELECT");
        self.out.indent();
        self.out.break_line();
        self.visit_opt(stmt.distinct_clause.as_deref());
        self.visit_opt(stmt.into_clause.as_deref());
        self.visit_all(&stmt.target_list);
        self.out.dedent();
        self.out.break_line();

        if !stmt.from_clause.is_empty() {
            self.kw("FROM");
            self.out.indent();
            self.out.break_line();
            self.visit_all(&stmt.from_clause);
            self.out.dedent();
            self.out.break_line();
        }

        if let Some(where_clause) = &stmt.where_clause {
            self.kw("WHERE");
            self.out.indent();
            self.out.break_line();
            self.visit(where_clause);
            self.out.dedent();
            self.out.break_line();
        }

        if !stmt.group_clause.is_empty() {
            self.kw("GROUP BY");
            self.visit_all(&stmt.group_clause);
        }

        if let Some(having) = &stmt.having_clause {
            self.kw("HAVING");
            self.visit(having);
        }

        self.visit_all(&stmt.window_clause);

        for row in &stmt.values_lists {
            self.visit_all(row);
        }

        if !stmt.sort_clause.is_empty() {
            self.kw("ORDER BY");
            self.visit_all(&stmt.sort_clause);
        }

        // LIMIT is gated on the offset expression and renders it; the
        // parsed limit count has no rendering yet.
        if stmt.limit_offset.is_some() {
            self.kw("LIMIT");
            self.visit_opt(stmt.limit_offset.as_deref());
        }

        self.visit_all(&stmt.locking_clause);
    }

    fn insert_stmt(&mut self, stmt: &InsertStmt) {
        self.kw("INSERT");
        self.visit_opt(stmt.relation.as_deref());
        self.visit_all(&stmt.cols);
        self.visit_opt(stmt.select_stmt.as_deref());
        self.visit_opt(stmt.on_conflict_clause.as_deref());
        self.visit_all(&stmt.returning_list);
        self.visit_opt(stmt.with_clause.as_deref());
    }

    fn update_stmt(&mut self, stmt: &UpdateStmt) {
        self.kw("UPDATE");
        self.visit_opt(stmt.relation.as_deref());
        self.visit_all(&stmt.target_list);
        self.visit_opt(stmt.where_clause.as_deref());
        self.visit_all(&stmt.from_clause);
        self.visit_all(&stmt.returning_list);
        self.visit_opt(stmt.with_clause.as_deref());
    }

    fn delete_stmt(&mut self, stmt: &DeleteStmt) {
        self.kw("DELETE FROM");
        self.visit_opt(stmt.relation.as_deref());
        self.visit_all(&stmt.using_clause);
        self.visit_opt(stmt.where_clause.as_deref());
        self.visit_all(&stmt.returning_list);
        self.visit_opt(stmt.with_clause.as_deref());
    }

    fn with_clause(&mut self, with: &WithClause) {
        self.kw("WITH");
        // The RECURSIVE flag is accepted by the parser but has no
        // rendering yet.
        self.visit_all(&with.ctes);
    }

    fn res_target(&mut self, target: &ResTarget) {
        self.visit_opt(target.val.as_deref());
        if let Some(name) = &target.name {
            self.out.emit(&format!("AS {name}"));
        }
    }

    /// Field components are visited back to back; each identifier leaf
    /// brings its own trailing space, no separator is inserted between them.
    fn column_ref(&mut self, column: &ColumnRef) {
        self.visit_all(&column.fields);
    }

    fn binary_expr(&mut self, expr: &BinaryExpr) {
        self.visit_opt(expr.lexpr.as_deref());
        self.out.emit(&expr.name);
        self.visit_opt(expr.rexpr.as_deref());
    }

    /// Operands first, then the operator keyword.
    fn bool_expr(&mut self, expr: &BoolExpr) {
        self.visit_all(&expr.args);
        self.kw(expr.boolop.as_keyword());
    }

    fn constant(&mut self, value: &Constant) {
        match value {
            Constant::String(text) => self.out.emit(text),
            Constant::Integer(number) => self.out.emit(&number.to_string()),
            Constant::Float(number) => self.out.emit(&number.to_string()),
        }
    }

    fn relation(&mut self, relation: &Relation) {
        let mut name = relation.relname.clone();
        if let Some(schema) = &relation.schemaname {
            name = format!("{schema}.{name}");
        }
        if let Some(catalog) = &relation.catalogname {
            name = format!("{catalog}.{name}");
        }
        self.out.emit(&name);

        if let Some(alias) = &relation.alias {
            self.kw("AS");
            self.visit(alias);
        }
    }

    fn alias(&mut self, alias: &Alias) {
        self.out.emit(&alias.aliasname);
        if !alias.colnames.is_empty() {
            self.out.emit_bare("(");
            self.visit_all(&alias.colnames);
            self.out.emit(")");
        }
    }
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new()
    }
}
