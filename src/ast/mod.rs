//! AST node definitions for SQL statements
//!
//! A single heterogeneous [`Node`] enum covers statements, clauses,
//! expressions, and scalar leaves. Fields mirror the shapes handed over by
//! the parser: optional children are `Option<Box<Node>>` and are simply
//! skipped by the printer when absent, sequences are `Vec<Node>` visited in
//! order.

/// A single parse node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
    With(WithClause),
    CommonTableExpr(CommonTableExpr),
    ResTarget(ResTarget),
    ColumnRef(ColumnRef),
    /// The `*` wildcard marker.
    AllColumns,
    BinaryExpr(BinaryExpr),
    BoolExpr(BoolExpr),
    Constant(Constant),
    /// A bare identifier leaf (column-reference fields, rename lists, ...).
    Ident(String),
    Relation(Relation),
    Alias(Alias),
    FuncCall(FuncCall),
    SortBy(SortBy),
    /// Marker for `SELECT DISTINCT`.
    Distinct,
    IntoClause(IntoClause),
    OnConflict(OnConflictClause),
    Locking(LockingClause),
}

impl Node {
    /// Kind name used by diagnostics; never rendered as SQL text.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Select(_) => "SelectStmt",
            Node::Insert(_) => "InsertStmt",
            Node::Update(_) => "UpdateStmt",
            Node::Delete(_) => "DeleteStmt",
            Node::With(_) => "WithClause",
            Node::CommonTableExpr(_) => "CommonTableExpr",
            Node::ResTarget(_) => "ResTarget",
            Node::ColumnRef(_) => "ColumnRef",
            Node::AllColumns => "AllColumns",
            Node::BinaryExpr(_) => "BinaryExpr",
            Node::BoolExpr(_) => "BoolExpr",
            Node::Constant(_) => "Constant",
            Node::Ident(_) => "Ident",
            Node::Relation(_) => "Relation",
            Node::Alias(_) => "Alias",
            Node::FuncCall(_) => "FuncCall",
            Node::SortBy(_) => "SortBy",
            Node::Distinct => "Distinct",
            Node::IntoClause(_) => "IntoClause",
            Node::OnConflict(_) => "OnConflictClause",
            Node::Locking(_) => "LockingClause",
        }
    }
}

/// SELECT statement (also carries standalone `VALUES` row lists)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStmt {
    pub with_clause: Option<Box<Node>>,
    pub distinct_clause: Option<Box<Node>>,
    pub into_clause: Option<Box<Node>>,
    pub target_list: Vec<Node>,
    pub from_clause: Vec<Node>,
    pub where_clause: Option<Box<Node>>,
    pub group_clause: Vec<Node>,
    pub having_clause: Option<Box<Node>>,
    pub window_clause: Vec<Node>,
    pub values_lists: Vec<Vec<Node>>,
    pub sort_clause: Vec<Node>,
    pub limit_count: Option<Box<Node>>,
    pub limit_offset: Option<Box<Node>>,
    pub locking_clause: Vec<Node>,
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertStmt {
    pub relation: Option<Box<Node>>,
    /// Plain identifier nodes naming the target columns.
    pub cols: Vec<Node>,
    /// Nested SELECT (or VALUES-carrying SELECT) supplying the rows.
    pub select_stmt: Option<Box<Node>>,
    pub on_conflict_clause: Option<Box<Node>>,
    pub returning_list: Vec<Node>,
    pub with_clause: Option<Box<Node>>,
}

/// UPDATE statement
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateStmt {
    pub relation: Option<Box<Node>>,
    /// SET assignments as `ResTarget { name: column, val: expression }`.
    pub target_list: Vec<Node>,
    pub where_clause: Option<Box<Node>>,
    pub from_clause: Vec<Node>,
    pub returning_list: Vec<Node>,
    pub with_clause: Option<Box<Node>>,
}

/// DELETE statement
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteStmt {
    pub relation: Option<Box<Node>>,
    pub using_clause: Vec<Node>,
    pub where_clause: Option<Box<Node>>,
    pub returning_list: Vec<Node>,
    pub with_clause: Option<Box<Node>>,
}

/// WITH clause (CTE list)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<Node>,
}

/// A single CTE definition
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpr {
    pub ctename: String,
    pub aliascolnames: Vec<Node>,
    pub ctequery: Box<Node>,
}

/// A result target: an expression plus an optional display name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResTarget {
    pub name: Option<String>,
    pub val: Option<Box<Node>>,
}

/// A possibly-qualified column reference. Fields run schema-first down to
/// the leaf name; a trailing [`Node::AllColumns`] marks `rel.*`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnRef {
    pub fields: Vec<Node>,
}

/// Infix binary expression. A missing left operand encodes a unary
/// prefix operator such as `-x`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub lexpr: Option<Box<Node>>,
    pub name: String,
    pub rexpr: Option<Box<Node>>,
}

/// Boolean composite expression with a flattened operand list
#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr {
    pub boolop: BoolOp,
    pub args: Vec<Node>,
}

/// Boolean operator family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
    Not,
}

impl BoolOp {
    pub fn as_keyword(self) -> &'static str {
        match self {
            BoolOp::And => "AND",
            BoolOp::Or => "OR",
            BoolOp::Not => "NOT",
        }
    }
}

/// Constant literal
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    String(String),
    Integer(i64),
    Float(f64),
}

/// Relation reference with optional catalog/schema qualification
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relation {
    pub catalogname: Option<String>,
    pub schemaname: Option<String>,
    pub relname: String,
    pub alias: Option<Box<Node>>,
}

/// Alias with an optional column-rename list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Alias {
    pub aliasname: String,
    pub colnames: Vec<Node>,
}

/// Function call
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    pub funcname: String,
    pub args: Vec<Node>,
}

/// A single ORDER BY item
#[derive(Debug, Clone, PartialEq)]
pub struct SortBy {
    pub node: Box<Node>,
    pub direction: SortDirection,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Default,
    Asc,
    Desc,
}

/// SELECT ... INTO target
#[derive(Debug, Clone, PartialEq)]
pub struct IntoClause {
    pub rel: Box<Node>,
}

/// ON CONFLICT clause
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflictClause {
    /// Conflict-target columns, when spelled out.
    pub infer_cols: Vec<Node>,
    pub action: ConflictAction,
}

/// ON CONFLICT action
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    Nothing,
    /// DO UPDATE SET assignments as `ResTarget` nodes.
    Update(Vec<Node>),
}

/// Row-locking clause (FOR UPDATE / FOR SHARE)
#[derive(Debug, Clone, PartialEq)]
pub struct LockingClause {
    pub strength: LockStrength,
}

/// Lock strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStrength {
    Update,
    Share,
}
