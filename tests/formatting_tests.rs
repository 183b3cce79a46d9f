//! Formatting tests for sqlpretty
//!
//! End-to-end rendering: parse SQL text, walk the tree, compare the exact
//! canonical output, including the indentation and trailing-space shape the
//! emitter produces.

use pretty_assertions::assert_eq;
use sqlpretty::ast::*;
use sqlpretty::formatter::{render_nodes, render_sql, PrettyPrinter};
use sqlpretty::render;

/// Helper to render and compare exactly
fn assert_renders_to(input: &str, expected: &str) {
    let result = render(input).expect("render should succeed");
    assert_eq!(result, expected);
}

/// A `SELECT *` tree with no other clauses
fn select_star() -> Node {
    Node::Select(SelectStmt {
        target_list: vec![Node::ResTarget(ResTarget {
            name: None,
            val: Some(Box::new(Node::ColumnRef(ColumnRef {
                fields: vec![Node::AllColumns],
            }))),
        })],
        ..SelectStmt::default()
    })
}

mod keywords_and_casing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keywords_uppercased() {
        assert_renders_to(
            "select id from users",
            "SELECT \n  id \nFROM \n  users \n",
        );
    }

    #[test]
    fn identifiers_folded_to_lowercase() {
        assert_renders_to("SELECT ID FROM USERS", "SELECT \n  id \nFROM \n  users \n");
    }

    #[test]
    fn input_whitespace_is_irrelevant() {
        let canonical = render("SELECT id FROM users").expect("render");
        let messy = render("select\n\n   id\t from\n users").expect("render");
        assert_eq!(messy, canonical);
    }
}

mod select_shapes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn select_star_exact_shape() {
        // Keyword, newline+indent, target, newline+dedent.
        assert_renders_to("SELECT *", "SELECT \n  * \n");
    }

    #[test]
    fn select_star_from_ast() {
        let rendered = render_nodes(&[select_star()]);
        assert_eq!(rendered.text, "SELECT \n  * \n");
        assert!(rendered.unrecognized.is_empty());
    }

    #[test]
    fn from_and_where_blocks() {
        assert_renders_to(
            "SELECT id FROM users WHERE id = 1",
            "SELECT \n  id \nFROM \n  users \nWHERE \n  id = 1 \n",
        );
    }

    #[test]
    fn where_without_from_omits_from_entirely() {
        let result = render("SELECT 1 WHERE 1 = 1").expect("render");
        assert!(!result.contains("FROM"));
        assert_eq!(result, "SELECT \n  1 \nWHERE \n  1 = 1 \n");
    }

    #[test]
    fn group_by_and_having_stay_on_base_level() {
        assert_renders_to(
            "SELECT a FROM t GROUP BY a HAVING a > 1",
            "SELECT \n  a \nFROM \n  t \nGROUP BY a HAVING a > 1 ",
        );
    }

    #[test]
    fn target_alias_gets_as() {
        assert_renders_to(
            "SELECT id AS x FROM t",
            "SELECT \n  id AS x \nFROM \n  t \n",
        );
    }

    #[test]
    fn multiple_targets_in_order() {
        assert_renders_to(
            "SELECT id, name FROM t",
            "SELECT \n  id name \nFROM \n  t \n",
        );
    }

    #[test]
    fn custom_indent_width() {
        let mut printer = PrettyPrinter::with_indent(4);
        printer.visit(&select_star());
        assert_eq!(printer.finish().text, "SELECT \n    * \n");
    }
}

mod absence_gating {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn minimal_select_has_no_optional_keywords() {
        let result = render("SELECT 1").expect("render");
        for keyword in ["FROM", "WHERE", "GROUP BY", "HAVING", "ORDER BY", "LIMIT"] {
            assert!(
                !result.contains(keyword),
                "unexpected {keyword} in {result:?}"
            );
        }
    }

    #[test]
    fn minimal_delete_is_exact() {
        assert_renders_to("DELETE FROM orders", "DELETE FROM orders ");
    }

    #[test]
    fn limit_without_offset_renders_nothing() {
        // LIMIT output is gated on the offset expression.
        assert_renders_to("SELECT a FROM t LIMIT 10", "SELECT \n  a \nFROM \n  t \n");
    }

    #[test]
    fn limit_with_offset_renders_offset() {
        assert_renders_to(
            "SELECT a FROM t LIMIT 10 OFFSET 5",
            "SELECT \n  a \nFROM \n  t \nLIMIT 5 ",
        );
    }
}

mod qualification {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_schema_table() {
        assert_renders_to(
            "SELECT * FROM db.public.users",
            "SELECT \n  * \nFROM \n  db.public.users \n",
        );
    }

    #[test]
    fn schema_table() {
        assert_renders_to(
            "SELECT * FROM public.users",
            "SELECT \n  * \nFROM \n  public.users \n",
        );
    }

    #[test]
    fn bare_table() {
        assert_renders_to("SELECT * FROM users", "SELECT \n  * \nFROM \n  users \n");
    }

    #[test]
    fn wildcard_has_no_qualification_added() {
        let result = render("SELECT * FROM users").expect("render");
        assert!(result.contains("\n  * \n"));
    }

    #[test]
    fn column_fields_have_no_separator() {
        assert_renders_to(
            "SELECT u.name FROM users u",
            "SELECT \n  u name \nFROM \n  users AS u \n",
        );
    }

    #[test]
    fn relation_alias_gets_canonical_as() {
        assert_renders_to(
            "SELECT * FROM users u",
            "SELECT \n  * \nFROM \n  users AS u \n",
        );
    }

    #[test]
    fn alias_rename_list() {
        assert_renders_to(
            "SELECT * FROM users AS u (a, b)",
            "SELECT \n  * \nFROM \n  users AS u (a b ) \n",
        );
    }
}

mod expressions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binary_expression_is_infix() {
        assert_renders_to(
            "SELECT * FROM t WHERE id <> 1",
            "SELECT \n  * \nFROM \n  t \nWHERE \n  id <> 1 \n",
        );
    }

    #[test]
    fn boolean_operator_follows_operands() {
        assert_renders_to(
            "SELECT * FROM t WHERE a = 1 AND b = 2",
            "SELECT \n  * \nFROM \n  t \nWHERE \n  a = 1 b = 2 AND \n",
        );
    }

    #[test]
    fn string_constant_rendered_verbatim() {
        assert_renders_to(
            "SELECT 'it''s' FROM t",
            "SELECT \n  it's \nFROM \n  t \n",
        );
    }

    #[test]
    fn numeric_constants() {
        assert_renders_to("SELECT 2.5", "SELECT \n  2.5 \n");
        assert_renders_to("SELECT 42", "SELECT \n  42 \n");
    }

    #[test]
    fn unary_minus_keeps_operator_before_operand() {
        assert_renders_to("SELECT -5", "SELECT \n  - 5 \n");
    }
}

mod insert_update_delete {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_columns_without_clause_keywords() {
        let insert = Node::Insert(InsertStmt {
            relation: Some(Box::new(Node::Relation(Relation {
                relname: "users".to_string(),
                ..Relation::default()
            }))),
            cols: vec![
                Node::Ident("id".to_string()),
                Node::Ident("name".to_string()),
            ],
            ..InsertStmt::default()
        });
        let rendered = render_nodes(&[insert]);
        assert_eq!(rendered.text, "INSERT users id name ");
    }

    #[test]
    fn insert_end_to_end_contains_relation_and_columns() {
        let result = render("INSERT INTO users (id, name) VALUES (1, 'bob')").expect("render");
        assert!(result.starts_with("INSERT users id name "));
        assert!(!result.contains("ON CONFLICT"));
        assert!(!result.contains("RETURNING"));
    }

    #[test]
    fn update_renders_only_its_leading_keyword() {
        assert_renders_to("UPDATE t SET a = 1 WHERE b = 2", "UPDATE t 1 AS a b = 2 ");
    }

    #[test]
    fn delete_with_using_and_where() {
        assert_renders_to(
            "DELETE FROM t USING u WHERE t.id = u.id",
            "DELETE FROM t u t id = u id ",
        );
    }

    #[test]
    fn returning_list_rendered_without_keyword() {
        let result = render("DELETE FROM t WHERE a = 1 RETURNING id").expect("render");
        assert_eq!(result, "DELETE FROM t a = 1 id ");
    }
}

mod unrecognized_kinds {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn function_call_leaves_a_gap_but_render_succeeds() {
        let rendered = render_sql("SELECT a FROM t WHERE count(x) = 1").expect("render");
        assert_eq!(rendered.text, "SELECT \n  a \nFROM \n  t \nWHERE \n  = 1 \n");
        assert_eq!(rendered.unrecognized.len(), 1);
        assert_eq!(rendered.unrecognized[0].kind, "FuncCall");
    }

    #[test]
    fn distinct_is_skipped_with_diagnostic() {
        let rendered = render_sql("SELECT DISTINCT a FROM t").expect("render");
        assert!(!rendered.text.contains("DISTINCT"));
        assert_eq!(rendered.unrecognized[0].kind, "Distinct");
    }

    #[test]
    fn order_by_keyword_emitted_items_skipped() {
        let rendered = render_sql("SELECT a FROM t ORDER BY b").expect("render");
        assert_eq!(rendered.text, "SELECT \n  a \nFROM \n  t \nORDER BY ");
        assert_eq!(rendered.unrecognized[0].kind, "SortBy");
    }

    #[test]
    fn with_keyword_emitted_cte_skipped() {
        let rendered = render_sql("WITH x AS (SELECT 1) SELECT a FROM x").expect("render");
        assert!(rendered.text.starts_with("WITH SELECT "));
        assert_eq!(rendered.unrecognized[0].kind, "CommonTableExpr");
    }

    #[test]
    fn locking_clause_skipped() {
        let rendered = render_sql("SELECT a FROM t FOR UPDATE").expect("render");
        assert_eq!(rendered.text, "SELECT \n  a \nFROM \n  t \n");
        assert_eq!(rendered.unrecognized[0].kind, "LockingClause");
    }

    #[test]
    fn on_conflict_skipped() {
        let rendered =
            render_sql("INSERT INTO t (a) VALUES (1) ON CONFLICT DO NOTHING").expect("render");
        assert!(!rendered.text.contains("CONFLICT"));
        assert_eq!(rendered.unrecognized[0].kind, "OnConflictClause");
    }
}

mod determinism {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_tree_renders_identically() {
        let first = render("SELECT id FROM users WHERE id = 1").expect("render");
        let second = render("SELECT id FROM users WHERE id = 1").expect("render");
        assert_eq!(first, second);
    }

    #[test]
    fn canonical_output_is_stable_under_rerender() {
        for input in ["SELECT * FROM users", "DELETE FROM orders", "SELECT 1"] {
            let once = render(input).expect("first render");
            let twice = render(&once).expect("second render");
            assert_eq!(twice, once, "re-render changed output for {input:?}");
        }
    }

    #[test]
    fn check_accepts_canonical_text_only() {
        let canonical = render("select * from users").expect("render");
        assert!(sqlpretty::check(&canonical).expect("check"));
        assert!(!sqlpretty::check("select * from users").expect("check"));
    }

    #[test]
    fn multiple_statements_concatenate_in_order() {
        assert_renders_to("SELECT 1; DELETE FROM t", "SELECT \n  1 \nDELETE FROM t ");
    }
}
