//! Edge case tests for ccheck-par

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::{parse_module, ParseError};
    use ccheck_lex::tokenize;

    fn parse(source: &str) -> Module {
        parse_module(&tokenize(source)).expect("parse failed")
    }

    fn parse_err(source: &str) -> ParseError {
        parse_module(&tokenize(source)).expect_err("parse unexpectedly succeeded")
    }

    fn first_decl(source: &str) -> GlobalDecl {
        let mut module = parse(source);
        match module.items.remove(0) {
            ModItem::Decl(decl) => decl,
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_only_comments_and_preproc() {
        let module = parse("/* nothing */\n#pragma once\n// done\n");
        assert!(module.items.is_empty());
    }

    #[test]
    fn test_edge_deeply_nested_parens() {
        let depth = 64;
        let source = format!(
            "int x = {}1{};\n",
            "(".repeat(depth),
            ")".repeat(depth)
        );
        let decl = first_decl(&source);
        let mut expr = decl.decls.entries[0].init.as_ref().unwrap();
        let mut seen = 0;
        while let Expr::Paren(p) = expr {
            expr = &p.inner;
            seen += 1;
        }
        assert_eq!(seen, depth);
        assert!(matches!(expr, Expr::Int(_)));
    }

    #[test]
    fn test_edge_deeply_nested_blocks() {
        let mut body = String::from("\tx = 1;\n");
        for _ in 0..32 {
            body = format!("\tif (x) {{\n{}\t}}\n", body);
        }
        let source = format!("void f(void)\n{{\n{}}}\n", body);
        assert_eq!(parse(&source).items.len(), 1);
    }

    #[test]
    fn test_edge_pointer_to_pointer_to_function() {
        let decl = first_decl("int (**fp)(void);\n");
        match &decl.decls.entries[0].decl {
            Declarator::Fun(fun) => match &*fun.inner {
                Declarator::Paren(paren) => {
                    assert!(matches!(&*paren.inner, Declarator::Ptr(_)));
                }
                other => panic!("expected paren, got {:?}", other),
            },
            other => panic!("expected function declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_array_of_pointers_vs_pointer_to_array() {
        // int *a[4] is an array of pointers.
        let decl = first_decl("int *a[4];\n");
        match &decl.decls.entries[0].decl {
            Declarator::Ptr(ptr) => assert!(matches!(&*ptr.inner, Declarator::Array(_))),
            other => panic!("expected pointer declarator, got {:?}", other),
        }
        // int (*a)[4] is a pointer to an array.
        let decl = first_decl("int (*a)[4];\n");
        match &decl.decls.entries[0].decl {
            Declarator::Array(arr) => assert!(matches!(&*arr.inner, Declarator::Paren(_))),
            other => panic!("expected array declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_multi_dimensional_array() {
        let decl = first_decl("int grid[4][8];\n");
        match &decl.decls.entries[0].decl {
            Declarator::Array(outer) => {
                assert!(matches!(&*outer.inner, Declarator::Array(_)));
            }
            other => panic!("expected array declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_nested_records() {
        let decl = first_decl(
            "struct outer {\n\tstruct inner {\n\t\tint x;\n\t} in;\n\tint y;\n};\n",
        );
        match &decl.specs.specs[0] {
            DeclSpec::TypeSpec(TypeSpec::Record(rec)) => {
                assert_eq!(rec.members.len(), 2);
                match &rec.members[0].sqlist.elems[0] {
                    SpecQual::TypeSpec(TypeSpec::Record(inner)) => {
                        assert_eq!(inner.members.len(), 1);
                    }
                    other => panic!("expected nested record, got {:?}", other),
                }
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_function_returning_pointer() {
        let decl = first_decl("char *name(int id);\n");
        match &decl.decls.entries[0].decl {
            Declarator::Ptr(ptr) => assert!(matches!(&*ptr.inner, Declarator::Fun(_))),
            other => panic!("expected pointer declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_chained_calls_and_members() {
        let source = "void f(void)\n{\n\tg(x)(y).a->b[0]++;\n}\n";
        assert_eq!(parse(source).items.len(), 1);
    }

    #[test]
    fn test_edge_sizeof_sizeof() {
        let source = "int x = sizeof sizeof(int);\n";
        let decl = first_decl(source);
        match decl.decls.entries[0].init.as_ref().unwrap() {
            Expr::Sizeof(outer) => match &outer.arg {
                SizeofArg::Expr(inner) => assert!(matches!(**inner, Expr::Sizeof(_))),
                other => panic!("expected expression operand, got {:?}", other),
            },
            other => panic!("expected sizeof, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_all_statement_kinds_in_one_body() {
        let source = concat!(
            "void f(int x)\n",
            "{\n",
            "\tint i;\n",
            "\n",
            "top:\n",
            "\tfor (i = 0; i < x; i++)\n",
            "\t\tg(i);\n",
            "\twhile (x)\n",
            "\t\tx--;\n",
            "\tdo\n",
            "\t\tx++;\n",
            "\twhile (x < 4);\n",
            "\tswitch (x) {\n",
            "\t\tcase 0:\n",
            "\t\t\tbreak;\n",
            "\t\tdefault:\n",
            "\t\t\tgoto top;\n",
            "\t}\n",
            "\tif (x)\n",
            "\t\treturn;\n",
            "\tcontinue;\n",
            "}\n",
        );
        let mut module = parse(source);
        let body = match module.items.remove(0) {
            ModItem::Decl(decl) => decl.body.unwrap(),
            other => panic!("expected declaration, got {:?}", other),
        };
        let kinds: Vec<&str> = body.stmts.iter().map(|s| s.kind_name()).collect();
        assert_eq!(
            kinds,
            vec!["decl", "glabel", "for", "while", "do", "switch", "if", "continue"]
        );
    }

    #[test]
    fn test_edge_error_messages_name_position() {
        let err = parse_err("int f(void)\n{\n\treturn 1 +;\n}\n");
        assert_eq!(format!("{}", err.range), "3:12");
        assert_eq!(err.expected, "expression");
    }

    #[test]
    fn test_edge_unbalanced_braces() {
        assert!(parse_module(&tokenize("int f(void)\n{\n\treturn 0;\n")).is_err());
    }

    #[test]
    fn test_edge_garbage_after_declaration() {
        let err = parse_err("int x; )\n");
        assert_eq!(err.found, "')'");
    }

    #[test]
    fn test_edge_eof_inside_record() {
        assert!(parse_module(&tokenize("struct broken {\n\tint x;\n")).is_err());
    }
}
