//! Statement parsing.

use ccheck_lex::TokenKind;

use crate::ast::*;
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    /// Parses a braced block: `'{' stmt* '}'`.
    pub(crate) fn parse_braced_block(&mut self) -> PResult<Block> {
        let topen = self.expect(TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while self.kind() != TokenKind::RBrace {
            if self.kind() == TokenKind::Eof {
                return self.error("'}'");
            }
            stmts.push(self.parse_stmt()?);
        }
        let tclose = self.bump();
        Ok(Block {
            braces: true,
            topen: Some(topen),
            stmts,
            tclose: Some(tclose),
        })
    }

    /// Parses the body of a control statement: either a braced block or a
    /// single statement forming an unbraced block.
    fn parse_branch_block(&mut self) -> PResult<Block> {
        if self.kind() == TokenKind::LBrace {
            self.parse_braced_block()
        } else {
            let stmt = self.parse_stmt()?;
            Ok(Block {
                braces: false,
                topen: None,
                stmts: vec![stmt],
                tclose: None,
            })
        }
    }

    /// Parses one statement.
    pub(crate) fn parse_stmt(&mut self) -> PResult<Stmt> {
        match self.kind() {
            TokenKind::Break => self.parse_break(),
            TokenKind::Continue => self.parse_continue(),
            TokenKind::Goto => self.parse_goto(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do(),
            TokenKind::For => self.parse_for(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Case | TokenKind::Default => self.parse_clabel(),
            TokenKind::Ident if self.peek_kind(1) == TokenKind::Colon => self.parse_glabel(),
            kind if Self::starts_local_decl(kind) => self.parse_decl_stmt(),
            _ => {
                let expr = self.parse_expr()?;
                let tscolon = self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Stmt::Expr(ExprStmt { expr, tscolon }))
            }
        }
    }

    /// A statement is a local declaration when it opens with a keyword
    /// that can only begin declaration specifiers. A typedef name cannot
    /// trigger this, so `myint x;` in a body does not parse; only builtin
    /// type keywords introduce locals.
    fn starts_local_decl(kind: TokenKind) -> bool {
        kind.is_storage_class()
            || kind.is_type_qualifier()
            || kind.is_basic_type_specifier()
            || matches!(
                kind,
                TokenKind::Struct | TokenKind::Union | TokenKind::Enum | TokenKind::Inline
            )
    }

    fn parse_decl_stmt(&mut self) -> PResult<Stmt> {
        let specs = self.parse_dspecs()?;
        let decls = if self.kind() == TokenKind::Semicolon {
            DeclList::default()
        } else {
            self.parse_decl_list()?
        };
        let tscolon = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Decl(DeclStmt {
            specs,
            decls,
            tscolon,
        }))
    }

    fn parse_break(&mut self) -> PResult<Stmt> {
        let tbreak = self.bump();
        let tscolon = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Break(BreakStmt { tbreak, tscolon }))
    }

    fn parse_continue(&mut self) -> PResult<Stmt> {
        let tcontinue = self.bump();
        let tscolon = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Continue(ContinueStmt { tcontinue, tscolon }))
    }

    fn parse_goto(&mut self) -> PResult<Stmt> {
        let tgoto = self.bump();
        let ttarget = self.expect(TokenKind::Ident, "label")?;
        let tscolon = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Goto(GotoStmt {
            tgoto,
            ttarget,
            tscolon,
        }))
    }

    fn parse_return(&mut self) -> PResult<Stmt> {
        let treturn = self.bump();
        let arg = if self.kind() != TokenKind::Semicolon {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let tscolon = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Return(ReturnStmt {
            treturn,
            arg,
            tscolon,
        }))
    }

    fn parse_if(&mut self) -> PResult<Stmt> {
        let tif = self.bump();
        let tlparen = self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        let trparen = self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_branch_block()?;

        let mut elifs = Vec::new();
        while self.kind() == TokenKind::Else && self.peek_kind(1) == TokenKind::If {
            let telse = self.bump();
            let tif2 = self.bump();
            let tlparen2 = self.expect(TokenKind::LParen, "'('")?;
            let cond2 = self.parse_expr()?;
            let trparen2 = self.expect(TokenKind::RParen, "')'")?;
            let body2 = self.parse_branch_block()?;
            elifs.push(ElifBranch {
                telse,
                tif: tif2,
                tlparen: tlparen2,
                cond: cond2,
                trparen: trparen2,
                body: body2,
            });
        }

        let else_ = if self.kind() == TokenKind::Else {
            let telse = self.bump();
            let ebody = self.parse_branch_block()?;
            Some(ElseBranch { telse, body: ebody })
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            tif,
            tlparen,
            cond,
            trparen,
            body,
            elifs,
            else_,
        }))
    }

    fn parse_while(&mut self) -> PResult<Stmt> {
        let twhile = self.bump();
        let tlparen = self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        let trparen = self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_branch_block()?;
        Ok(Stmt::While(WhileStmt {
            twhile,
            tlparen,
            cond,
            trparen,
            body,
        }))
    }

    fn parse_do(&mut self) -> PResult<Stmt> {
        let tdo = self.bump();
        let body = self.parse_branch_block()?;
        let twhile = self.expect(TokenKind::While, "'while'")?;
        let tlparen = self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        let trparen = self.expect(TokenKind::RParen, "')'")?;
        let tscolon = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Do(DoStmt {
            tdo,
            body,
            twhile,
            tlparen,
            cond,
            trparen,
            tscolon,
        }))
    }

    fn parse_for(&mut self) -> PResult<Stmt> {
        let tfor = self.bump();
        let tlparen = self.expect(TokenKind::LParen, "'('")?;
        let linit = if self.kind() != TokenKind::Semicolon {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let tscolon1 = self.expect(TokenKind::Semicolon, "';'")?;
        let lcond = if self.kind() != TokenKind::Semicolon {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let tscolon2 = self.expect(TokenKind::Semicolon, "';'")?;
        let lnext = if self.kind() != TokenKind::RParen {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let trparen = self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_branch_block()?;
        Ok(Stmt::For(ForStmt {
            tfor,
            tlparen,
            linit,
            tscolon1,
            lcond,
            tscolon2,
            lnext,
            trparen,
            body,
        }))
    }

    fn parse_switch(&mut self) -> PResult<Stmt> {
        let tswitch = self.bump();
        let tlparen = self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        let trparen = self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_branch_block()?;
        Ok(Stmt::Switch(SwitchStmt {
            tswitch,
            tlparen,
            cond,
            trparen,
            body,
        }))
    }

    fn parse_clabel(&mut self) -> PResult<Stmt> {
        let is_case = self.kind() == TokenKind::Case;
        let tlabel = self.bump();
        let arg = if is_case {
            Some(self.parse_cond_expr()?)
        } else {
            None
        };
        let tcolon = self.expect(TokenKind::Colon, "':'")?;
        Ok(Stmt::CLabel(CLabelStmt { tlabel, arg, tcolon }))
    }

    fn parse_glabel(&mut self) -> PResult<Stmt> {
        let tlabel = self.bump();
        let tcolon = self.bump();
        Ok(Stmt::GLabel(GLabelStmt { tlabel, tcolon }))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parse_module;
    use ccheck_lex::tokenize;

    fn body_of(source: &str) -> Block {
        let mut module = parse_module(&tokenize(source)).expect("parse failed");
        match module.items.remove(0) {
            ModItem::Decl(decl) => decl.body.expect("no function body"),
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    fn single_stmt(body_src: &str) -> Stmt {
        let source = format!("void f(void)\n{{\n{}}}\n", body_src);
        let mut block = body_of(&source);
        assert_eq!(block.stmts.len(), 1, "expected one statement");
        block.stmts.remove(0)
    }

    #[test]
    fn test_break_continue() {
        let stmt = single_stmt("\twhile (1) {\n\t\tbreak;\n\t}\n");
        match stmt {
            Stmt::While(w) => {
                assert!(matches!(w.body.stmts[0], Stmt::Break(_)));
            }
            other => panic!("expected while, got {:?}", other),
        }
        let stmt = single_stmt("\tdo\n\t\tcontinue;\n\twhile (1);\n");
        match stmt {
            Stmt::Do(d) => {
                assert!(!d.body.braces);
                assert!(matches!(d.body.stmts[0], Stmt::Continue(_)));
            }
            other => panic!("expected do, got {:?}", other),
        }
    }

    #[test]
    fn test_return_forms() {
        assert!(matches!(
            single_stmt("\treturn;\n"),
            Stmt::Return(ReturnStmt { arg: None, .. })
        ));
        assert!(matches!(
            single_stmt("\treturn 0;\n"),
            Stmt::Return(ReturnStmt { arg: Some(_), .. })
        ));
    }

    #[test]
    fn test_goto_and_label() {
        let source = "void f(void)\n{\nout:\n\tgoto out;\n}\n";
        let block = body_of(source);
        assert!(matches!(block.stmts[0], Stmt::GLabel(_)));
        assert!(matches!(block.stmts[1], Stmt::Goto(_)));
    }

    #[test]
    fn test_if_braced() {
        match single_stmt("\tif (x) {\n\t\ty();\n\t}\n") {
            Stmt::If(ifs) => {
                assert!(ifs.body.braces);
                assert!(ifs.elifs.is_empty());
                assert!(ifs.else_.is_none());
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_if_else_braceless() {
        match single_stmt("\tif (x)\n\t\ty();\n\telse\n\t\tz();\n") {
            Stmt::If(ifs) => {
                assert!(!ifs.body.braces);
                let else_ = ifs.else_.expect("missing else");
                assert!(!else_.body.braces);
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_else_if_chain() {
        match single_stmt(
            "\tif (a) {\n\t\tx();\n\t} else if (b) {\n\t\ty();\n\t} else {\n\t\tz();\n\t}\n",
        ) {
            Stmt::If(ifs) => {
                assert_eq!(ifs.elifs.len(), 1);
                assert!(ifs.else_.is_some());
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_for_full() {
        match single_stmt("\tfor (i = 0; i < n; i++)\n\t\tf(i);\n") {
            Stmt::For(f) => {
                assert!(f.linit.is_some());
                assert!(f.lcond.is_some());
                assert!(f.lnext.is_some());
                assert!(!f.body.braces);
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_for_empty_clauses() {
        match single_stmt("\tfor (;;)\n\t\tspin();\n") {
            Stmt::For(f) => {
                assert!(f.linit.is_none());
                assert!(f.lcond.is_none());
                assert!(f.lnext.is_none());
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_with_labels() {
        let stmt = single_stmt(
            "\tswitch (x) {\n\tcase 1:\n\t\tbreak;\n\tdefault:\n\t\tbreak;\n\t}\n",
        );
        match stmt {
            Stmt::Switch(sw) => {
                assert!(sw.body.braces);
                let labels: Vec<_> = sw
                    .body
                    .stmts
                    .iter()
                    .filter_map(|s| match s {
                        Stmt::CLabel(cl) => Some(cl.arg.is_some()),
                        _ => None,
                    })
                    .collect();
                assert_eq!(labels, vec![true, false]);
            }
            other => panic!("expected switch, got {:?}", other),
        }
    }

    #[test]
    fn test_local_declaration() {
        match single_stmt("\tint x = 1;\n") {
            Stmt::Decl(decl) => {
                assert_eq!(decl.decls.entries.len(), 1);
                assert!(decl.decls.entries[0].init.is_some());
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_expression_statement() {
        assert!(matches!(single_stmt("\tf(1, 2);\n"), Stmt::Expr(_)));
    }

    #[test]
    fn test_label_needs_colon_lookahead() {
        // An identifier followed by something other than ':' is an
        // expression statement, not a label.
        assert!(matches!(single_stmt("\tx = 1;\n"), Stmt::Expr(_)));
    }

    #[test]
    fn test_missing_semicolon_fails() {
        let stream = tokenize("void f(void)\n{\n\treturn 0\n}\n");
        assert!(parse_module(&stream).is_err());
    }
}
