//! Declaration parsing: declaration specifiers, struct/union/enum, and
//! declarators.

use ccheck_lex::TokenKind;

use crate::ast::*;
use crate::{PResult, Parser};

impl<'a> Parser<'a> {
    /// Parses a global declaration or function definition:
    /// `gdecln := dspecs dlist ( ';' | block )`.
    pub(crate) fn parse_gdecln(&mut self) -> PResult<GlobalDecl> {
        let specs = self.parse_dspecs()?;
        let decls = if self.kind() == TokenKind::Semicolon || self.kind() == TokenKind::LBrace {
            DeclList::default()
        } else {
            self.parse_decl_list()?
        };

        if self.kind() == TokenKind::LBrace {
            let body = self.parse_braced_block()?;
            Ok(GlobalDecl {
                specs,
                decls,
                body: Some(body),
                tscolon: None,
            })
        } else {
            let tscolon = self.expect(TokenKind::Semicolon, "';' or function body")?;
            Ok(GlobalDecl {
                specs,
                decls,
                body: None,
                tscolon: Some(tscolon),
            })
        }
    }

    /// Parses a declaration specifier sequence.
    ///
    /// Any mix of storage classes, type specifiers, qualifiers, and
    /// function specifiers is accepted; order is not enforced. An
    /// identifier is taken as a type specifier only while no type
    /// specifier has been seen, so in `myint x` the first identifier
    /// names the type and the second starts the declarator.
    pub(crate) fn parse_dspecs(&mut self) -> PResult<DeclSpecs> {
        let mut specs = Vec::new();
        let mut have_type = false;

        loop {
            let kind = self.kind();
            let spec = if kind.is_storage_class() {
                DeclSpec::StorageClass(StorageClass {
                    tsclass: self.bump(),
                })
            } else if kind.is_type_qualifier() {
                DeclSpec::TypeQual(TypeQual { tqual: self.bump() })
            } else if kind == TokenKind::Inline {
                DeclSpec::FnSpec(FnSpec {
                    tfspec: self.bump(),
                })
            } else if kind.is_basic_type_specifier() {
                have_type = true;
                DeclSpec::TypeSpec(TypeSpec::Basic(TsBasic {
                    tbasic: self.bump(),
                }))
            } else if kind == TokenKind::Struct || kind == TokenKind::Union {
                have_type = true;
                DeclSpec::TypeSpec(TypeSpec::Record(self.parse_record()?))
            } else if kind == TokenKind::Enum {
                have_type = true;
                DeclSpec::TypeSpec(TypeSpec::Enum(self.parse_enum()?))
            } else if kind == TokenKind::Ident && !have_type {
                have_type = true;
                DeclSpec::TypeSpec(TypeSpec::Ident(TsIdent { tname: self.bump() }))
            } else {
                break;
            };
            specs.push(spec);
        }

        if specs.is_empty() {
            return self.error("declaration specifier");
        }
        Ok(DeclSpecs { specs })
    }

    /// Parses a specifier-qualifier list (no storage classes or function
    /// specifiers), as used in record members and type names.
    pub(crate) fn parse_sqlist(&mut self) -> PResult<SpecQualList> {
        let mut elems = Vec::new();
        let mut have_type = false;

        loop {
            let kind = self.kind();
            let elem = if kind.is_type_qualifier() {
                SpecQual::TypeQual(TypeQual { tqual: self.bump() })
            } else if kind.is_basic_type_specifier() {
                have_type = true;
                SpecQual::TypeSpec(TypeSpec::Basic(TsBasic {
                    tbasic: self.bump(),
                }))
            } else if kind == TokenKind::Struct || kind == TokenKind::Union {
                have_type = true;
                SpecQual::TypeSpec(TypeSpec::Record(self.parse_record()?))
            } else if kind == TokenKind::Enum {
                have_type = true;
                SpecQual::TypeSpec(TypeSpec::Enum(self.parse_enum()?))
            } else if kind == TokenKind::Ident && !have_type {
                have_type = true;
                SpecQual::TypeSpec(TypeSpec::Ident(TsIdent { tname: self.bump() }))
            } else {
                break;
            };
            elems.push(elem);
        }

        if elems.is_empty() {
            return self.error("type specifier or qualifier");
        }
        Ok(SpecQualList { elems })
    }

    /// Parses a `struct`/`union` type specifier, with an optional tag and
    /// an optional member list; at least one of the two must be present.
    fn parse_record(&mut self) -> PResult<TsRecord> {
        let rkind = if self.kind() == TokenKind::Struct {
            RecordKind::Struct
        } else {
            RecordKind::Union
        };
        let tkw = self.bump();
        let tident = self.eat(TokenKind::Ident);

        let (tlbrace, members, trbrace) = if self.kind() == TokenKind::LBrace {
            let tlbrace = self.bump();
            let mut members = Vec::new();
            while self.kind() != TokenKind::RBrace {
                if self.kind() == TokenKind::Eof {
                    return self.error("'}'");
                }
                members.push(self.parse_record_member()?);
            }
            let trbrace = self.bump();
            (Some(tlbrace), members, Some(trbrace))
        } else {
            if tident.is_none() {
                return self.error("record tag or '{'");
            }
            (None, Vec::new(), None)
        };

        Ok(TsRecord {
            rkind,
            tkw,
            tident,
            tlbrace,
            members,
            trbrace,
        })
    }

    /// Parses one member declaration inside a record definition.
    fn parse_record_member(&mut self) -> PResult<RecordMember> {
        let sqlist = self.parse_sqlist()?;
        let decls = if self.kind() == TokenKind::Semicolon {
            DeclList::default()
        } else {
            self.parse_decl_list()?
        };
        let tscolon = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(RecordMember {
            sqlist,
            decls,
            tscolon,
        })
    }

    /// Parses an `enum` type specifier, with an optional tag and an
    /// optional enumerator list; at least one of the two must be present.
    /// A trailing comma after the last enumerator is allowed.
    fn parse_enum(&mut self) -> PResult<TsEnum> {
        let tenum = self.bump();
        let tident = self.eat(TokenKind::Ident);

        let (tlbrace, elems, trbrace) = if self.kind() == TokenKind::LBrace {
            let tlbrace = self.bump();
            let mut elems = Vec::new();
            while self.kind() != TokenKind::RBrace {
                let elem_ident = self.expect(TokenKind::Ident, "enumerator")?;
                let (teq, init) = if self.kind() == TokenKind::Eq {
                    let teq = self.bump();
                    (Some(teq), Some(self.parse_cond_expr()?))
                } else {
                    (None, None)
                };
                let tcomma = self.eat(TokenKind::Comma);
                let done = tcomma.is_none();
                elems.push(EnumElem {
                    tident: elem_ident,
                    teq,
                    init,
                    tcomma,
                });
                if done {
                    break;
                }
            }
            let trbrace = self.expect(TokenKind::RBrace, "'}'")?;
            (Some(tlbrace), elems, Some(trbrace))
        } else {
            if tident.is_none() {
                return self.error("enum tag or '{'");
            }
            (None, Vec::new(), None)
        };

        Ok(TsEnum {
            tenum,
            tident,
            tlbrace,
            elems,
            trbrace,
        })
    }

    /// Parses a declarator list: `declarator (',' declarator)*`, each
    /// entry with an optional `= initializer`.
    pub(crate) fn parse_decl_list(&mut self) -> PResult<DeclList> {
        let mut entries = Vec::new();
        let mut tcomma = None;

        loop {
            let decl = self.parse_declarator()?;
            let (teq, init) = if self.kind() == TokenKind::Eq {
                let teq = self.bump();
                (Some(teq), Some(self.parse_expr_nocomma()?))
            } else {
                (None, None)
            };
            entries.push(DeclEntry {
                tcomma,
                decl,
                teq,
                init,
            });
            match self.eat(TokenKind::Comma) {
                Some(t) => tcomma = Some(t),
                None => break,
            }
        }

        Ok(DeclList { entries })
    }

    /// Parses a declarator: `('*' tqual*)* direct-declarator`.
    pub(crate) fn parse_declarator(&mut self) -> PResult<Declarator> {
        if self.kind() == TokenKind::Star {
            let tasterisk = self.bump();
            let mut tquals = Vec::new();
            while self.kind().is_type_qualifier() {
                tquals.push(self.bump());
            }
            let inner = self.parse_declarator()?;
            return Ok(Declarator::Ptr(DPtr {
                tasterisk,
                tquals,
                inner: Box::new(inner),
            }));
        }
        self.parse_direct_declarator()
    }

    /// Parses a direct declarator: an identifier, a parenthesized
    /// declarator, or nothing (abstract declarator), followed by any
    /// number of function and array suffixes.
    fn parse_direct_declarator(&mut self) -> PResult<Declarator> {
        let mut decl = match self.kind() {
            TokenKind::Ident => Declarator::Ident(DIdent {
                tident: self.bump(),
            }),
            TokenKind::LParen if self.paren_starts_declarator() => {
                let tlparen = self.bump();
                let inner = self.parse_declarator()?;
                let trparen = self.expect(TokenKind::RParen, "')'")?;
                Declarator::Paren(DParen {
                    tlparen,
                    inner: Box::new(inner),
                    trparen,
                })
            }
            _ => Declarator::NoIdent(DNoIdent {}),
        };

        loop {
            match self.kind() {
                TokenKind::LParen => {
                    let tlparen = self.bump();
                    let mut args = Vec::new();
                    if self.kind() != TokenKind::RParen {
                        loop {
                            let specs = self.parse_dspecs()?;
                            let adecl = self.parse_declarator()?;
                            let tcomma = self.eat(TokenKind::Comma);
                            let done = tcomma.is_none();
                            args.push(FunArg {
                                specs,
                                decl: adecl,
                                tcomma,
                            });
                            if done {
                                break;
                            }
                        }
                    }
                    let trparen = self.expect(TokenKind::RParen, "')'")?;
                    decl = Declarator::Fun(DFun {
                        inner: Box::new(decl),
                        tlparen,
                        args,
                        trparen,
                    });
                }
                TokenKind::LBracket => {
                    let tlbracket = self.bump();
                    let tsize = match self.kind() {
                        TokenKind::Number | TokenKind::Ident | TokenKind::CharLit => {
                            Some(self.bump())
                        }
                        _ => None,
                    };
                    let trbracket = self.expect(TokenKind::RBracket, "']'")?;
                    decl = Declarator::Array(DArray {
                        inner: Box::new(decl),
                        tlbracket,
                        tsize,
                        trbracket,
                    });
                }
                _ => break,
            }
        }

        Ok(decl)
    }

    /// Decides whether a `(` in declarator position opens a parenthesized
    /// declarator rather than a parameter list over an absent identifier.
    /// It does when the token after it could itself begin a declarator.
    fn paren_starts_declarator(&self) -> bool {
        matches!(
            self.peek_kind(1),
            TokenKind::Star | TokenKind::Ident | TokenKind::LParen
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parse_module;
    use ccheck_lex::tokenize;

    fn first_decl(source: &str) -> GlobalDecl {
        let mut module = parse_module(&tokenize(source)).expect("parse failed");
        match module.items.remove(0) {
            ModItem::Decl(decl) => decl,
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_specifier_mix() {
        let decl = first_decl("static const unsigned long x;\n");
        assert_eq!(decl.specs.specs.len(), 4);
        assert!(matches!(decl.specs.specs[0], DeclSpec::StorageClass(_)));
        assert!(matches!(decl.specs.specs[1], DeclSpec::TypeQual(_)));
        assert!(matches!(decl.specs.specs[2], DeclSpec::TypeSpec(_)));
    }

    #[test]
    fn test_inline_function_specifier() {
        let decl = first_decl("static inline int f(void)\n{\n\treturn 0;\n}\n");
        assert!(decl
            .specs
            .specs
            .iter()
            .any(|s| matches!(s, DeclSpec::FnSpec(_))));
    }

    #[test]
    fn test_identifier_type_specifier() {
        let decl = first_decl("myint x;\n");
        assert_eq!(decl.specs.specs.len(), 1);
        assert!(matches!(
            decl.specs.specs[0],
            DeclSpec::TypeSpec(TypeSpec::Ident(_))
        ));
        assert_eq!(decl.decls.entries.len(), 1);
    }

    #[test]
    fn test_pointer_declarator() {
        let decl = first_decl("char *p;\n");
        match &decl.decls.entries[0].decl {
            Declarator::Ptr(ptr) => {
                assert!(ptr.tquals.is_empty());
                assert!(matches!(*ptr.inner, Declarator::Ident(_)));
            }
            other => panic!("expected pointer declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_qualified_pointer() {
        let decl = first_decl("char * const p;\n");
        match &decl.decls.entries[0].decl {
            Declarator::Ptr(ptr) => assert_eq!(ptr.tquals.len(), 1),
            other => panic!("expected pointer declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_array_declarator() {
        let decl = first_decl("int a[16];\n");
        match &decl.decls.entries[0].decl {
            Declarator::Array(arr) => assert!(arr.tsize.is_some()),
            other => panic!("expected array declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_unsized_array() {
        let decl = first_decl("extern int a[];\n");
        match &decl.decls.entries[0].decl {
            Declarator::Array(arr) => assert!(arr.tsize.is_none()),
            other => panic!("expected array declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_function_pointer() {
        let decl = first_decl("int (*handler)(int sig);\n");
        match &decl.decls.entries[0].decl {
            Declarator::Fun(fun) => {
                assert_eq!(fun.args.len(), 1);
                assert!(matches!(*fun.inner, Declarator::Paren(_)));
            }
            other => panic!("expected function declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_void_parameter_list() {
        let decl = first_decl("int f(void);\n");
        match &decl.decls.entries[0].decl {
            Declarator::Fun(fun) => {
                assert_eq!(fun.args.len(), 1);
                assert!(matches!(fun.args[0].decl, Declarator::NoIdent(_)));
            }
            other => panic!("expected function declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_parameter_commas() {
        let decl = first_decl("int add(int a, int b);\n");
        match &decl.decls.entries[0].decl {
            Declarator::Fun(fun) => {
                assert_eq!(fun.args.len(), 2);
                assert!(fun.args[0].tcomma.is_some());
                assert!(fun.args[1].tcomma.is_none());
            }
            other => panic!("expected function declarator, got {:?}", other),
        }
    }

    #[test]
    fn test_declarator_list() {
        let decl = first_decl("int x, *p, a[4];\n");
        assert_eq!(decl.decls.entries.len(), 3);
        assert!(decl.decls.entries[0].tcomma.is_none());
        assert!(decl.decls.entries[1].tcomma.is_some());
        assert!(decl.decls.entries[2].tcomma.is_some());
    }

    #[test]
    fn test_initializer() {
        let decl = first_decl("int x = 1;\n");
        let entry = &decl.decls.entries[0];
        assert!(entry.teq.is_some());
        assert!(matches!(entry.init, Some(Expr::Int(_))));
    }

    #[test]
    fn test_struct_definition() {
        let decl = first_decl("struct point {\n\tint x;\n\tint y;\n};\n");
        match &decl.specs.specs[0] {
            DeclSpec::TypeSpec(TypeSpec::Record(rec)) => {
                assert_eq!(rec.rkind, RecordKind::Struct);
                assert!(rec.tident.is_some());
                assert_eq!(rec.members.len(), 2);
                assert!(rec.tlbrace.is_some() && rec.trbrace.is_some());
            }
            other => panic!("expected record, got {:?}", other),
        }
        assert!(decl.decls.entries.is_empty());
    }

    #[test]
    fn test_anonymous_union_variable() {
        let decl = first_decl("union {\n\tint i;\n\tchar c;\n} u;\n");
        match &decl.specs.specs[0] {
            DeclSpec::TypeSpec(TypeSpec::Record(rec)) => {
                assert_eq!(rec.rkind, RecordKind::Union);
                assert!(rec.tident.is_none());
            }
            other => panic!("expected record, got {:?}", other),
        }
        assert_eq!(decl.decls.entries.len(), 1);
    }

    #[test]
    fn test_struct_reference_without_definition() {
        let decl = first_decl("struct list *head;\n");
        match &decl.specs.specs[0] {
            DeclSpec::TypeSpec(TypeSpec::Record(rec)) => {
                assert!(rec.tident.is_some());
                assert!(rec.tlbrace.is_none());
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_enum_definition() {
        let decl = first_decl("enum color {\n\tred,\n\tgreen = 4,\n\tblue\n};\n");
        match &decl.specs.specs[0] {
            DeclSpec::TypeSpec(TypeSpec::Enum(en)) => {
                assert_eq!(en.elems.len(), 3);
                assert!(en.elems[0].teq.is_none());
                assert!(en.elems[1].teq.is_some());
                assert!(en.elems[1].tcomma.is_some());
                assert!(en.elems[2].tcomma.is_none());
            }
            other => panic!("expected enum, got {:?}", other),
        }
    }

    #[test]
    fn test_enum_trailing_comma() {
        let decl = first_decl("enum tag {\n\tone,\n\ttwo,\n};\n");
        match &decl.specs.specs[0] {
            DeclSpec::TypeSpec(TypeSpec::Enum(en)) => {
                assert_eq!(en.elems.len(), 2);
                assert!(en.elems[1].tcomma.is_some());
            }
            other => panic!("expected enum, got {:?}", other),
        }
    }

    #[test]
    fn test_record_without_tag_or_body_fails() {
        let stream = tokenize("struct;\n");
        assert!(parse_module(&stream).is_err());
    }
}
