//! Diagnostic dumps of the token stream and the AST.
//!
//! The AST dump prints one node per line, indented by depth, naming the
//! node kind and the text of its identifying token where one exists. The
//! output depends only on token kinds and text, never on positions, so
//! two parses of equivalent sources render identically; the test suites
//! use this to assert that fixing does not change the tree shape.

use std::fmt::Write as _;

use ccheck_lex::{TokId, TokenStream};
use ccheck_par::ast::*;

/// Renders the token stream, one token per line.
pub fn dump_tokens(stream: &TokenStream) -> String {
    let mut out = String::new();
    for id in stream.iter() {
        let tok = stream.tok(id);
        let _ = writeln!(out, "{} {:?} {:?}", tok.range(), tok.kind, tok.text);
    }
    out
}

/// Renders the AST as an indented tree.
pub fn dump_ast(module: &Module, stream: &TokenStream) -> String {
    let mut dumper = Dumper {
        stream,
        out: String::new(),
        depth: 0,
    };
    dumper.module(module);
    dumper.out
}

struct Dumper<'a> {
    stream: &'a TokenStream,
    out: String,
    depth: usize,
}

impl<'a> Dumper<'a> {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn node(&mut self, name: &str, tok: Option<TokId>) {
        match tok {
            Some(id) => {
                let text = &self.stream.tok(id).text;
                let rendered = format!("{} '{}'", name, text);
                self.line(&rendered);
            }
            None => self.line(name),
        }
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn module(&mut self, module: &Module) {
        self.line("module");
        self.nested(|d| {
            for item in &module.items {
                match item {
                    ModItem::Decl(decl) => d.gdecln(decl),
                    ModItem::Stmt(stmt) => d.stmt(stmt),
                }
            }
        });
    }

    fn gdecln(&mut self, decl: &GlobalDecl) {
        self.line("gdecln");
        self.nested(|d| {
            d.dspecs(&decl.specs);
            d.decl_list(&decl.decls);
            if let Some(body) = &decl.body {
                d.block(body);
            }
        });
    }

    fn dspecs(&mut self, specs: &DeclSpecs) {
        self.line("dspecs");
        self.nested(|d| {
            for spec in &specs.specs {
                match spec {
                    DeclSpec::StorageClass(sc) => d.node("sclass", Some(sc.tsclass)),
                    DeclSpec::TypeQual(tq) => d.node("tqual", Some(tq.tqual)),
                    DeclSpec::FnSpec(fs) => d.node("fspec", Some(fs.tfspec)),
                    DeclSpec::TypeSpec(ts) => d.type_spec(ts),
                }
            }
        });
    }

    fn sqlist(&mut self, sqlist: &SpecQualList) {
        self.line("sqlist");
        self.nested(|d| {
            for elem in &sqlist.elems {
                match elem {
                    SpecQual::TypeQual(tq) => d.node("tqual", Some(tq.tqual)),
                    SpecQual::TypeSpec(ts) => d.type_spec(ts),
                }
            }
        });
    }

    fn type_spec(&mut self, ts: &TypeSpec) {
        match ts {
            TypeSpec::Basic(basic) => self.node("tsbasic", Some(basic.tbasic)),
            TypeSpec::Ident(ident) => self.node("tsident", Some(ident.tname)),
            TypeSpec::Record(rec) => {
                self.node("tsrecord", Some(rec.tkw));
                self.nested(|d| {
                    if let Some(tident) = rec.tident {
                        d.node("tag", Some(tident));
                    }
                    for member in &rec.members {
                        d.line("member");
                        d.nested(|d| {
                            d.sqlist(&member.sqlist);
                            d.decl_list(&member.decls);
                        });
                    }
                });
            }
            TypeSpec::Enum(en) => {
                self.node("tsenum", Some(en.tenum));
                self.nested(|d| {
                    if let Some(tident) = en.tident {
                        d.node("tag", Some(tident));
                    }
                    for elem in &en.elems {
                        d.node("elem", Some(elem.tident));
                        if let Some(init) = &elem.init {
                            d.nested(|d| d.expr(init));
                        }
                    }
                });
            }
        }
    }

    fn decl_list(&mut self, dlist: &DeclList) {
        if dlist.entries.is_empty() {
            return;
        }
        self.line("dlist");
        self.nested(|d| {
            for entry in &dlist.entries {
                d.declarator(&entry.decl);
                if let Some(init) = &entry.init {
                    d.line("init");
                    d.nested(|d| d.expr(init));
                }
            }
        });
    }

    fn declarator(&mut self, decl: &Declarator) {
        match decl {
            Declarator::Ident(di) => self.node("dident", Some(di.tident)),
            Declarator::NoIdent(_) => self.line("dnoident"),
            Declarator::Paren(dp) => {
                self.line("dparen");
                self.nested(|d| d.declarator(&dp.inner));
            }
            Declarator::Ptr(dp) => {
                self.line("dptr");
                self.nested(|d| d.declarator(&dp.inner));
            }
            Declarator::Fun(df) => {
                self.line("dfun");
                self.nested(|d| {
                    d.declarator(&df.inner);
                    for arg in &df.args {
                        d.line("arg");
                        d.nested(|d| {
                            d.dspecs(&arg.specs);
                            d.declarator(&arg.decl);
                        });
                    }
                });
            }
            Declarator::Array(da) => {
                self.node("darray", da.tsize);
                self.nested(|d| d.declarator(&da.inner));
            }
        }
    }

    fn block(&mut self, block: &Block) {
        self.line(if block.braces { "block" } else { "block (no braces)" });
        self.nested(|d| {
            for stmt in &block.stmts {
                d.stmt(stmt);
            }
        });
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Break(_) | Stmt::Continue(_) => self.line(stmt.kind_name()),
            Stmt::Goto(s) => self.node("goto", Some(s.ttarget)),
            Stmt::Return(s) => {
                self.line("return");
                if let Some(arg) = &s.arg {
                    self.nested(|d| d.expr(arg));
                }
            }
            Stmt::If(s) => {
                self.line("if");
                self.nested(|d| {
                    d.expr(&s.cond);
                    d.block(&s.body);
                    for elif in &s.elifs {
                        d.line("elseif");
                        d.nested(|d| {
                            d.expr(&elif.cond);
                            d.block(&elif.body);
                        });
                    }
                    if let Some(else_) = &s.else_ {
                        d.line("else");
                        d.nested(|d| d.block(&else_.body));
                    }
                });
            }
            Stmt::While(s) => {
                self.line("while");
                self.nested(|d| {
                    d.expr(&s.cond);
                    d.block(&s.body);
                });
            }
            Stmt::Do(s) => {
                self.line("do");
                self.nested(|d| {
                    d.block(&s.body);
                    d.expr(&s.cond);
                });
            }
            Stmt::For(s) => {
                self.line("for");
                self.nested(|d| {
                    if let Some(linit) = &s.linit {
                        d.expr(linit);
                    }
                    if let Some(lcond) = &s.lcond {
                        d.expr(lcond);
                    }
                    if let Some(lnext) = &s.lnext {
                        d.expr(lnext);
                    }
                    d.block(&s.body);
                });
            }
            Stmt::Switch(s) => {
                self.line("switch");
                self.nested(|d| {
                    d.expr(&s.cond);
                    d.block(&s.body);
                });
            }
            Stmt::CLabel(s) => {
                self.node("clabel", Some(s.tlabel));
                if let Some(arg) = &s.arg {
                    self.nested(|d| d.expr(arg));
                }
            }
            Stmt::GLabel(s) => self.node("glabel", Some(s.tlabel)),
            Stmt::Decl(s) => {
                self.line("decl");
                self.nested(|d| {
                    d.dspecs(&s.specs);
                    d.decl_list(&s.decls);
                });
            }
            Stmt::Expr(s) => {
                self.line("stexpr");
                self.nested(|d| d.expr(&s.expr));
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Int(e) => self.node("eint", Some(e.tlit)),
            Expr::Char(e) => self.node("echar", Some(e.tlit)),
            Expr::Str(e) => self.node("estring", Some(e.tlit)),
            Expr::Ident(e) => self.node("eident", Some(e.tident)),
            Expr::Paren(e) => {
                self.line("eparen");
                self.nested(|d| d.expr(&e.inner));
            }
            Expr::Binop(e) => {
                self.node("ebinop", Some(e.top));
                self.nested(|d| {
                    d.expr(&e.lhs);
                    d.expr(&e.rhs);
                });
            }
            Expr::Tcond(e) => {
                self.line("etcond");
                self.nested(|d| {
                    d.expr(&e.cond);
                    d.expr(&e.targ);
                    d.expr(&e.farg);
                });
            }
            Expr::Comma(e) => {
                self.line("ecomma");
                self.nested(|d| {
                    d.expr(&e.lhs);
                    d.expr(&e.rhs);
                });
            }
            Expr::Call(e) => {
                self.line("efuncall");
                self.nested(|d| {
                    d.expr(&e.fun);
                    for arg in &e.args {
                        d.expr(&arg.expr);
                    }
                });
            }
            Expr::Index(e) => {
                self.line("eindex");
                self.nested(|d| {
                    d.expr(&e.base);
                    d.expr(&e.arg);
                });
            }
            Expr::Deref(e) => {
                self.line("ederef");
                self.nested(|d| d.expr(&e.arg));
            }
            Expr::Addr(e) => {
                self.line("eaddr");
                self.nested(|d| d.expr(&e.arg));
            }
            Expr::Sizeof(e) => {
                self.line("esizeof");
                self.nested(|d| match &e.arg {
                    SizeofArg::Type(tn) => {
                        d.sqlist(&tn.sqlist);
                        d.declarator(&tn.decl);
                    }
                    SizeofArg::Expr(arg) => d.expr(arg),
                });
            }
            Expr::Member(e) => {
                self.node("emember", Some(e.tmember));
                self.nested(|d| d.expr(&e.base));
            }
            Expr::IndMember(e) => {
                self.node("eindmember", Some(e.tmember));
                self.nested(|d| d.expr(&e.base));
            }
            Expr::Sign(e) => {
                self.node("eusign", Some(e.tsign));
                self.nested(|d| d.expr(&e.arg));
            }
            Expr::LNot(e) => {
                self.line("elnot");
                self.nested(|d| d.expr(&e.arg));
            }
            Expr::BNot(e) => {
                self.line("ebnot");
                self.nested(|d| d.expr(&e.arg));
            }
            Expr::PreAdj(e) => {
                self.node("epreadj", Some(e.tadj));
                self.nested(|d| d.expr(&e.arg));
            }
            Expr::PostAdj(e) => {
                self.node("epostadj", Some(e.tadj));
                self.nested(|d| d.expr(&e.arg));
            }
        }
    }
}
