//! AST-driven token classification.
//!
//! The walk visits every node depth-first, left to right, and calls one
//! spacing predicate per token slot. Statement heads and the leftmost
//! token of each expression statement must begin a line; labels dedent by
//! one for just their leading token; record and enum members live in a
//! nested scope; switch bodies nest twice so that case labels end up one
//! tab outside the statements they annotate.

use ccheck_lex::TokId;
use ccheck_par::ast::*;

use crate::space::TokenCheck;
use crate::{Scope, StyleChecker};

const MSG_STMT_NEWLINE: &str = "Statement should start on a new line.";
const MSG_DECL_NEWLINE: &str = "Declaration should start on a new line.";
const MSG_MEMBER_NEWLINE: &str = "Record member should start on a new line.";
const MSG_ENUMERATOR_NEWLINE: &str = "Enumerator should start on a new line.";
const MSG_LABEL_NEWLINE: &str = "Label should start on a new line.";
const MSG_FN_OPEN_NEWLINE: &str = "Function opening brace should start on a new line.";
const MSG_CLOSE_NEWLINE: &str = "'}' should start on a new line.";
const MSG_ELSE_NEWLINE: &str = "'else' should start on a new line.";
const MSG_WHILE_NEWLINE: &str = "'while' should start on a new line.";

const MSG_BLOCK_BRACE_SPACE: &str = "Expected single space before block opening brace.";
const MSG_DEF_BRACE_SPACE: &str = "Expected single space before '{'.";
const MSG_KW_PAREN_SPACE: &str = "Expected single space before '('.";
const MSG_ELSE_SPACE: &str = "Expected single space between '}' and 'else'.";
const MSG_ELSE_IF_SPACE: &str = "Expected single space between 'else' and 'if'.";
const MSG_WHILE_SPACE: &str = "Expected single space between '}' and 'while'.";
const MSG_TAG_SPACE: &str = "Expected single space before tag name.";
const MSG_GOTO_SPACE: &str = "Expected single space after 'goto'.";
const MSG_RETURN_SPACE: &str = "Expected single space after 'return'.";
const MSG_CASE_SPACE: &str = "Expected single space after 'case'.";
const MSG_SIZEOF_SPACE: &str = "Expected single space after 'sizeof'.";

const MSG_WS_AFTER_LPAREN: &str = "Unexpected whitespace after '('.";
const MSG_WS_BEFORE_LPAREN: &str = "Unexpected whitespace before '('.";
const MSG_WS_BEFORE_RPAREN: &str = "Unexpected whitespace before ')'.";
const MSG_WS_BEFORE_LBRACKET: &str = "Unexpected whitespace before '['.";
const MSG_WS_AFTER_LBRACKET: &str = "Unexpected whitespace after '['.";
const MSG_WS_BEFORE_RBRACKET: &str = "Unexpected whitespace before ']'.";
const MSG_WS_BEFORE_SCOLON: &str = "Unexpected whitespace before ';'.";
const MSG_WS_BEFORE_COMMA: &str = "Unexpected whitespace before ','.";
const MSG_WS_BEFORE_COLON: &str = "Unexpected whitespace before ':'.";
const MSG_WS_AFTER_STAR: &str = "Unexpected whitespace after '*'.";
const MSG_WS_AFTER_UNOP: &str = "Unexpected whitespace after unary operator.";
const MSG_WS_BEFORE_POSTOP: &str = "Unexpected whitespace before postfix operator.";
const MSG_WS_BEFORE_PERIOD: &str = "Unexpected whitespace before '.'.";
const MSG_WS_AFTER_PERIOD: &str = "Unexpected whitespace after '.'.";
const MSG_WS_BEFORE_ARROW: &str = "Unexpected whitespace before '->'.";
const MSG_WS_AFTER_ARROW: &str = "Unexpected whitespace after '->'.";

const MSG_SPACE_AFTER_COMMA: &str = "Expected space after ','.";
const MSG_SPACE_AFTER_SCOLON: &str = "Expected space after ';'.";
const MSG_OP_BEFORE: &str = "Expected space before binary operator.";
const MSG_OP_AFTER: &str = "Expected space after binary operator.";
const MSG_QMARK_BEFORE: &str = "Expected space before '?'.";
const MSG_QMARK_AFTER: &str = "Expected space after '?'.";
const MSG_COLON_BEFORE: &str = "Expected space before ':'.";
const MSG_COLON_AFTER: &str = "Expected space after ':'.";

impl<'a> StyleChecker<'a> {
    /// Walks a whole translation unit.
    pub(crate) fn walk_module(&mut self, module: &Module) {
        let scope = Scope::top();
        for item in &module.items {
            match item {
                ModItem::Decl(decl) => self.walk_gdecln(decl, scope),
                ModItem::Stmt(stmt) => self.walk_stmt(stmt, scope),
            }
        }
    }

    fn walk_gdecln(&mut self, decl: &GlobalDecl, scope: Scope) {
        self.walk_dspecs(&decl.specs, scope, TokenCheck::LBegin(MSG_DECL_NEWLINE));
        self.walk_decl_list(&decl.decls, scope);
        if let Some(body) = &decl.body {
            self.walk_fun_body(body, scope);
        }
        if let Some(tscolon) = decl.tscolon {
            self.nows_before(tscolon, scope, MSG_WS_BEFORE_SCOLON);
        }
    }

    // ------------------------------------------------------------------
    // Specifiers
    // ------------------------------------------------------------------

    fn walk_dspecs(&mut self, specs: &DeclSpecs, scope: Scope, first: TokenCheck) {
        for (i, spec) in specs.specs.iter().enumerate() {
            let tc = if i == 0 { first } else { TokenCheck::Any };
            match spec {
                DeclSpec::StorageClass(sc) => self.apply(sc.tsclass, scope, tc),
                DeclSpec::TypeQual(tq) => self.apply(tq.tqual, scope, tc),
                DeclSpec::FnSpec(fs) => self.apply(fs.tfspec, scope, tc),
                DeclSpec::TypeSpec(ts) => self.walk_type_spec(ts, scope, tc),
            }
        }
    }

    fn walk_sqlist(&mut self, sqlist: &SpecQualList, scope: Scope, first: TokenCheck) {
        for (i, elem) in sqlist.elems.iter().enumerate() {
            let tc = if i == 0 { first } else { TokenCheck::Any };
            match elem {
                SpecQual::TypeQual(tq) => self.apply(tq.tqual, scope, tc),
                SpecQual::TypeSpec(ts) => self.walk_type_spec(ts, scope, tc),
            }
        }
    }

    fn walk_type_spec(&mut self, ts: &TypeSpec, scope: Scope, tc: TokenCheck) {
        match ts {
            TypeSpec::Basic(basic) => self.apply(basic.tbasic, scope, tc),
            TypeSpec::Ident(ident) => self.apply(ident.tname, scope, tc),
            TypeSpec::Record(rec) => self.walk_record(rec, scope, tc),
            TypeSpec::Enum(en) => self.walk_enum(en, scope, tc),
        }
    }

    fn walk_record(&mut self, rec: &TsRecord, scope: Scope, tc: TokenCheck) {
        self.apply(rec.tkw, scope, tc);
        if let Some(tident) = rec.tident {
            self.nbspace_before(tident, scope, MSG_TAG_SPACE);
        }
        if let Some(tlbrace) = rec.tlbrace {
            self.nbspace_before(tlbrace, scope, MSG_DEF_BRACE_SPACE);
            let mscope = scope.nested();
            for member in &rec.members {
                self.walk_sqlist(&member.sqlist, mscope, TokenCheck::LBegin(MSG_MEMBER_NEWLINE));
                self.walk_decl_list(&member.decls, mscope);
                self.nows_before(member.tscolon, mscope, MSG_WS_BEFORE_SCOLON);
            }
            if let Some(trbrace) = rec.trbrace {
                self.lbegin(trbrace, scope, MSG_CLOSE_NEWLINE);
            }
        }
    }

    fn walk_enum(&mut self, en: &TsEnum, scope: Scope, tc: TokenCheck) {
        self.apply(en.tenum, scope, tc);
        if let Some(tident) = en.tident {
            self.nbspace_before(tident, scope, MSG_TAG_SPACE);
        }
        if let Some(tlbrace) = en.tlbrace {
            self.nbspace_before(tlbrace, scope, MSG_DEF_BRACE_SPACE);
            let mscope = scope.nested();
            for elem in &en.elems {
                self.lbegin(elem.tident, mscope, MSG_ENUMERATOR_NEWLINE);
                if let Some(teq) = elem.teq {
                    self.brkspace_before(teq, mscope, MSG_OP_BEFORE);
                    self.brkspace_after(teq, mscope, MSG_OP_AFTER);
                }
                if let Some(init) = &elem.init {
                    self.walk_expr(init, mscope, TokenCheck::Any);
                }
                if let Some(tcomma) = elem.tcomma {
                    self.nows_before(tcomma, mscope, MSG_WS_BEFORE_COMMA);
                }
            }
            if let Some(trbrace) = en.trbrace {
                self.lbegin(trbrace, scope, MSG_CLOSE_NEWLINE);
            }
        }
    }

    // ------------------------------------------------------------------
    // Declarators
    // ------------------------------------------------------------------

    fn walk_decl_list(&mut self, dlist: &DeclList, scope: Scope) {
        for entry in &dlist.entries {
            if let Some(tcomma) = entry.tcomma {
                self.nows_before(tcomma, scope, MSG_WS_BEFORE_COMMA);
                self.brkspace_after(tcomma, scope, MSG_SPACE_AFTER_COMMA);
            }
            self.walk_declarator(&entry.decl, scope);
            if let Some(teq) = entry.teq {
                self.brkspace_before(teq, scope, MSG_OP_BEFORE);
                self.brkspace_after(teq, scope, MSG_OP_AFTER);
            }
            if let Some(init) = &entry.init {
                self.walk_expr(init, scope, TokenCheck::Any);
            }
        }
    }

    fn walk_declarator(&mut self, decl: &Declarator, scope: Scope) {
        match decl {
            Declarator::Ident(d) => self.any(d.tident, scope),
            Declarator::NoIdent(_) => {}
            Declarator::Paren(d) => {
                self.any(d.tlparen, scope);
                self.nsbrk_after(d.tlparen, scope, MSG_WS_AFTER_LPAREN);
                self.walk_declarator(&d.inner, scope);
                self.nows_before(d.trparen, scope, MSG_WS_BEFORE_RPAREN);
            }
            Declarator::Ptr(d) => {
                // `* const p` keeps the separating space; a bare `*`
                // attaches to what it declares.
                if d.tquals.is_empty() {
                    self.nows_after(d.tasterisk, scope, MSG_WS_AFTER_STAR);
                } else {
                    self.any(d.tasterisk, scope);
                    for &tqual in &d.tquals {
                        self.any(tqual, scope);
                    }
                }
                self.walk_declarator(&d.inner, scope);
            }
            Declarator::Fun(d) => {
                self.walk_declarator(&d.inner, scope);
                if !matches!(*d.inner, Declarator::NoIdent(_)) {
                    self.nows_before(d.tlparen, scope, MSG_WS_BEFORE_LPAREN);
                }
                self.nsbrk_after(d.tlparen, scope, MSG_WS_AFTER_LPAREN);
                for arg in &d.args {
                    self.walk_dspecs(&arg.specs, scope, TokenCheck::Any);
                    self.walk_declarator(&arg.decl, scope);
                    if let Some(tcomma) = arg.tcomma {
                        self.nows_before(tcomma, scope, MSG_WS_BEFORE_COMMA);
                        self.brkspace_after(tcomma, scope, MSG_SPACE_AFTER_COMMA);
                    }
                }
                self.nows_before(d.trparen, scope, MSG_WS_BEFORE_RPAREN);
            }
            Declarator::Array(d) => {
                self.walk_declarator(&d.inner, scope);
                self.nows_before(d.tlbracket, scope, MSG_WS_BEFORE_LBRACKET);
                self.nows_after(d.tlbracket, scope, MSG_WS_AFTER_LBRACKET);
                if let Some(tsize) = d.tsize {
                    self.any(tsize, scope);
                }
                self.nows_before(d.trbracket, scope, MSG_WS_BEFORE_RBRACKET);
            }
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn walk_fun_body(&mut self, body: &Block, scope: Scope) {
        if let Some(topen) = body.topen {
            self.lbegin(topen, scope, MSG_FN_OPEN_NEWLINE);
        }
        let inner = scope.nested();
        for stmt in &body.stmts {
            self.walk_stmt(stmt, inner);
        }
        if let Some(tclose) = body.tclose {
            self.lbegin(tclose, scope, MSG_CLOSE_NEWLINE);
        }
    }

    /// Walks the body of a control statement. A braced body opens on the
    /// controlling line; an unbraced body is a nested single statement.
    fn walk_stmt_body(&mut self, block: &Block, scope: Scope) {
        if block.braces {
            if let Some(topen) = block.topen {
                self.nbspace_before(topen, scope, MSG_BLOCK_BRACE_SPACE);
            }
            let inner = scope.nested();
            for stmt in &block.stmts {
                self.walk_stmt(stmt, inner);
            }
            if let Some(tclose) = block.tclose {
                self.lbegin(tclose, scope, MSG_CLOSE_NEWLINE);
            }
        } else {
            let inner = scope.nested();
            for stmt in &block.stmts {
                self.walk_stmt(stmt, inner);
            }
        }
    }

    /// Walks a switch body. Statements nest twice so case labels, which
    /// dedent by one, sit one tab outside the statements they annotate.
    fn walk_switch_body(&mut self, block: &Block, scope: Scope) {
        if block.braces {
            if let Some(topen) = block.topen {
                self.nbspace_before(topen, scope, MSG_BLOCK_BRACE_SPACE);
            }
            let inner = scope.nested().nested();
            for stmt in &block.stmts {
                self.walk_stmt(stmt, inner);
            }
            if let Some(tclose) = block.tclose {
                self.lbegin(tclose, scope, MSG_CLOSE_NEWLINE);
            }
        } else {
            let inner = scope.nested();
            for stmt in &block.stmts {
                self.walk_stmt(stmt, inner);
            }
        }
    }

    fn walk_stmt(&mut self, stmt: &Stmt, scope: Scope) {
        match stmt {
            Stmt::Break(s) => {
                self.lbegin(s.tbreak, scope, MSG_STMT_NEWLINE);
                self.nows_before(s.tscolon, scope, MSG_WS_BEFORE_SCOLON);
            }
            Stmt::Continue(s) => {
                self.lbegin(s.tcontinue, scope, MSG_STMT_NEWLINE);
                self.nows_before(s.tscolon, scope, MSG_WS_BEFORE_SCOLON);
            }
            Stmt::Goto(s) => {
                self.lbegin(s.tgoto, scope, MSG_STMT_NEWLINE);
                self.nbspace_before(s.ttarget, scope, MSG_GOTO_SPACE);
                self.nows_before(s.tscolon, scope, MSG_WS_BEFORE_SCOLON);
            }
            Stmt::Return(s) => {
                self.lbegin(s.treturn, scope, MSG_STMT_NEWLINE);
                if let Some(arg) = &s.arg {
                    self.walk_expr(arg, scope, TokenCheck::NbSpaceBefore(MSG_RETURN_SPACE));
                }
                self.nows_before(s.tscolon, scope, MSG_WS_BEFORE_SCOLON);
            }
            Stmt::If(s) => self.walk_if(s, scope),
            Stmt::While(s) => {
                self.lbegin(s.twhile, scope, MSG_STMT_NEWLINE);
                self.walk_cond_parens(s.tlparen, &s.cond, s.trparen, scope);
                self.walk_stmt_body(&s.body, scope);
            }
            Stmt::Do(s) => {
                self.lbegin(s.tdo, scope, MSG_STMT_NEWLINE);
                self.walk_stmt_body(&s.body, scope);
                if s.body.braces {
                    self.nbspace_before(s.twhile, scope, MSG_WHILE_SPACE);
                } else {
                    self.lbegin(s.twhile, scope, MSG_WHILE_NEWLINE);
                }
                self.walk_cond_parens(s.tlparen, &s.cond, s.trparen, scope);
                self.nows_before(s.tscolon, scope, MSG_WS_BEFORE_SCOLON);
            }
            Stmt::For(s) => {
                self.lbegin(s.tfor, scope, MSG_STMT_NEWLINE);
                self.nbspace_before(s.tlparen, scope, MSG_KW_PAREN_SPACE);
                self.nsbrk_after(s.tlparen, scope, MSG_WS_AFTER_LPAREN);
                if let Some(linit) = &s.linit {
                    self.walk_expr(linit, scope, TokenCheck::Any);
                }
                self.nows_before(s.tscolon1, scope, MSG_WS_BEFORE_SCOLON);
                if let Some(lcond) = &s.lcond {
                    self.brkspace_after(s.tscolon1, scope, MSG_SPACE_AFTER_SCOLON);
                    self.walk_expr(lcond, scope, TokenCheck::Any);
                }
                self.nows_before(s.tscolon2, scope, MSG_WS_BEFORE_SCOLON);
                if let Some(lnext) = &s.lnext {
                    self.brkspace_after(s.tscolon2, scope, MSG_SPACE_AFTER_SCOLON);
                    self.walk_expr(lnext, scope, TokenCheck::Any);
                }
                self.nows_before(s.trparen, scope, MSG_WS_BEFORE_RPAREN);
                self.walk_stmt_body(&s.body, scope);
            }
            Stmt::Switch(s) => {
                self.lbegin(s.tswitch, scope, MSG_STMT_NEWLINE);
                self.walk_cond_parens(s.tlparen, &s.cond, s.trparen, scope);
                self.walk_switch_body(&s.body, scope);
            }
            Stmt::CLabel(s) => {
                self.lbegin(s.tlabel, scope.dedented(), MSG_LABEL_NEWLINE);
                if let Some(arg) = &s.arg {
                    self.walk_expr(arg, scope, TokenCheck::NbSpaceBefore(MSG_CASE_SPACE));
                }
                self.nows_before(s.tcolon, scope, MSG_WS_BEFORE_COLON);
            }
            Stmt::GLabel(s) => {
                self.lbegin(s.tlabel, scope.dedented(), MSG_LABEL_NEWLINE);
                self.nows_before(s.tcolon, scope, MSG_WS_BEFORE_COLON);
            }
            Stmt::Decl(s) => {
                self.walk_dspecs(&s.specs, scope, TokenCheck::LBegin(MSG_DECL_NEWLINE));
                self.walk_decl_list(&s.decls, scope);
                self.nows_before(s.tscolon, scope, MSG_WS_BEFORE_SCOLON);
            }
            Stmt::Expr(s) => {
                self.walk_expr(&s.expr, scope, TokenCheck::LBegin(MSG_STMT_NEWLINE));
                self.nows_before(s.tscolon, scope, MSG_WS_BEFORE_SCOLON);
            }
        }
    }

    fn walk_if(&mut self, s: &IfStmt, scope: Scope) {
        self.lbegin(s.tif, scope, MSG_STMT_NEWLINE);
        self.walk_cond_parens(s.tlparen, &s.cond, s.trparen, scope);
        self.walk_stmt_body(&s.body, scope);

        let mut prev_braced = s.body.braces;
        for elif in &s.elifs {
            if prev_braced {
                self.nbspace_before(elif.telse, scope, MSG_ELSE_SPACE);
            } else {
                self.lbegin(elif.telse, scope, MSG_ELSE_NEWLINE);
            }
            self.nbspace_before(elif.tif, scope, MSG_ELSE_IF_SPACE);
            self.walk_cond_parens(elif.tlparen, &elif.cond, elif.trparen, scope);
            self.walk_stmt_body(&elif.body, scope);
            prev_braced = elif.body.braces;
        }

        if let Some(else_) = &s.else_ {
            if prev_braced {
                self.nbspace_before(else_.telse, scope, MSG_ELSE_SPACE);
            } else {
                self.lbegin(else_.telse, scope, MSG_ELSE_NEWLINE);
            }
            self.walk_stmt_body(&else_.body, scope);
        }
    }

    /// Condition parentheses after a control keyword: one space before
    /// `(`, nothing after it, nothing before `)`.
    fn walk_cond_parens(&mut self, tlparen: TokId, cond: &Expr, trparen: TokId, scope: Scope) {
        self.nbspace_before(tlparen, scope, MSG_KW_PAREN_SPACE);
        self.nsbrk_after(tlparen, scope, MSG_WS_AFTER_LPAREN);
        self.walk_expr(cond, scope, TokenCheck::Any);
        self.nows_before(trparen, scope, MSG_WS_BEFORE_RPAREN);
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Walks an expression. `first` is the requirement to apply to the
    /// leftmost token of the subtree; it rides down the left spine.
    fn walk_expr(&mut self, expr: &Expr, scope: Scope, first: TokenCheck) {
        match expr {
            Expr::Int(e) => self.apply(e.tlit, scope, first),
            Expr::Char(e) => self.apply(e.tlit, scope, first),
            Expr::Str(e) => self.apply(e.tlit, scope, first),
            Expr::Ident(e) => self.apply(e.tident, scope, first),
            Expr::Paren(e) => {
                self.apply(e.tlparen, scope, first);
                self.nsbrk_after(e.tlparen, scope, MSG_WS_AFTER_LPAREN);
                self.walk_expr(&e.inner, scope, TokenCheck::Any);
                self.nows_before(e.trparen, scope, MSG_WS_BEFORE_RPAREN);
            }
            Expr::Binop(e) => {
                self.walk_expr(&e.lhs, scope, first);
                self.brkspace_before(e.top, scope, MSG_OP_BEFORE);
                self.brkspace_after(e.top, scope, MSG_OP_AFTER);
                self.walk_expr(&e.rhs, scope, TokenCheck::Any);
            }
            Expr::Tcond(e) => {
                self.walk_expr(&e.cond, scope, first);
                self.brkspace_before(e.tqmark, scope, MSG_QMARK_BEFORE);
                self.brkspace_after(e.tqmark, scope, MSG_QMARK_AFTER);
                self.walk_expr(&e.targ, scope, TokenCheck::Any);
                self.brkspace_before(e.tcolon, scope, MSG_COLON_BEFORE);
                self.brkspace_after(e.tcolon, scope, MSG_COLON_AFTER);
                self.walk_expr(&e.farg, scope, TokenCheck::Any);
            }
            Expr::Comma(e) => {
                self.walk_expr(&e.lhs, scope, first);
                self.nows_before(e.tcomma, scope, MSG_WS_BEFORE_COMMA);
                self.brkspace_after(e.tcomma, scope, MSG_SPACE_AFTER_COMMA);
                self.walk_expr(&e.rhs, scope, TokenCheck::Any);
            }
            Expr::Call(e) => {
                self.walk_expr(&e.fun, scope, first);
                self.nows_before(e.tlparen, scope, MSG_WS_BEFORE_LPAREN);
                self.nsbrk_after(e.tlparen, scope, MSG_WS_AFTER_LPAREN);
                for arg in &e.args {
                    self.walk_expr(&arg.expr, scope, TokenCheck::Any);
                    if let Some(tcomma) = arg.tcomma {
                        self.nows_before(tcomma, scope, MSG_WS_BEFORE_COMMA);
                        self.brkspace_after(tcomma, scope, MSG_SPACE_AFTER_COMMA);
                    }
                }
                self.nows_before(e.trparen, scope, MSG_WS_BEFORE_RPAREN);
            }
            Expr::Index(e) => {
                self.walk_expr(&e.base, scope, first);
                self.nows_before(e.tlbracket, scope, MSG_WS_BEFORE_LBRACKET);
                self.nows_after(e.tlbracket, scope, MSG_WS_AFTER_LBRACKET);
                self.walk_expr(&e.arg, scope, TokenCheck::Any);
                self.nows_before(e.trbracket, scope, MSG_WS_BEFORE_RBRACKET);
            }
            Expr::Deref(e) => {
                self.apply(e.tasterisk, scope, first);
                self.nows_after(e.tasterisk, scope, MSG_WS_AFTER_UNOP);
                self.walk_expr(&e.arg, scope, TokenCheck::Any);
            }
            Expr::Addr(e) => {
                self.apply(e.tamper, scope, first);
                self.nows_after(e.tamper, scope, MSG_WS_AFTER_UNOP);
                self.walk_expr(&e.arg, scope, TokenCheck::Any);
            }
            Expr::Sizeof(e) => self.walk_sizeof(e, scope, first),
            Expr::Member(e) => {
                self.walk_expr(&e.base, scope, first);
                self.nows_before(e.tperiod, scope, MSG_WS_BEFORE_PERIOD);
                self.nows_after(e.tperiod, scope, MSG_WS_AFTER_PERIOD);
                self.any(e.tmember, scope);
            }
            Expr::IndMember(e) => {
                self.walk_expr(&e.base, scope, first);
                self.nows_before(e.tarrow, scope, MSG_WS_BEFORE_ARROW);
                self.nows_after(e.tarrow, scope, MSG_WS_AFTER_ARROW);
                self.any(e.tmember, scope);
            }
            Expr::Sign(e) => {
                self.apply(e.tsign, scope, first);
                self.nows_after(e.tsign, scope, MSG_WS_AFTER_UNOP);
                self.walk_expr(&e.arg, scope, TokenCheck::Any);
            }
            Expr::LNot(e) => {
                self.apply(e.tlnot, scope, first);
                self.nows_after(e.tlnot, scope, MSG_WS_AFTER_UNOP);
                self.walk_expr(&e.arg, scope, TokenCheck::Any);
            }
            Expr::BNot(e) => {
                self.apply(e.tbnot, scope, first);
                self.nows_after(e.tbnot, scope, MSG_WS_AFTER_UNOP);
                self.walk_expr(&e.arg, scope, TokenCheck::Any);
            }
            Expr::PreAdj(e) => {
                self.apply(e.tadj, scope, first);
                self.nows_after(e.tadj, scope, MSG_WS_AFTER_UNOP);
                self.walk_expr(&e.arg, scope, TokenCheck::Any);
            }
            Expr::PostAdj(e) => {
                self.walk_expr(&e.arg, scope, first);
                self.nows_before(e.tadj, scope, MSG_WS_BEFORE_POSTOP);
            }
        }
    }

    fn walk_sizeof(&mut self, e: &SizeofExpr, scope: Scope, first: TokenCheck) {
        self.apply(e.tsizeof, scope, first);
        match &e.arg {
            SizeofArg::Type(tn) => {
                if let Some(tlparen) = e.tlparen {
                    self.nows_before(tlparen, scope, MSG_WS_BEFORE_LPAREN);
                    self.nsbrk_after(tlparen, scope, MSG_WS_AFTER_LPAREN);
                }
                self.walk_sqlist(&tn.sqlist, scope, TokenCheck::Any);
                self.walk_declarator(&tn.decl, scope);
                if let Some(trparen) = e.trparen {
                    self.nows_before(trparen, scope, MSG_WS_BEFORE_RPAREN);
                }
            }
            SizeofArg::Expr(arg) => {
                // `sizeof(x)` attaches to the parenthesis; `sizeof x`
                // takes a separating space.
                let tc = if matches!(**arg, Expr::Paren(_)) {
                    TokenCheck::Any
                } else {
                    TokenCheck::NbSpaceBefore(MSG_SIZEOF_SPACE)
                };
                self.walk_expr(arg, scope, tc);
            }
        }
    }
}
