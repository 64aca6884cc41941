//! Expression parsing.
//!
//! Binary expressions use precedence climbing over a binding-power table;
//! prefix and postfix forms are handled around it. The grammar covers the
//! standard C ladder from the comma operator at the bottom up through
//! assignment, the conditional operator, the binary operator families,
//! unary operators, postfix operators, and primaries.
//!
//! `sizeof ( X )` is the one context-sensitive spot: a single token of
//! lookahead after the `(` decides between a type name and a parenthesized
//! expression. Only builtin type keywords count as the start of a type
//! name; typedef names are not tracked.

use ccheck_lex::TokenKind;

use crate::ast::*;
use crate::{PResult, Parser};

/// Binding power levels, lowest first. Left-associative operators parse
/// their right operand one level tighter; right-associative ones reuse
/// their own level.
mod bp {
    pub const MIN: u8 = 0;
    pub const COMMA: u8 = 2;
    pub const ASSIGN: u8 = 4;
    pub const TERNARY: u8 = 6;
    pub const LOR: u8 = 8;
    pub const LAND: u8 = 10;
    pub const BOR: u8 = 12;
    pub const BXOR: u8 = 14;
    pub const BAND: u8 = 16;
    pub const EQUALITY: u8 = 18;
    pub const RELATIONAL: u8 = 20;
    pub const SHIFT: u8 = 22;
    pub const ADDITIVE: u8 = 24;
    pub const MULTIPLICATIVE: u8 = 26;
}

/// Returns the binding power of a left-associative binary operator.
fn binop_bp(kind: TokenKind) -> Option<u8> {
    use TokenKind::*;
    Some(match kind {
        OrOr => bp::LOR,
        AndAnd => bp::LAND,
        Pipe => bp::BOR,
        Caret => bp::BXOR,
        Ampersand => bp::BAND,
        EqEq | NotEq => bp::EQUALITY,
        Lt | Gt | LtEq | GtEq => bp::RELATIONAL,
        Shl | Shr => bp::SHIFT,
        Plus | Minus => bp::ADDITIVE,
        Star | Slash | Percent => bp::MULTIPLICATIVE,
        _ => return None,
    })
}

/// Returns true for assignment operator tokens.
fn is_assign_op(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        Eq | StarEq | SlashEq | PercentEq | PlusEq | MinusEq | ShlEq | ShrEq | AmpersandEq
            | CaretEq | PipeEq
    )
}

impl<'a> Parser<'a> {
    /// Parses a full expression, comma operator included.
    pub(crate) fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_expr_bp(bp::MIN)
    }

    /// Parses an assignment-expression: everything except the comma
    /// operator. Used for call arguments and initializers.
    pub(crate) fn parse_expr_nocomma(&mut self) -> PResult<Expr> {
        self.parse_expr_bp(bp::COMMA + 1)
    }

    /// Parses a conditional-expression, the C constant-expression form.
    pub(crate) fn parse_cond_expr(&mut self) -> PResult<Expr> {
        self.parse_expr_bp(bp::ASSIGN + 1)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> PResult<Expr> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let kind = self.kind();

            if kind == TokenKind::Comma && bp::COMMA >= min_bp {
                let tcomma = self.bump();
                let rhs = self.parse_expr_bp(bp::COMMA + 1)?;
                lhs = Expr::Comma(CommaExpr {
                    lhs: Box::new(lhs),
                    tcomma,
                    rhs: Box::new(rhs),
                });
                continue;
            }

            if is_assign_op(kind) && bp::ASSIGN >= min_bp {
                let top = self.bump();
                // Right-associative: reuse our own level.
                let rhs = self.parse_expr_bp(bp::ASSIGN)?;
                lhs = Expr::Binop(BinopExpr {
                    lhs: Box::new(lhs),
                    top,
                    rhs: Box::new(rhs),
                });
                continue;
            }

            if kind == TokenKind::Question && bp::TERNARY >= min_bp {
                let tqmark = self.bump();
                let targ = self.parse_expr_bp(bp::MIN)?;
                let tcolon = self.expect(TokenKind::Colon, "':'")?;
                let farg = self.parse_expr_bp(bp::TERNARY)?;
                lhs = Expr::Tcond(TcondExpr {
                    cond: Box::new(lhs),
                    tqmark,
                    targ: Box::new(targ),
                    tcolon,
                    farg: Box::new(farg),
                });
                continue;
            }

            if let Some(lbp) = binop_bp(kind) {
                if lbp >= min_bp {
                    let top = self.bump();
                    let rhs = self.parse_expr_bp(lbp + 1)?;
                    lhs = Expr::Binop(BinopExpr {
                        lhs: Box::new(lhs),
                        top,
                        rhs: Box::new(rhs),
                    });
                    continue;
                }
            }

            return Ok(lhs);
        }
    }

    /// Parses a unary-expression.
    fn parse_prefix(&mut self) -> PResult<Expr> {
        match self.kind() {
            TokenKind::Plus | TokenKind::Minus => {
                let tsign = self.bump();
                let arg = self.parse_prefix()?;
                Ok(Expr::Sign(SignExpr {
                    tsign,
                    arg: Box::new(arg),
                }))
            }
            TokenKind::Bang => {
                let tlnot = self.bump();
                let arg = self.parse_prefix()?;
                Ok(Expr::LNot(LNotExpr {
                    tlnot,
                    arg: Box::new(arg),
                }))
            }
            TokenKind::Tilde => {
                let tbnot = self.bump();
                let arg = self.parse_prefix()?;
                Ok(Expr::BNot(BNotExpr {
                    tbnot,
                    arg: Box::new(arg),
                }))
            }
            TokenKind::Ampersand => {
                let tamper = self.bump();
                let arg = self.parse_prefix()?;
                Ok(Expr::Addr(AddrExpr {
                    tamper,
                    arg: Box::new(arg),
                }))
            }
            TokenKind::Star => {
                let tasterisk = self.bump();
                let arg = self.parse_prefix()?;
                Ok(Expr::Deref(DerefExpr {
                    tasterisk,
                    arg: Box::new(arg),
                }))
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let tadj = self.bump();
                let arg = self.parse_prefix()?;
                Ok(Expr::PreAdj(PreAdjExpr {
                    tadj,
                    arg: Box::new(arg),
                }))
            }
            TokenKind::Sizeof => self.parse_sizeof(),
            _ => self.parse_postfix(),
        }
    }

    /// Parses `sizeof`, deciding between a type name and an expression
    /// operand by one token of lookahead after the `(`.
    fn parse_sizeof(&mut self) -> PResult<Expr> {
        let tsizeof = self.bump();

        if self.kind() == TokenKind::LParen && self.peek_kind(1).starts_type_name() {
            let tlparen = self.bump();
            let sqlist = self.parse_sqlist()?;
            let decl = self.parse_declarator()?;
            let trparen = self.expect(TokenKind::RParen, "')'")?;
            return Ok(Expr::Sizeof(SizeofExpr {
                tsizeof,
                tlparen: Some(tlparen),
                arg: SizeofArg::Type(TypeName {
                    sqlist,
                    decl: Box::new(decl),
                }),
                trparen: Some(trparen),
            }));
        }

        // Expression operand; any parentheses belong to the operand.
        let arg = self.parse_prefix()?;
        Ok(Expr::Sizeof(SizeofExpr {
            tsizeof,
            tlparen: None,
            arg: SizeofArg::Expr(Box::new(arg)),
            trparen: None,
        }))
    }

    /// Parses a postfix-expression: a primary followed by call, index,
    /// member, and adjustment suffixes.
    fn parse_postfix(&mut self) -> PResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.kind() {
                TokenKind::LParen => {
                    let tlparen = self.bump();
                    let mut args = Vec::new();
                    if self.kind() != TokenKind::RParen {
                        loop {
                            let arg = self.parse_expr_nocomma()?;
                            let tcomma = self.eat(TokenKind::Comma);
                            let done = tcomma.is_none();
                            args.push(CallArg { expr: arg, tcomma });
                            if done || self.kind() == TokenKind::RParen {
                                break;
                            }
                        }
                    }
                    let trparen = self.expect(TokenKind::RParen, "')'")?;
                    expr = Expr::Call(CallExpr {
                        fun: Box::new(expr),
                        tlparen,
                        args,
                        trparen,
                    });
                }
                TokenKind::LBracket => {
                    let tlbracket = self.bump();
                    let arg = self.parse_expr()?;
                    let trbracket = self.expect(TokenKind::RBracket, "']'")?;
                    expr = Expr::Index(IndexExpr {
                        base: Box::new(expr),
                        tlbracket,
                        arg: Box::new(arg),
                        trbracket,
                    });
                }
                TokenKind::Period => {
                    let tperiod = self.bump();
                    let tmember = self.expect(TokenKind::Ident, "member name")?;
                    expr = Expr::Member(MemberExpr {
                        base: Box::new(expr),
                        tperiod,
                        tmember,
                    });
                }
                TokenKind::Arrow => {
                    let tarrow = self.bump();
                    let tmember = self.expect(TokenKind::Ident, "member name")?;
                    expr = Expr::IndMember(IndMemberExpr {
                        base: Box::new(expr),
                        tarrow,
                        tmember,
                    });
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let tadj = self.bump();
                    expr = Expr::PostAdj(PostAdjExpr {
                        arg: Box::new(expr),
                        tadj,
                    });
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Parses a primary-expression.
    fn parse_primary(&mut self) -> PResult<Expr> {
        match self.kind() {
            TokenKind::Number => Ok(Expr::Int(IntExpr { tlit: self.bump() })),
            TokenKind::CharLit => Ok(Expr::Char(CharExpr { tlit: self.bump() })),
            TokenKind::StrLit => Ok(Expr::Str(StrExpr { tlit: self.bump() })),
            TokenKind::Ident => Ok(Expr::Ident(IdentExpr {
                tident: self.bump(),
            })),
            TokenKind::LParen => {
                let tlparen = self.bump();
                let inner = self.parse_expr()?;
                let trparen = self.expect(TokenKind::RParen, "')'")?;
                Ok(Expr::Paren(ParenExpr {
                    tlparen,
                    inner: Box::new(inner),
                    trparen,
                }))
            }
            _ => self.error("expression"),
        }
    }
}
