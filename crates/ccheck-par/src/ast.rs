//! AST node definitions.
//!
//! The tree abstracts the grammar but stays anchored to the concrete
//! source: every syntactic token consumed by the parser is recorded in a
//! named slot on the node it belongs to, as a [`TokId`] handle into the
//! token stream. Optional slots hold `None` when the grammar branch did not
//! consume the token (an absent identifier in an anonymous struct, the
//! missing comma after the last argument, and so on).
//!
//! The checker walks this tree and uses the slots to address the tokens it
//! classifies.

use ccheck_lex::TokId;

// ============================================================================
// MODULE AND DECLARATIONS
// ============================================================================

/// AST root: one translation unit.
#[derive(Debug)]
pub struct Module {
    /// Top-level items in source order.
    pub items: Vec<ModItem>,
}

/// One top-level item.
///
/// Besides declarations, keyword-led statements are accepted at file scope
/// so that snippets like a bare `if` block can be checked on their own.
#[derive(Debug)]
pub enum ModItem {
    Decl(GlobalDecl),
    Stmt(Stmt),
}

/// Global declaration or function definition.
///
/// Example: `static int counts[4];` or `int main(void) { ... }`
#[derive(Debug)]
pub struct GlobalDecl {
    /// Declaration specifiers.
    pub specs: DeclSpecs,

    /// Declared entities (may be empty, e.g. `struct foo { ... };`).
    pub decls: DeclList,

    /// Function body, for function definitions.
    pub body: Option<Block>,

    /// Terminating `;`, absent on function definitions.
    pub tscolon: Option<TokId>,
}

/// Declaration specifier sequence.
///
/// Any mix of storage class specifiers, type specifiers, type qualifiers,
/// and function specifiers; order among them is not enforced.
#[derive(Debug)]
pub struct DeclSpecs {
    pub specs: Vec<DeclSpec>,
}

/// One declaration specifier.
#[derive(Debug)]
pub enum DeclSpec {
    /// `typedef`, `extern`, `static`, `auto`, `register`
    StorageClass(StorageClass),
    /// Type specifier
    TypeSpec(TypeSpec),
    /// `const`, `restrict`, `volatile`
    TypeQual(TypeQual),
    /// `inline`
    FnSpec(FnSpec),
}

/// Storage class specifier.
#[derive(Debug)]
pub struct StorageClass {
    pub tsclass: TokId,
}

/// Type qualifier.
#[derive(Debug)]
pub struct TypeQual {
    pub tqual: TokId,
}

/// Function specifier (`inline`).
#[derive(Debug)]
pub struct FnSpec {
    pub tfspec: TokId,
}

// ============================================================================
// TYPE SPECIFIERS
// ============================================================================

/// Type specifier.
#[derive(Debug)]
pub enum TypeSpec {
    /// Builtin type keyword: `int`, `unsigned`, `double`, ...
    Basic(TsBasic),
    /// Identifier used as a type name.
    Ident(TsIdent),
    /// `struct` or `union`, possibly with a member list.
    Record(TsRecord),
    /// `enum`, possibly with an enumerator list.
    Enum(TsEnum),
}

/// Basic type specifier keyword.
#[derive(Debug)]
pub struct TsBasic {
    pub tbasic: TokId,
}

/// Identifier type specifier.
#[derive(Debug)]
pub struct TsIdent {
    pub tname: TokId,
}

/// Record flavor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Struct,
    Union,
}

/// `struct`/`union` type specifier.
///
/// At least one of the tag identifier and the member list is present.
#[derive(Debug)]
pub struct TsRecord {
    pub rkind: RecordKind,
    /// The `struct` or `union` keyword.
    pub tkw: TokId,
    /// Tag identifier, absent for anonymous records.
    pub tident: Option<TokId>,
    /// `{` of the definition, if this is a definition.
    pub tlbrace: Option<TokId>,
    /// Member declarations.
    pub members: Vec<RecordMember>,
    /// `}` of the definition.
    pub trbrace: Option<TokId>,
}

/// One member declaration inside a record definition.
#[derive(Debug)]
pub struct RecordMember {
    pub sqlist: SpecQualList,
    pub decls: DeclList,
    pub tscolon: TokId,
}

/// `enum` type specifier.
#[derive(Debug)]
pub struct TsEnum {
    pub tenum: TokId,
    /// Tag identifier, absent for anonymous enums.
    pub tident: Option<TokId>,
    /// `{` of the definition, if this is a definition.
    pub tlbrace: Option<TokId>,
    /// Enumerators.
    pub elems: Vec<EnumElem>,
    /// `}` of the definition.
    pub trbrace: Option<TokId>,
}

/// One enumerator, with optional initializer and separating comma.
///
/// Example: `red = 4,`
#[derive(Debug)]
pub struct EnumElem {
    pub tident: TokId,
    pub teq: Option<TokId>,
    pub init: Option<Expr>,
    pub tcomma: Option<TokId>,
}

/// Specifier-qualifier list, as used in record members and type names.
#[derive(Debug)]
pub struct SpecQualList {
    pub elems: Vec<SpecQual>,
}

/// One element of a specifier-qualifier list.
#[derive(Debug)]
pub enum SpecQual {
    TypeSpec(TypeSpec),
    TypeQual(TypeQual),
}

// ============================================================================
// DECLARATORS
// ============================================================================

/// Declarator.
#[derive(Debug)]
pub enum Declarator {
    /// Plain identifier: `x`
    Ident(DIdent),
    /// Absent identifier, in abstract declarators: `int (*)(void)`
    NoIdent(DNoIdent),
    /// Parenthesized declarator: `(*fp)`
    Paren(DParen),
    /// Pointer declarator: `*p`, `* const p`
    Ptr(DPtr),
    /// Function declarator: `f(int a, int b)`
    Fun(DFun),
    /// Array declarator: `a[16]`
    Array(DArray),
}

/// Identifier declarator.
#[derive(Debug)]
pub struct DIdent {
    pub tident: TokId,
}

/// Absent-identifier declarator.
#[derive(Debug)]
pub struct DNoIdent {}

/// Parenthesized declarator.
#[derive(Debug)]
pub struct DParen {
    pub tlparen: TokId,
    pub inner: Box<Declarator>,
    pub trparen: TokId,
}

/// Pointer declarator.
#[derive(Debug)]
pub struct DPtr {
    pub tasterisk: TokId,
    /// Qualifiers following the `*`.
    pub tquals: Vec<TokId>,
    pub inner: Box<Declarator>,
}

/// Function declarator.
#[derive(Debug)]
pub struct DFun {
    pub inner: Box<Declarator>,
    pub tlparen: TokId,
    pub args: Vec<FunArg>,
    pub trparen: TokId,
}

/// One parameter declaration in a function declarator.
#[derive(Debug)]
pub struct FunArg {
    pub specs: DeclSpecs,
    pub decl: Declarator,
    /// Separating comma, absent on the last parameter.
    pub tcomma: Option<TokId>,
}

/// Array declarator.
#[derive(Debug)]
pub struct DArray {
    pub inner: Box<Declarator>,
    pub tlbracket: TokId,
    /// Size token, absent for `[]`.
    pub tsize: Option<TokId>,
    pub trbracket: TokId,
}

/// Declarator list with separating commas and optional initializers.
///
/// Example: `x = 1, *p, a[4]`
#[derive(Debug, Default)]
pub struct DeclList {
    pub entries: Vec<DeclEntry>,
}

/// One entry of a declarator list.
#[derive(Debug)]
pub struct DeclEntry {
    /// Separating comma, absent on the first entry.
    pub tcomma: Option<TokId>,
    pub decl: Declarator,
    /// `=` of the initializer, if any.
    pub teq: Option<TokId>,
    /// Initializer expression.
    pub init: Option<Expr>,
}

// ============================================================================
// STATEMENTS
// ============================================================================

/// A block: braced statement list or a single unbraced statement.
#[derive(Debug)]
pub struct Block {
    /// True when the block is delimited by braces.
    pub braces: bool,
    pub topen: Option<TokId>,
    pub stmts: Vec<Stmt>,
    pub tclose: Option<TokId>,
}

/// Statement.
#[derive(Debug)]
pub enum Stmt {
    Break(BreakStmt),
    Continue(ContinueStmt),
    Goto(GotoStmt),
    Return(ReturnStmt),
    If(IfStmt),
    While(WhileStmt),
    Do(DoStmt),
    For(ForStmt),
    Switch(SwitchStmt),
    /// `case`/`default` label
    CLabel(CLabelStmt),
    /// goto label
    GLabel(GLabelStmt),
    /// Local declaration
    Decl(DeclStmt),
    /// Expression statement
    Expr(ExprStmt),
}

impl Stmt {
    /// Returns the node kind name, for dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Break(_) => "break",
            Stmt::Continue(_) => "continue",
            Stmt::Goto(_) => "goto",
            Stmt::Return(_) => "return",
            Stmt::If(_) => "if",
            Stmt::While(_) => "while",
            Stmt::Do(_) => "do",
            Stmt::For(_) => "for",
            Stmt::Switch(_) => "switch",
            Stmt::CLabel(_) => "clabel",
            Stmt::GLabel(_) => "glabel",
            Stmt::Decl(_) => "decl",
            Stmt::Expr(_) => "stexpr",
        }
    }
}

/// `break;`
#[derive(Debug)]
pub struct BreakStmt {
    pub tbreak: TokId,
    pub tscolon: TokId,
}

/// `continue;`
#[derive(Debug)]
pub struct ContinueStmt {
    pub tcontinue: TokId,
    pub tscolon: TokId,
}

/// `goto label;`
#[derive(Debug)]
pub struct GotoStmt {
    pub tgoto: TokId,
    pub ttarget: TokId,
    pub tscolon: TokId,
}

/// `return;` or `return expr;`
#[derive(Debug)]
pub struct ReturnStmt {
    pub treturn: TokId,
    pub arg: Option<Expr>,
    pub tscolon: TokId,
}

/// `if` statement with any number of `else if` branches and an optional
/// final `else`.
#[derive(Debug)]
pub struct IfStmt {
    pub tif: TokId,
    pub tlparen: TokId,
    pub cond: Expr,
    pub trparen: TokId,
    pub body: Block,
    pub elifs: Vec<ElifBranch>,
    pub else_: Option<ElseBranch>,
}

/// One `else if (cond) ...` branch.
#[derive(Debug)]
pub struct ElifBranch {
    pub telse: TokId,
    pub tif: TokId,
    pub tlparen: TokId,
    pub cond: Expr,
    pub trparen: TokId,
    pub body: Block,
}

/// Final `else ...` branch.
#[derive(Debug)]
pub struct ElseBranch {
    pub telse: TokId,
    pub body: Block,
}

/// `while (cond) ...`
#[derive(Debug)]
pub struct WhileStmt {
    pub twhile: TokId,
    pub tlparen: TokId,
    pub cond: Expr,
    pub trparen: TokId,
    pub body: Block,
}

/// `do ... while (cond);`
#[derive(Debug)]
pub struct DoStmt {
    pub tdo: TokId,
    pub body: Block,
    pub twhile: TokId,
    pub tlparen: TokId,
    pub cond: Expr,
    pub trparen: TokId,
    pub tscolon: TokId,
}

/// `for (init; cond; next) ...`
///
/// Each of the three clauses may be absent.
#[derive(Debug)]
pub struct ForStmt {
    pub tfor: TokId,
    pub tlparen: TokId,
    pub linit: Option<Expr>,
    pub tscolon1: TokId,
    pub lcond: Option<Expr>,
    pub tscolon2: TokId,
    pub lnext: Option<Expr>,
    pub trparen: TokId,
    pub body: Block,
}

/// `switch (cond) ...`
#[derive(Debug)]
pub struct SwitchStmt {
    pub tswitch: TokId,
    pub tlparen: TokId,
    pub cond: Expr,
    pub trparen: TokId,
    pub body: Block,
}

/// `case expr:` or `default:`
#[derive(Debug)]
pub struct CLabelStmt {
    /// The `case` or `default` keyword.
    pub tlabel: TokId,
    /// Argument expression, absent for `default`.
    pub arg: Option<Expr>,
    pub tcolon: TokId,
}

/// `label:`
#[derive(Debug)]
pub struct GLabelStmt {
    pub tlabel: TokId,
    pub tcolon: TokId,
}

/// Local declaration statement.
#[derive(Debug)]
pub struct DeclStmt {
    pub specs: DeclSpecs,
    pub decls: DeclList,
    pub tscolon: TokId,
}

/// Expression statement.
#[derive(Debug)]
pub struct ExprStmt {
    pub expr: Expr,
    pub tscolon: TokId,
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

/// Expression.
#[derive(Debug)]
pub enum Expr {
    /// Integer constant
    Int(IntExpr),
    /// Character literal
    Char(CharExpr),
    /// String literal
    Str(StrExpr),
    /// Identifier
    Ident(IdentExpr),
    /// Parenthesized expression
    Paren(ParenExpr),
    /// Binary operation, including assignments
    Binop(BinopExpr),
    /// Ternary conditional `?:`
    Tcond(TcondExpr),
    /// Comma expression
    Comma(CommaExpr),
    /// Function call
    Call(CallExpr),
    /// Array indexing
    Index(IndexExpr),
    /// Pointer dereference `*p`
    Deref(DerefExpr),
    /// Address-of `&x`
    Addr(AddrExpr),
    /// `sizeof`
    Sizeof(SizeofExpr),
    /// Member access `s.m`
    Member(MemberExpr),
    /// Indirect member access `p->m`
    IndMember(IndMemberExpr),
    /// Unary `+`/`-`
    Sign(SignExpr),
    /// Logical not `!`
    LNot(LNotExpr),
    /// Bitwise not `~`
    BNot(BNotExpr),
    /// Prefix `++`/`--`
    PreAdj(PreAdjExpr),
    /// Postfix `++`/`--`
    PostAdj(PostAdjExpr),
}

/// Integer constant.
#[derive(Debug)]
pub struct IntExpr {
    pub tlit: TokId,
}

/// Character literal.
#[derive(Debug)]
pub struct CharExpr {
    pub tlit: TokId,
}

/// String literal.
#[derive(Debug)]
pub struct StrExpr {
    pub tlit: TokId,
}

/// Identifier expression.
#[derive(Debug)]
pub struct IdentExpr {
    pub tident: TokId,
}

/// Parenthesized expression.
#[derive(Debug)]
pub struct ParenExpr {
    pub tlparen: TokId,
    pub inner: Box<Expr>,
    pub trparen: TokId,
}

/// Binary operation. The operator token distinguishes the operation;
/// assignment operators parse here too.
#[derive(Debug)]
pub struct BinopExpr {
    pub lhs: Box<Expr>,
    /// Operator token.
    pub top: TokId,
    pub rhs: Box<Expr>,
}

/// Ternary conditional.
#[derive(Debug)]
pub struct TcondExpr {
    pub cond: Box<Expr>,
    pub tqmark: TokId,
    pub targ: Box<Expr>,
    pub tcolon: TokId,
    pub farg: Box<Expr>,
}

/// Comma expression.
#[derive(Debug)]
pub struct CommaExpr {
    pub lhs: Box<Expr>,
    pub tcomma: TokId,
    pub rhs: Box<Expr>,
}

/// Function call.
#[derive(Debug)]
pub struct CallExpr {
    pub fun: Box<Expr>,
    pub tlparen: TokId,
    pub args: Vec<CallArg>,
    pub trparen: TokId,
}

/// One call argument with its optional separating comma.
#[derive(Debug)]
pub struct CallArg {
    pub expr: Expr,
    /// Separating comma, absent on the last argument.
    pub tcomma: Option<TokId>,
}

/// Array indexing.
#[derive(Debug)]
pub struct IndexExpr {
    pub base: Box<Expr>,
    pub tlbracket: TokId,
    pub arg: Box<Expr>,
    pub trbracket: TokId,
}

/// Pointer dereference.
#[derive(Debug)]
pub struct DerefExpr {
    pub tasterisk: TokId,
    pub arg: Box<Expr>,
}

/// Address-of.
#[derive(Debug)]
pub struct AddrExpr {
    pub tamper: TokId,
    pub arg: Box<Expr>,
}

/// `sizeof` over a type name or an expression.
///
/// The parenthesis slots are used only for the type-name form; in the
/// expression form the parentheses, if any, belong to the operand.
#[derive(Debug)]
pub struct SizeofExpr {
    pub tsizeof: TokId,
    pub tlparen: Option<TokId>,
    pub arg: SizeofArg,
    pub trparen: Option<TokId>,
}

/// Operand of `sizeof`.
#[derive(Debug)]
pub enum SizeofArg {
    Type(TypeName),
    Expr(Box<Expr>),
}

/// Type name: specifier-qualifier list plus abstract declarator.
#[derive(Debug)]
pub struct TypeName {
    pub sqlist: SpecQualList,
    pub decl: Box<Declarator>,
}

/// Member access through `.`.
#[derive(Debug)]
pub struct MemberExpr {
    pub base: Box<Expr>,
    pub tperiod: TokId,
    pub tmember: TokId,
}

/// Member access through `->`.
#[derive(Debug)]
pub struct IndMemberExpr {
    pub base: Box<Expr>,
    pub tarrow: TokId,
    pub tmember: TokId,
}

/// Unary sign.
#[derive(Debug)]
pub struct SignExpr {
    pub tsign: TokId,
    pub arg: Box<Expr>,
}

/// Logical not.
#[derive(Debug)]
pub struct LNotExpr {
    pub tlnot: TokId,
    pub arg: Box<Expr>,
}

/// Bitwise not.
#[derive(Debug)]
pub struct BNotExpr {
    pub tbnot: TokId,
    pub arg: Box<Expr>,
}

/// Prefix increment/decrement.
#[derive(Debug)]
pub struct PreAdjExpr {
    pub tadj: TokId,
    pub arg: Box<Expr>,
}

/// Postfix increment/decrement.
#[derive(Debug)]
pub struct PostAdjExpr {
    pub arg: Box<Expr>,
    pub tadj: TokId,
}
