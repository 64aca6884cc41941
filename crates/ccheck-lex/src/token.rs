//! Token definitions.
//!
//! Every byte of a translation unit belongs to exactly one token, including
//! whitespace, comments, and preprocessor lines. A token records its kind,
//! the exact source bytes that produced it, and the positions of its first
//! and last byte.

use std::fmt;

use ccheck_util::{Pos, SrcRange};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Kind of a lexical token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // WHITESPACE AND OTHER NON-GRAMMAR TOKENS
    // =========================================================================
    /// A run of space characters.
    Space,

    /// A run of tab characters.
    Tab,

    /// A single line break, either `\n` or `\r\n`.
    Newline,

    /// A `/* ... */` or `// ...` comment.
    Comment,

    /// A `/** ... */` documentation comment.
    DsComment,

    /// A preprocessor line: `#` first on a physical line through the end of
    /// the line, honoring backslash-newline continuations.
    Preproc,

    /// Bytes the lexer could not form a valid token from.
    Invalid,

    /// End of input. Exactly one per translation unit, with empty text.
    Eof,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    Auto,
    Break,
    Case,
    Char,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extern,
    Float,
    For,
    Goto,
    If,
    Inline,
    Int,
    Long,
    Register,
    Restrict,
    Return,
    Short,
    Signed,
    Sizeof,
    Static,
    Struct,
    Switch,
    Typedef,
    Union,
    Unsigned,
    Void,
    Volatile,
    While,

    // =========================================================================
    // IDENTIFIERS AND CONSTANTS
    // =========================================================================
    /// Identifier: `[_A-Za-z][_A-Za-z0-9]*`, not a keyword.
    Ident,

    /// Integer constant: decimal, octal, or hex, with optional suffixes.
    Number,

    /// Character literal, e.g. `'a'` or `'\n'`.
    CharLit,

    /// String literal, e.g. `"hello\n"`.
    StrLit,

    // =========================================================================
    // PUNCTUATORS
    // =========================================================================
    /// "["
    LBracket,
    /// "]"
    RBracket,
    /// "("
    LParen,
    /// ")"
    RParen,
    /// "{"
    LBrace,
    /// "}"
    RBrace,
    /// "."
    Period,
    /// "->"
    Arrow,
    /// "++"
    PlusPlus,
    /// "--"
    MinusMinus,
    /// "&"
    Ampersand,
    /// "*"
    Star,
    /// "+"
    Plus,
    /// "-"
    Minus,
    /// "~"
    Tilde,
    /// "!"
    Bang,
    /// "/"
    Slash,
    /// "%"
    Percent,
    /// "<<"
    Shl,
    /// ">>"
    Shr,
    /// "<"
    Lt,
    /// ">"
    Gt,
    /// "<="
    LtEq,
    /// ">="
    GtEq,
    /// "=="
    EqEq,
    /// "!="
    NotEq,
    /// "^"
    Caret,
    /// "|"
    Pipe,
    /// "&&"
    AndAnd,
    /// "||"
    OrOr,
    /// "?"
    Question,
    /// ":"
    Colon,
    /// ";"
    Semicolon,
    /// "..."
    Ellipsis,
    /// "="
    Eq,
    /// "*="
    StarEq,
    /// "/="
    SlashEq,
    /// "%="
    PercentEq,
    /// "+="
    PlusEq,
    /// "-="
    MinusEq,
    /// "<<="
    ShlEq,
    /// ">>="
    ShrEq,
    /// "&="
    AmpersandEq,
    /// "^="
    CaretEq,
    /// "|="
    PipeEq,
    /// ","
    Comma,
    /// "#" (outside a preprocessor line)
    Hash,
    /// "##"
    HashHash,
}

impl TokenKind {
    /// Returns true for the whitespace kinds (space, tab, newline).
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Tab | TokenKind::Newline)
    }

    /// Returns true for comments of either flavor.
    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::DsComment)
    }

    /// Returns true for tokens the parser never sees: whitespace, comments,
    /// and preprocessor lines.
    #[inline]
    pub fn is_nongrammar(&self) -> bool {
        self.is_whitespace() || self.is_comment() || *self == TokenKind::Preproc
    }

    /// Returns true for keyword kinds.
    pub fn is_keyword(&self) -> bool {
        KEYWORDS.values().any(|k| k == self)
    }

    /// Returns true for keywords that can begin a type name: basic type
    /// specifiers, `struct`/`union`/`enum`, and type qualifiers.
    pub fn starts_type_name(&self) -> bool {
        self.is_basic_type_specifier()
            || self.is_type_qualifier()
            || matches!(self, TokenKind::Struct | TokenKind::Union | TokenKind::Enum)
    }

    /// Returns true for the basic type specifier keywords.
    pub fn is_basic_type_specifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Void
                | TokenKind::Char
                | TokenKind::Short
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Signed
                | TokenKind::Unsigned
                | TokenKind::Float
                | TokenKind::Double
        )
    }

    /// Returns true for the type qualifier keywords.
    pub fn is_type_qualifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Const | TokenKind::Restrict | TokenKind::Volatile
        )
    }

    /// Returns true for the storage class specifier keywords.
    pub fn is_storage_class(&self) -> bool {
        matches!(
            self,
            TokenKind::Typedef
                | TokenKind::Extern
                | TokenKind::Static
                | TokenKind::Auto
                | TokenKind::Register
        )
    }

    /// Returns the fixed spelling of a keyword or punctuator, or `None` for
    /// kinds whose text varies.
    pub fn spelling(&self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            Auto => "auto",
            Break => "break",
            Case => "case",
            Char => "char",
            Const => "const",
            Continue => "continue",
            Default => "default",
            Do => "do",
            Double => "double",
            Else => "else",
            Enum => "enum",
            Extern => "extern",
            Float => "float",
            For => "for",
            Goto => "goto",
            If => "if",
            Inline => "inline",
            Int => "int",
            Long => "long",
            Register => "register",
            Restrict => "restrict",
            Return => "return",
            Short => "short",
            Signed => "signed",
            Sizeof => "sizeof",
            Static => "static",
            Struct => "struct",
            Switch => "switch",
            Typedef => "typedef",
            Union => "union",
            Unsigned => "unsigned",
            Void => "void",
            Volatile => "volatile",
            While => "while",
            LBracket => "[",
            RBracket => "]",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            Period => ".",
            Arrow => "->",
            PlusPlus => "++",
            MinusMinus => "--",
            Ampersand => "&",
            Star => "*",
            Plus => "+",
            Minus => "-",
            Tilde => "~",
            Bang => "!",
            Slash => "/",
            Percent => "%",
            Shl => "<<",
            Shr => ">>",
            Lt => "<",
            Gt => ">",
            LtEq => "<=",
            GtEq => ">=",
            EqEq => "==",
            NotEq => "!=",
            Caret => "^",
            Pipe => "|",
            AndAnd => "&&",
            OrOr => "||",
            Question => "?",
            Colon => ":",
            Semicolon => ";",
            Ellipsis => "...",
            Eq => "=",
            StarEq => "*=",
            SlashEq => "/=",
            PercentEq => "%=",
            PlusEq => "+=",
            MinusEq => "-=",
            ShlEq => "<<=",
            ShrEq => ">>=",
            AmpersandEq => "&=",
            CaretEq => "^=",
            PipeEq => "|=",
            Comma => ",",
            Hash => "#",
            HashHash => "##",
            _ => return None,
        })
    }
}

/// Keyword lookup table.
static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    let mut map = FxHashMap::default();
    for kind in [
        Auto, Break, Case, Char, Const, Continue, Default, Do, Double, Else, Enum, Extern, Float,
        For, Goto, If, Inline, Int, Long, Register, Restrict, Return, Short, Signed, Sizeof,
        Static, Struct, Switch, Typedef, Union, Unsigned, Void, Volatile, While,
    ] {
        map.insert(kind.spelling().unwrap(), kind);
    }
    map
});

/// Maps an identifier spelling to its keyword kind, if it is a keyword.
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

/// A lexical token: kind, exact source text, and source range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,

    /// The exact source bytes that produced this token.
    pub text: String,

    /// Position of the first byte.
    pub bpos: Pos,

    /// Position of the last byte (inclusive).
    pub epos: Pos,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, bpos: Pos, epos: Pos) -> Self {
        Self {
            kind,
            text: text.into(),
            bpos,
            epos,
        }
    }

    /// Creates a whitespace token with no source counterpart, as inserted by
    /// the fixer.
    pub fn synthetic(kind: TokenKind, text: impl Into<String>) -> Self {
        Self::new(kind, text, Pos::DUMMY, Pos::DUMMY)
    }

    /// Returns the source range this token covers.
    #[inline]
    pub fn range(&self) -> SrcRange {
        SrcRange::new(self.bpos, self.epos)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
