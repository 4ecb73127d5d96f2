//! Syntax kinds for every token and node the parser produces.
//!
//! Kinds are grouped so classification predicates compile to range
//! checks: trivia, literals, template parts, punctuation (with the
//! assignment operators as a contiguous sub-block), identifiers,
//! keywords (reserved words first, then contextual keywords), and
//! finally the non-token node kinds.

/// The kind of a token or syntax tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken = 1,

    // Trivia
    SingleLineCommentTrivia = 2,
    MultiLineCommentTrivia = 3,
    NewLineTrivia = 4,
    WhitespaceTrivia = 5,
    ShebangTrivia = 6,
    ConflictMarkerTrivia = 7,

    // Literals
    NumericLiteral = 8,
    BigIntLiteral = 9,
    StringLiteral = 10,
    MarkupText = 11,
    RegularExpressionLiteral = 12,
    NoSubstitutionTemplateLiteral = 13,

    // Template literal parts
    TemplateHead = 14,
    TemplateMiddle = 15,
    TemplateTail = 16,

    // Punctuation
    OpenBraceToken = 17,
    CloseBraceToken = 18,
    OpenParenToken = 19,
    CloseParenToken = 20,
    OpenBracketToken = 21,
    CloseBracketToken = 22,
    DotToken = 23,
    DotDotDotToken = 24,
    SemicolonToken = 25,
    CommaToken = 26,
    QuestionDotToken = 27,
    LessThanToken = 28,
    LessThanSlashToken = 29,
    GreaterThanToken = 30,
    LessThanEqualsToken = 31,
    GreaterThanEqualsToken = 32,
    EqualsEqualsToken = 33,
    ExclamationEqualsToken = 34,
    EqualsEqualsEqualsToken = 35,
    ExclamationEqualsEqualsToken = 36,
    EqualsGreaterThanToken = 37,
    PlusToken = 38,
    MinusToken = 39,
    AsteriskToken = 40,
    AsteriskAsteriskToken = 41,
    SlashToken = 42,
    PercentToken = 43,
    PlusPlusToken = 44,
    MinusMinusToken = 45,
    LessThanLessThanToken = 46,
    GreaterThanGreaterThanToken = 47,
    GreaterThanGreaterThanGreaterThanToken = 48,
    AmpersandToken = 49,
    BarToken = 50,
    CaretToken = 51,
    ExclamationToken = 52,
    TildeToken = 53,
    AmpersandAmpersandToken = 54,
    BarBarToken = 55,
    QuestionToken = 56,
    ColonToken = 57,
    AtToken = 58,
    QuestionQuestionToken = 59,
    BacktickToken = 60,
    HashToken = 61,

    // Assignment operators (contiguous block)
    EqualsToken = 62,
    PlusEqualsToken = 63,
    MinusEqualsToken = 64,
    AsteriskEqualsToken = 65,
    AsteriskAsteriskEqualsToken = 66,
    SlashEqualsToken = 67,
    PercentEqualsToken = 68,
    LessThanLessThanEqualsToken = 69,
    GreaterThanGreaterThanEqualsToken = 70,
    GreaterThanGreaterThanGreaterThanEqualsToken = 71,
    AmpersandEqualsToken = 72,
    BarEqualsToken = 73,
    BarBarEqualsToken = 74,
    AmpersandAmpersandEqualsToken = 75,
    QuestionQuestionEqualsToken = 76,
    CaretEqualsToken = 77,

    // Identifiers
    Identifier = 78,
    PrivateIdentifier = 79,

    // Reserved words
    BreakKeyword = 80,
    CaseKeyword = 81,
    CatchKeyword = 82,
    ClassKeyword = 83,
    ConstKeyword = 84,
    ContinueKeyword = 85,
    DebuggerKeyword = 86,
    DefaultKeyword = 87,
    DeleteKeyword = 88,
    DoKeyword = 89,
    ElseKeyword = 90,
    EnumKeyword = 91,
    ExportKeyword = 92,
    ExtendsKeyword = 93,
    FalseKeyword = 94,
    FinallyKeyword = 95,
    ForKeyword = 96,
    FunctionKeyword = 97,
    IfKeyword = 98,
    ImportKeyword = 99,
    InKeyword = 100,
    InstanceOfKeyword = 101,
    NewKeyword = 102,
    NullKeyword = 103,
    ReturnKeyword = 104,
    SuperKeyword = 105,
    SwitchKeyword = 106,
    ThisKeyword = 107,
    ThrowKeyword = 108,
    TrueKeyword = 109,
    TryKeyword = 110,
    TypeOfKeyword = 111,
    VarKeyword = 112,
    VoidKeyword = 113,
    WhileKeyword = 114,
    WithKeyword = 115,

    // Contextual keywords
    AbstractKeyword = 116,
    AnyKeyword = 117,
    AsKeyword = 118,
    AsyncKeyword = 119,
    AwaitKeyword = 120,
    BooleanKeyword = 121,
    ConstructorKeyword = 122,
    DeclareKeyword = 123,
    FromKeyword = 124,
    GetKeyword = 125,
    ImplementsKeyword = 126,
    InterfaceKeyword = 127,
    KeyOfKeyword = 128,
    LetKeyword = 129,
    ModuleKeyword = 130,
    NamespaceKeyword = 131,
    NeverKeyword = 132,
    NumberKeyword = 133,
    OfKeyword = 134,
    PrivateKeyword = 135,
    ProtectedKeyword = 136,
    PublicKeyword = 137,
    ReadonlyKeyword = 138,
    SatisfiesKeyword = 139,
    SetKeyword = 140,
    StaticKeyword = 141,
    StringKeyword = 142,
    TypeKeyword = 143,
    UndefinedKeyword = 144,
    UniqueKeyword = 145,
    UnknownKeyword = 146,
    YieldKeyword = 147,

    // Names
    QualifiedName = 148,
    ComputedPropertyName = 149,

    // Signature elements
    TypeParameter = 150,
    Parameter = 151,
    Decorator = 152,

    // Type members
    PropertySignature = 153,
    PropertyDeclaration = 154,
    MethodSignature = 155,
    MethodDeclaration = 156,
    Constructor = 157,
    GetAccessor = 158,
    SetAccessor = 159,
    CallSignature = 160,
    ConstructSignature = 161,
    IndexSignature = 162,

    // Types
    TypeReference = 163,
    FunctionType = 164,
    ConstructorType = 165,
    TypeQuery = 166,
    TypeLiteral = 167,
    ArrayType = 168,
    TupleType = 169,
    OptionalType = 170,
    RestType = 171,
    UnionType = 172,
    IntersectionType = 173,
    ParenthesizedType = 174,
    TypeOperator = 175,
    IndexedAccessType = 176,
    LiteralType = 177,

    // Binding patterns
    ObjectBindingPattern = 178,
    ArrayBindingPattern = 179,
    BindingElement = 180,

    // Expressions
    ArrayLiteralExpression = 181,
    ObjectLiteralExpression = 182,
    PropertyAccessExpression = 183,
    ElementAccessExpression = 184,
    CallExpression = 185,
    NewExpression = 186,
    TaggedTemplateExpression = 187,
    TypeAssertionExpression = 188,
    ParenthesizedExpression = 189,
    FunctionExpression = 190,
    ArrowFunction = 191,
    DeleteExpression = 192,
    TypeOfExpression = 193,
    VoidExpression = 194,
    AwaitExpression = 195,
    PrefixUnaryExpression = 196,
    PostfixUnaryExpression = 197,
    BinaryExpression = 198,
    ConditionalExpression = 199,
    TemplateExpression = 200,
    YieldExpression = 201,
    SpreadElement = 202,
    ClassExpression = 203,
    OmittedExpression = 204,
    ExpressionWithTypeArguments = 205,
    AsExpression = 206,
    SatisfiesExpression = 207,
    NonNullExpression = 208,

    // Misc
    TemplateSpan = 209,
    SemicolonClassElement = 210,

    // Statements
    Block = 211,
    EmptyStatement = 212,
    VariableStatement = 213,
    ExpressionStatement = 214,
    IfStatement = 215,
    DoStatement = 216,
    WhileStatement = 217,
    ForStatement = 218,
    ForInStatement = 219,
    ForOfStatement = 220,
    ContinueStatement = 221,
    BreakStatement = 222,
    ReturnStatement = 223,
    WithStatement = 224,
    SwitchStatement = 225,
    LabeledStatement = 226,
    ThrowStatement = 227,
    TryStatement = 228,
    DebuggerStatement = 229,

    // Declarations
    VariableDeclaration = 230,
    VariableDeclarationList = 231,
    FunctionDeclaration = 232,
    ClassDeclaration = 233,
    InterfaceDeclaration = 234,
    TypeAliasDeclaration = 235,
    EnumDeclaration = 236,
    ModuleDeclaration = 237,
    ModuleBlock = 238,
    CaseBlock = 239,
    ImportEqualsDeclaration = 240,
    ImportDeclaration = 241,
    ImportClause = 242,
    NamespaceImport = 243,
    NamedImports = 244,
    ImportSpecifier = 245,
    ExportAssignment = 246,
    ExportDeclaration = 247,
    NamedExports = 248,
    NamespaceExport = 249,
    ExportSpecifier = 250,
    ExternalModuleReference = 251,

    // Clauses
    CaseClause = 252,
    DefaultClause = 253,
    HeritageClause = 254,
    CatchClause = 255,
    EnumMember = 256,

    // Markup
    MarkupElement = 257,
    MarkupSelfClosingElement = 258,
    MarkupOpeningElement = 259,
    MarkupClosingElement = 260,
    MarkupFragment = 261,
    MarkupOpeningFragment = 262,
    MarkupClosingFragment = 263,
    MarkupAttributes = 264,
    MarkupAttribute = 265,
    MarkupSpreadAttribute = 266,
    MarkupExpression = 267,

    // Structured comments
    DocComment = 268,
    DocTag = 269,
    DocParameterTag = 270,
    DocReturnTag = 271,

    // Object literal members
    PropertyAssignment = 272,
    ShorthandPropertyAssignment = 273,
    SpreadAssignment = 274,

    // Top level
    SourceFile = 275,
}

impl SyntaxKind {
    pub const FIRST_TRIVIA: SyntaxKind = SyntaxKind::SingleLineCommentTrivia;
    pub const LAST_TRIVIA: SyntaxKind = SyntaxKind::ConflictMarkerTrivia;
    pub const FIRST_LITERAL: SyntaxKind = SyntaxKind::NumericLiteral;
    pub const LAST_LITERAL: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
    pub const FIRST_TEMPLATE: SyntaxKind = SyntaxKind::TemplateHead;
    pub const LAST_TEMPLATE: SyntaxKind = SyntaxKind::TemplateTail;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::CaretEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::CaretEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AbstractKeyword;
    pub const LAST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::QualifiedName;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::YieldKeyword;

    /// Whether this kind is produced only inside trivia scanning.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self >= Self::FIRST_TRIVIA && self <= Self::LAST_TRIVIA
    }

    /// Whether this kind is a token (as opposed to a tree node).
    #[inline]
    pub fn is_token(self) -> bool {
        self <= Self::LAST_TOKEN
    }

    /// Whether this kind is a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        self >= Self::FIRST_LITERAL && self <= Self::LAST_LITERAL
    }

    /// Whether this kind is part of a template literal.
    #[inline]
    pub fn is_template_literal_kind(self) -> bool {
        self >= Self::FIRST_TEMPLATE && self <= Self::LAST_TEMPLATE
            || self == SyntaxKind::NoSubstitutionTemplateLiteral
    }

    /// Whether this kind is a keyword (reserved or contextual).
    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    /// Whether this kind is a reserved word that can never be an identifier.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        self >= Self::FIRST_RESERVED_WORD && self <= Self::LAST_RESERVED_WORD
    }

    /// Whether this kind is a contextual keyword (valid as an identifier).
    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self >= Self::FIRST_CONTEXTUAL_KEYWORD && self <= Self::LAST_CONTEXTUAL_KEYWORD
    }

    /// Whether this kind is an assignment operator token.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self >= Self::FIRST_ASSIGNMENT && self <= Self::LAST_ASSIGNMENT
    }

    /// Whether this kind can appear as a declaration modifier.
    pub fn is_modifier_kind(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
        )
    }

    /// Whether this kind is a keyword naming a built-in type.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::NeverKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    /// Map identifier text to a keyword kind, if it is one.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "abstract" => SyntaxKind::AbstractKeyword,
            "any" => SyntaxKind::AnyKeyword,
            "as" => SyntaxKind::AsKeyword,
            "async" => SyntaxKind::AsyncKeyword,
            "await" => SyntaxKind::AwaitKeyword,
            "boolean" => SyntaxKind::BooleanKeyword,
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "catch" => SyntaxKind::CatchKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "constructor" => SyntaxKind::ConstructorKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "debugger" => SyntaxKind::DebuggerKeyword,
            "declare" => SyntaxKind::DeclareKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "delete" => SyntaxKind::DeleteKeyword,
            "do" => SyntaxKind::DoKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "enum" => SyntaxKind::EnumKeyword,
            "export" => SyntaxKind::ExportKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "finally" => SyntaxKind::FinallyKeyword,
            "for" => SyntaxKind::ForKeyword,
            "from" => SyntaxKind::FromKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "get" => SyntaxKind::GetKeyword,
            "if" => SyntaxKind::IfKeyword,
            "implements" => SyntaxKind::ImplementsKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "in" => SyntaxKind::InKeyword,
            "instanceof" => SyntaxKind::InstanceOfKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "keyof" => SyntaxKind::KeyOfKeyword,
            "let" => SyntaxKind::LetKeyword,
            "module" => SyntaxKind::ModuleKeyword,
            "namespace" => SyntaxKind::NamespaceKeyword,
            "never" => SyntaxKind::NeverKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "number" => SyntaxKind::NumberKeyword,
            "of" => SyntaxKind::OfKeyword,
            "private" => SyntaxKind::PrivateKeyword,
            "protected" => SyntaxKind::ProtectedKeyword,
            "public" => SyntaxKind::PublicKeyword,
            "readonly" => SyntaxKind::ReadonlyKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "satisfies" => SyntaxKind::SatisfiesKeyword,
            "set" => SyntaxKind::SetKeyword,
            "static" => SyntaxKind::StaticKeyword,
            "string" => SyntaxKind::StringKeyword,
            "super" => SyntaxKind::SuperKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "try" => SyntaxKind::TryKeyword,
            "type" => SyntaxKind::TypeKeyword,
            "typeof" => SyntaxKind::TypeOfKeyword,
            "undefined" => SyntaxKind::UndefinedKeyword,
            "unique" => SyntaxKind::UniqueKeyword,
            "unknown" => SyntaxKind::UnknownKeyword,
            "var" => SyntaxKind::VarKeyword,
            "void" => SyntaxKind::VoidKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "with" => SyntaxKind::WithKeyword,
            "yield" => SyntaxKind::YieldKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// The source text of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::AbstractKeyword => "abstract",
            SyntaxKind::AnyKeyword => "any",
            SyntaxKind::AsKeyword => "as",
            SyntaxKind::AsyncKeyword => "async",
            SyntaxKind::AwaitKeyword => "await",
            SyntaxKind::BooleanKeyword => "boolean",
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::CaseKeyword => "case",
            SyntaxKind::CatchKeyword => "catch",
            SyntaxKind::ClassKeyword => "class",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::ConstructorKeyword => "constructor",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::DebuggerKeyword => "debugger",
            SyntaxKind::DeclareKeyword => "declare",
            SyntaxKind::DefaultKeyword => "default",
            SyntaxKind::DeleteKeyword => "delete",
            SyntaxKind::DoKeyword => "do",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::EnumKeyword => "enum",
            SyntaxKind::ExportKeyword => "export",
            SyntaxKind::ExtendsKeyword => "extends",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::FinallyKeyword => "finally",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::FromKeyword => "from",
            SyntaxKind::FunctionKeyword => "function",
            SyntaxKind::GetKeyword => "get",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ImplementsKeyword => "implements",
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::InKeyword => "in",
            SyntaxKind::InstanceOfKeyword => "instanceof",
            SyntaxKind::InterfaceKeyword => "interface",
            SyntaxKind::KeyOfKeyword => "keyof",
            SyntaxKind::LetKeyword => "let",
            SyntaxKind::ModuleKeyword => "module",
            SyntaxKind::NamespaceKeyword => "namespace",
            SyntaxKind::NeverKeyword => "never",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::NumberKeyword => "number",
            SyntaxKind::OfKeyword => "of",
            SyntaxKind::PrivateKeyword => "private",
            SyntaxKind::ProtectedKeyword => "protected",
            SyntaxKind::PublicKeyword => "public",
            SyntaxKind::ReadonlyKeyword => "readonly",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::SatisfiesKeyword => "satisfies",
            SyntaxKind::SetKeyword => "set",
            SyntaxKind::StaticKeyword => "static",
            SyntaxKind::StringKeyword => "string",
            SyntaxKind::SuperKeyword => "super",
            SyntaxKind::SwitchKeyword => "switch",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::ThrowKeyword => "throw",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::TryKeyword => "try",
            SyntaxKind::TypeKeyword => "type",
            SyntaxKind::TypeOfKeyword => "typeof",
            SyntaxKind::UndefinedKeyword => "undefined",
            SyntaxKind::UniqueKeyword => "unique",
            SyntaxKind::UnknownKeyword => "unknown",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::VoidKeyword => "void",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::WithKeyword => "with",
            SyntaxKind::YieldKeyword => "yield",
            _ => return None,
        };
        Some(text)
    }

    /// The source text of a punctuation kind.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::LessThanSlashToken => "</",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::AtToken => "@",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::BacktickToken => "`",
            SyntaxKind::HashToken => "#",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            SyntaxKind::CaretEqualsToken => "^=",
            _ => return None,
        };
        Some(text)
    }

    /// The source text of any fixed-text token kind.
    pub fn token_text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for text in ["class", "yield", "keyof", "instanceof", "satisfies"] {
            let kind = SyntaxKind::from_keyword(text).unwrap();
            assert!(kind.is_keyword());
            assert_eq!(kind.keyword_text(), Some(text));
        }
        assert_eq!(SyntaxKind::from_keyword("classy"), None);
    }

    #[test]
    fn test_reserved_vs_contextual() {
        assert!(SyntaxKind::ClassKeyword.is_reserved_word());
        assert!(!SyntaxKind::TypeKeyword.is_reserved_word());
        assert!(SyntaxKind::TypeKeyword.is_contextual_keyword());
        assert!(SyntaxKind::YieldKeyword.is_contextual_keyword());
    }

    #[test]
    fn test_assignment_operator_range() {
        assert!(SyntaxKind::EqualsToken.is_assignment_operator());
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsGreaterThanToken.is_assignment_operator());
    }

    #[test]
    fn test_token_vs_node() {
        assert!(SyntaxKind::CommaToken.is_token());
        assert!(SyntaxKind::YieldKeyword.is_token());
        assert!(!SyntaxKind::BinaryExpression.is_token());
        assert!(!SyntaxKind::SourceFile.is_token());
    }
}
