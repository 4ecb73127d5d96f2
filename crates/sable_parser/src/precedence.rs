//! Binary operator precedence levels.

use sable_ast::syntax_kind::SyntaxKind;

/// Operator precedence, from loosest to tightest binding. Values
/// compare directly: a higher value binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// The comma operator. Never consumed by the binary climb; the
    /// expression grammar handles it explicitly.
    Comma = 0,
    Spread = 1,
    Yield = 2,
    Assignment = 3,
    Conditional = 4,
    NullishCoalescing = 5,
    LogicalOr = 6,
    LogicalAnd = 7,
    BitwiseOr = 8,
    BitwiseXor = 9,
    BitwiseAnd = 10,
    Equality = 11,
    Relational = 12,
    Shift = 13,
    Additive = 14,
    Multiplicative = 15,
    /// `**`, the only right-associative binary operator.
    Exponentiation = 16,
    Unary = 17,
    Update = 18,
    LeftHandSide = 19,
    Member = 20,
    Primary = 21,
    Highest = 22,
    /// Not a binary operator.
    Invalid = 255,
}

impl OperatorPrecedence {
    /// The entry precedence for a full (non-comma) expression.
    pub const LOWEST: OperatorPrecedence = OperatorPrecedence::Comma;
}

/// Precedence of a token used as a binary operator, or `Invalid` when
/// the token is not one. `as`, `satisfies`, `in`, and `instanceof` sit
/// at relational precedence.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword
        | SyntaxKind::AsKeyword
        | SyntaxKind::SatisfiesKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(OperatorPrecedence::Multiplicative > OperatorPrecedence::Additive);
        assert!(OperatorPrecedence::Additive > OperatorPrecedence::Relational);
        assert!(OperatorPrecedence::LogicalAnd > OperatorPrecedence::LogicalOr);
        assert!(OperatorPrecedence::Exponentiation > OperatorPrecedence::Multiplicative);
    }

    #[test]
    fn test_binary_operator_lookup() {
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::PlusToken),
            OperatorPrecedence::Additive
        );
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::AsKeyword),
            OperatorPrecedence::Relational
        );
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::EqualsToken),
            OperatorPrecedence::Invalid
        );
    }
}
