use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            primary::{parse_number, parse_operand},
            utils::{NestingGuard, peek_kind},
        },
    },
};

/// Maps a token kind to the binary operator it spells, if any.
const fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

/// Parses a chain of binary operations.
///
/// All binary operators share one precedence tier and associate to the left,
/// so `1 + 2 * 3` is `(1 + 2) * 3`. Parentheses group explicitly.
///
/// The tokenizer glues a `-` to a following digit, so `x -1` arrives as the
/// operand `x` followed by the number `-1`. A negative number in operator
/// position is therefore read as a subtraction of its magnitude.
///
/// Grammar: `binary := operand (operator operand)*`
///
/// # Errors
/// `UnexpectedEndOfInput` if an operator is not followed by an operand.
/// `NestingTooDeep` if the chain, together with whatever encloses it, is
/// longer than [`MAX_NESTING`](super::core::MAX_NESTING).
pub fn parse_binary<I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let left = parse_operand(tokens)?;
    parse_binary_from(left, tokens)
}

/// Parses the rest of a binary chain whose first operand is `left`.
pub(in crate::interpreter::parser) fn parse_binary_from<I>(mut left: Expr,
                                                           tokens: &mut Peekable<I>)
                                                           -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let mut chain = NestingGuard::chain();

    while let Some((kind, line)) = peek_kind(tokens) {
        if let Some(op) = binary_operator(kind) {
            tokens.next();
            chain.deepen(line)?;
            if tokens.peek().is_none() {
                return Err(ParseError::UnexpectedEndOfInput { expected: "expected an operand after operator",
                                                              line });
            }
            let right = parse_operand(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
        } else if kind == TokenKind::Number
                  && let Some(token) = tokens.next_if(|token| token.literal.starts_with('-'))
        {
            chain.deepen(line)?;
            let magnitude = parse_number(&token.literal[1..], line)?;
            let right = Expr::Literal { value: LiteralValue::Number(magnitude),
                                        line };
            left = Expr::Binary { left: Box::new(left),
                                  op: BinaryOperator::Sub,
                                  right: Box::new(right),
                                  line };
        } else {
            break;
        }
    }

    Ok(left)
}
