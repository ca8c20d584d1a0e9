use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, ObjectEntry},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            statement::parse_function_tail,
            utils::{
                NestingGuard, expect, expect_close_brace, expect_open_brace,
                parse_comma_separated, parse_identifier, peek_kind, unexpected,
            },
        },
    },
};

/// Parses an operand: a primary expression followed by any number of
/// `[index]` and `(arguments)` suffixes.
///
/// Grammar: `operand := primary ( "[" expression "]" | "(" arguments ")" )*`
///
/// # Errors
/// `EmptyIndex` for `target[]`, `NestingTooDeep` for an overly long suffix
/// chain, plus anything the primary or the suffixes report.
pub fn parse_operand<I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let mut expr = parse_primary(tokens)?;
    let mut chain = NestingGuard::chain();

    loop {
        match peek_kind(tokens) {
            Some((TokenKind::LBracket, line)) => {
                tokens.next();
                chain.deepen(line)?;
                if tokens.next_if(|token| token.is(TokenKind::RBracket)).is_some() {
                    return Err(ParseError::EmptyIndex { line });
                }
                let index = parse_expression(tokens)?;
                expect(tokens, TokenKind::RBracket, "expected ']' after index", line)?;
                expr = Expr::Index { target: Box::new(expr),
                                     index: Box::new(index),
                                     line };
            },
            Some((TokenKind::LParen, line)) => {
                tokens.next();
                chain.deepen(line)?;
                let arguments = parse_comma_separated(tokens,
                                                      parse_expression,
                                                      TokenKind::RParen,
                                                      "expected ',' or ')' in argument list",
                                                      line)?;
                expr = Expr::Call { target: Box::new(expr),
                                    arguments,
                                    line };
            },
            _ => return Ok(expr),
        }
    }
}

/// Parses a primary expression.
///
/// Grammar:
/// ```text
/// primary := number | string | "true" | "false" | "null"
///          | "(" expression ")"
///          | "[" (expression ("," expression)*)? "]"
///          | "{" (key ":" (expression | function) ","?)* "}"
///          | identifier ("." identifier)*
/// ```
pub fn parse_primary<I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let Some((kind, line)) = peek_kind(tokens) else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "expected an expression",
                                                      line:     0, });
    };

    match kind {
        TokenKind::Number => {
            let token = expect(tokens, TokenKind::Number, "expected a number", line)?;
            Ok(Expr::Literal { value: LiteralValue::Number(parse_number(&token.literal, line)?),
                               line })
        },
        TokenKind::String => {
            let token = expect(tokens, TokenKind::String, "expected a string", line)?;
            Ok(Expr::Literal { value: LiteralValue::Str(token.literal),
                               line })
        },
        TokenKind::True | TokenKind::False => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Bool(kind == TokenKind::True),
                               line })
        },
        TokenKind::Null => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Null,
                               line })
        },
        TokenKind::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect(tokens, TokenKind::RParen, "expected ')' after expression", line)?;
            Ok(expr)
        },
        TokenKind::LBracket => {
            tokens.next();
            let elements = parse_comma_separated(tokens,
                                                 parse_expression,
                                                 TokenKind::RBracket,
                                                 "expected ',' or ']' in array literal",
                                                 line)?;
            Ok(Expr::Array { elements, line })
        },
        TokenKind::LBrace | TokenKind::ExprOpen => parse_object_literal(tokens),
        TokenKind::Identifier => parse_variable_path(tokens),
        _ => match tokens.next() {
            Some(token) => Err(unexpected(&token, "expected an expression")),
            None => Err(ParseError::UnexpectedEndOfInput { expected: "expected an expression",
                                                           line }),
        },
    }
}

/// Converts a number literal to its value.
///
/// # Errors
/// `InvalidNumber` if the text does not parse.
pub(in crate::interpreter::parser) fn parse_number(literal: &str, line: usize) -> ParseResult<f64> {
    literal.parse()
           .map_err(|_| ParseError::InvalidNumber { literal: literal.to_owned(),
                                                    line })
}

/// Parses a dotted variable path such as `user.address.city`.
fn parse_variable_path<I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let Some((_, line)) = peek_kind(tokens) else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "expected identifier",
                                                      line:     0, });
    };
    let mut path = vec![parse_identifier(tokens, "expected identifier", line)?];

    while tokens.next_if(|token| token.is(TokenKind::Dot)).is_some() {
        path.push(parse_identifier(tokens, "expected identifier after '.'", line)?);
    }

    Ok(Expr::Variable { path, line })
}

/// Parses an object literal.
///
/// Keys are identifiers or strings. A value written as `fn(params) { body }`
/// becomes a method: a closure created when the literal is evaluated. A
/// trailing comma before `}` is accepted.
fn parse_object_literal<I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let line = expect_open_brace(tokens, "expected '{' to start object", 0)?;
    let mut entries = Vec::new();

    loop {
        let key = match peek_kind(tokens) {
            Some((TokenKind::RBrace | TokenKind::ExprClose, _)) => {
                expect_close_brace(tokens, line)?;
                break;
            },
            Some((TokenKind::Identifier | TokenKind::String, _)) => match tokens.next() {
                Some(token) => token.literal,
                None => break,
            },
            Some(_) => match tokens.next() {
                Some(token) => {
                    return Err(unexpected(&token, "expected identifier or string as object key"));
                },
                None => break,
            },
            None => {
                return Err(ParseError::UnterminatedBlock { found: "end of input".to_owned(),
                                                           line });
            },
        };

        expect(tokens, TokenKind::Colon, "expected ':' after object key", line)?;

        let entry = match peek_kind(tokens) {
            Some((TokenKind::Fn, fn_line)) => {
                tokens.next();
                ObjectEntry::Function(parse_function_tail(tokens, None, fn_line)?)
            },
            _ => ObjectEntry::Value(parse_expression(tokens)?),
        };
        entries.push((key, entry));

        match peek_kind(tokens) {
            Some((TokenKind::Comma, _)) => {
                tokens.next();
            },
            Some((TokenKind::RBrace | TokenKind::ExprClose, _)) => {},
            Some(_) => match tokens.next() {
                Some(token) => return Err(unexpected(&token, "expected ',' or '}' in object")),
                None => break,
            },
            None => {
                return Err(ParseError::UnterminatedBlock { found: "end of input".to_owned(),
                                                           line });
            },
        }
    }

    Ok(Expr::Object { entries, line })
}
