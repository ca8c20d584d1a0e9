use std::iter::Peekable;

use crate::{
    ast::{ElseIf, Expr, ForKind, FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression, parse_expression_from},
            primary::parse_operand,
            utils::{
                NestingGuard, expect, parse_comma_separated, parse_identifier, peek_kind,
                peek_word,
            },
        },
    },
};

/// Parses a single statement.
///
/// Dispatches on the first token: `let`, `fn`, `return`, `for`, `while`,
/// `try` and the contextual word `if` start their statements. Any other
/// identifier starts an assignment or an expression statement, and anything
/// else an expression statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a statement.
///
/// # Returns
/// The parsed statement.
pub fn parse_statement<I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = Token> + Clone
{
    let Some((kind, line)) = peek_kind(tokens) else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "expected a statement",
                                                      line:     0, });
    };
    let _level = NestingGuard::enter(line)?;

    match kind {
        TokenKind::Let => parse_let(tokens, line),
        TokenKind::Fn => {
            tokens.next();
            let name = parse_identifier(tokens, "expected function name after 'fn'", line)?;
            Ok(Statement::Function(parse_function_tail(tokens, Some(name), line)?))
        },
        TokenKind::Return => parse_return(tokens, line),
        TokenKind::For => parse_for(tokens, line),
        TokenKind::While => {
            tokens.next();
            let condition = parse_expression(tokens)?;
            let body = parse_block(tokens)?;
            Ok(Statement::While { condition,
                                  body,
                                  line })
        },
        TokenKind::Try => {
            tokens.next();
            let try_block = parse_block(tokens)?;
            expect(tokens, TokenKind::Catch, "expected 'catch' after try block", line)?;
            let catch_block = parse_block(tokens)?;
            Ok(Statement::TryCatch { try_block,
                                     catch_block,
                                     line })
        },
        TokenKind::Identifier if peek_word(tokens, "if") => parse_if(tokens, line),
        TokenKind::Identifier => parse_assignment_or_expression(tokens, line),
        _ => {
            let expr = parse_expression(tokens)?;
            Ok(Statement::Expression { expr, line })
        },
    }
}

/// Parses `let name = expression`.
fn parse_let<I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = Token> + Clone
{
    tokens.next();
    let name = parse_identifier(tokens, "expected identifier after 'let'", line)?;
    expect(tokens, TokenKind::Assign, "expected '=' after variable name", line)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Let { name, value, line })
}

/// Parses `return` with an optional value.
///
/// The value is omitted when `return` is followed by `;`, `}` or the end of
/// input.
fn parse_return<I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = Token> + Clone
{
    tokens.next();
    let value = match peek_kind(tokens) {
        None
        | Some((TokenKind::Semicolon | TokenKind::RBrace | TokenKind::ExprClose, _)) => None,
        Some(_) => Some(parse_expression(tokens)?),
    };

    Ok(Statement::Return { value, line })
}

/// Parses the parameter list and body of a function, after `fn` and the
/// optional name.
///
/// Grammar: `function_tail := "(" (identifier ("," identifier)*)? ")" block`
pub(in crate::interpreter::parser) fn parse_function_tail<I>(tokens: &mut Peekable<I>,
                                                             name: Option<String>,
                                                             line: usize)
                                                             -> ParseResult<FunctionDef>
    where I: Iterator<Item = Token> + Clone
{
    expect(tokens, TokenKind::LParen, "expected '(' after function name", line)?;
    let params = parse_comma_separated(tokens,
                                       |tokens| parse_identifier(tokens, "expected parameter name", line),
                                       TokenKind::RParen,
                                       "expected ',' or ')' in parameter list",
                                       line)?;
    let body = parse_block(tokens)?;

    Ok(FunctionDef { name,
                     params,
                     body: body.into(),
                     line })
}

/// Parses `if cond { } else if cond { } else { }`.
///
/// `if` and `else` are matched by text, case-insensitively.
fn parse_if<I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = Token> + Clone
{
    tokens.next();
    let condition = parse_expression(tokens)?;
    let then_block = parse_block(tokens)?;

    let mut else_ifs = Vec::new();
    let mut else_block = None;

    while peek_word(tokens, "else") {
        tokens.next();
        if peek_word(tokens, "if") {
            tokens.next();
            let condition = parse_expression(tokens)?;
            let block = parse_block(tokens)?;
            else_ifs.push(ElseIf { condition, block });
        } else {
            else_block = Some(parse_block(tokens)?);
            break;
        }
    }

    Ok(Statement::If { condition,
                       then_block,
                       else_ifs,
                       else_block,
                       line })
}

/// Parses both `for` forms; the header may be wrapped in parentheses.
///
/// ```text
/// for let i = 0; i < 10; i = i + 1 { ... }
/// for (item in items) { ... }
/// ```
fn parse_for<I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = Token> + Clone
{
    tokens.next();

    let parenthesized = matches!(peek_kind(tokens), Some((TokenKind::LParen, _))) && {
        let mut lookahead = tokens.clone();
        lookahead.next();
        matches!(peek_kind(&mut lookahead), Some((TokenKind::Let, _))) || is_for_each(lookahead)
    };
    if parenthesized {
        tokens.next();
    }

    let kind = if is_for_each(tokens.clone()) {
        let var = parse_identifier(tokens, "expected loop variable", line)?;
        expect(tokens, TokenKind::In, "expected 'in' after loop variable", line)?;
        let iterable = parse_expression(tokens)?;
        ForKind::Each { var, iterable }
    } else {
        let init = parse_statement(tokens)?;
        expect(tokens, TokenKind::Semicolon, "expected ';' after for-loop initializer", line)?;
        let condition = parse_expression(tokens)?;
        expect(tokens, TokenKind::Semicolon, "expected ';' after for-loop condition", line)?;
        let update = parse_statement(tokens)?;
        ForKind::Classic { init: Box::new(init),
                           condition,
                           update: Box::new(update) }
    };

    if parenthesized {
        expect(tokens, TokenKind::RParen, "expected ')' after for-loop header", line)?;
    }
    let body = parse_block(tokens)?;

    Ok(Statement::For { kind, body, line })
}

/// Returns `true` if the stream starts with `identifier in`.
fn is_for_each<I>(mut lookahead: Peekable<I>) -> bool
    where I: Iterator<Item = Token>
{
    lookahead.next_if(|token| token.is(TokenKind::Identifier)).is_some()
    && matches!(peek_kind(&mut lookahead), Some((TokenKind::In, _)))
}

/// Parses `path = value`, `path[index] = value`, or an expression statement
/// that starts with an identifier.
///
/// The leading operand is parsed once. If `=` follows, it is the assignment
/// target; otherwise it becomes the first operand of the expression.
///
/// # Errors
/// `InvalidAssignmentTarget` if `=` follows something that is neither a
/// variable path nor an element of one.
fn parse_assignment_or_expression<I>(tokens: &mut Peekable<I>,
                                      line: usize)
                                      -> ParseResult<Statement>
    where I: Iterator<Item = Token> + Clone
{
    let operand = parse_operand(tokens)?;
    if tokens.next_if(|token| token.is(TokenKind::Assign)).is_none() {
        let expr = parse_expression_from(operand, tokens)?;
        return Ok(Statement::Expression { expr, line });
    }

    match operand {
        Expr::Variable { path, .. } => Ok(Statement::Assign { path,
                                                              value: parse_expression(tokens)?,
                                                              line }),
        Expr::Index { target, index, .. } => match *target {
            Expr::Variable { path, .. } => Ok(Statement::IndexAssign { path,
                                                                       index: *index,
                                                                       value: parse_expression(tokens)?,
                                                                       line }),
            _ => Err(ParseError::InvalidAssignmentTarget { line }),
        },
        _ => Err(ParseError::InvalidAssignmentTarget { line }),
    }
}
