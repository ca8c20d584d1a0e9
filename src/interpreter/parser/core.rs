use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind, Tokenizer},
        parser::{
            binary::{parse_binary, parse_binary_from},
            statement::parse_statement,
            utils::{NestingGuard, peek_kind, peek_line, skip_semicolons, unexpected},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting the parser accepts.
///
/// Parenthesised groups, collection literals, blocks and statements each take
/// one level, and so does every link of an operator, pipe or suffix chain.
/// Input that needs more fails with `NestingTooDeep`.
pub const MAX_NESTING: usize = 200;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, the pipe operator, whose operands are binary
/// chains.
///
/// Grammar: `expression := binary ("|" binary)*`
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// `|` followed by another `|` or by the end of input is an error, and so is
/// nesting past [`MAX_NESTING`].
pub fn parse_expression<I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let _level = NestingGuard::enter(peek_line(tokens))?;
    let left = parse_binary(tokens)?;
    parse_pipe_chain(left, tokens)
}

/// Continues an expression whose first operand has already been parsed.
///
/// Statements that start with an identifier parse the operand once to see
/// whether an `=` follows; when it does not, the operand is handed here.
pub(in crate::interpreter::parser) fn parse_expression_from<I>(operand: Expr,
                                                               tokens: &mut Peekable<I>)
                                                               -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let _level = NestingGuard::enter(operand.line_number())?;
    let left = parse_binary_from(operand, tokens)?;
    parse_pipe_chain(left, tokens)
}

fn parse_pipe_chain<I>(mut left: Expr, tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = Token> + Clone
{
    let mut chain = NestingGuard::chain();

    while let Some((TokenKind::Pipe, line)) = peek_kind(tokens) {
        tokens.next();
        match tokens.peek() {
            Some(token) if token.is(TokenKind::Pipe) => {
                return Err(unexpected(token, "expected expression after pipe ('|')"));
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "expected expression after pipe ('|')",
                                                              line });
            },
            Some(_) => {},
        }
        chain.deepen(line)?;
        let right = parse_binary(tokens)?;
        left = Expr::Pipe { preferred: Box::new(left),
                            fallback: Box::new(right),
                            line };
    }

    Ok(left)
}

/// Parses statements until the input is exhausted.
///
/// Statements may be separated by `;`, which is otherwise ignored.
///
/// Grammar: `program := (statement ";"*)*`
pub fn parse_program<I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = Token> + Clone
{
    let mut statements = Vec::new();
    loop {
        skip_semicolons(tokens);
        if tokens.peek().is_none() {
            return Ok(statements);
        }
        statements.push(parse_statement(tokens)?);
    }
}

/// Tokenizes and parses a whole script.
///
/// # Example
/// ```
/// use brickengine::{ast::Statement, interpreter::parser::core::parse_script};
///
/// let program = parse_script("let a = 1; a.b = 2").unwrap();
///
/// assert_eq!(program.len(), 2);
/// assert!(matches!(program[1], Statement::Assign { .. }));
/// ```
pub fn parse_script(source: &str) -> ParseResult<Vec<Statement>> {
    parse_program(&mut Tokenizer::new(source).peekable())
}

/// Tokenizes and parses the inside of a template placeholder.
///
/// Exactly one expression is allowed; a closing `}}` after it is tolerated.
///
/// # Errors
/// `TrailingTokens` if anything else follows the expression.
pub fn parse_template_expression(source: &str) -> ParseResult<Expr> {
    let mut tokens = Tokenizer::new(source).peekable();
    let expr = parse_expression(&mut tokens)?;

    match tokens.next() {
        None => Ok(expr),
        Some(token) if token.is(TokenKind::ExprClose) => Ok(expr),
        Some(token) => Err(ParseError::TrailingTokens { token: token.literal,
                                                        line:  token.line, }),
    }
}
