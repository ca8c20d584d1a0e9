use std::{cell::Cell, iter::Peekable};

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{MAX_NESTING, ParseResult},
    },
};

thread_local! {
    /// Nesting levels held by the parse running on this thread.
    static NESTING: Cell<usize> = const { Cell::new(0) };
}

/// Levels of parser nesting, released when dropped.
///
/// Every expression and statement holds a level while it is parsed, and every
/// link of an operator, pipe or suffix chain adds one more. The number of
/// levels held bounds the depth of the resulting tree, and with it the
/// recursion of the parser, the evaluator and the tree's destructor.
pub(in crate::interpreter::parser) struct NestingGuard {
    levels: usize,
}

impl NestingGuard {
    /// Takes one level.
    ///
    /// # Errors
    /// `NestingTooDeep` if [`MAX_NESTING`] levels are already held.
    pub(in crate::interpreter::parser) fn enter(line: usize) -> ParseResult<Self> {
        let mut guard = Self::chain();
        guard.deepen(line)?;
        Ok(guard)
    }

    /// A guard holding no levels yet, for a chain that grows link by link.
    pub(in crate::interpreter::parser) const fn chain() -> Self {
        Self { levels: 0 }
    }

    /// Takes one more level.
    ///
    /// # Errors
    /// `NestingTooDeep` if [`MAX_NESTING`] levels are already held.
    pub(in crate::interpreter::parser) fn deepen(&mut self, line: usize) -> ParseResult<()> {
        NESTING.with(|depth| {
                   if depth.get() >= MAX_NESTING {
                       return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                               line });
                   }
                   depth.set(depth.get() + 1);
                   self.levels += 1;
                   Ok(())
               })
    }
}

impl Drop for NestingGuard {
    fn drop(&mut self) {
        let levels = self.levels;
        NESTING.with(|depth| depth.set(depth.get().saturating_sub(levels)));
    }
}

/// Line of the next token, or 0 at the end of input.
pub(in crate::interpreter::parser) fn peek_line<I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = Token>
{
    tokens.peek().map_or(0, |token| token.line)
}

/// Kind and line of the next token, without consuming it.
pub(in crate::interpreter::parser) fn peek_kind<I>(tokens: &mut Peekable<I>)
                                                   -> Option<(TokenKind, usize)>
    where I: Iterator<Item = Token>
{
    tokens.peek().map(|token| (token.kind, token.line))
}

/// Returns `true` if the next token is the contextual word `word`.
pub(in crate::interpreter::parser) fn peek_word<I>(tokens: &mut Peekable<I>, word: &str) -> bool
    where I: Iterator<Item = Token>
{
    tokens.peek().is_some_and(|token| token.is_word(word))
}

/// Builds the error for a token that does not fit the grammar.
///
/// Illegal characters get their own error so the message names the
/// character rather than a grammar expectation.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, expected: &'static str) -> ParseError {
    if token.is(TokenKind::Illegal) {
        ParseError::IllegalCharacter { token: token.literal.clone(),
                                       line:  token.line, }
    } else {
        ParseError::UnexpectedToken { token: token.literal.clone(),
                                      expected,
                                      line: token.line }
    }
}

/// Consumes the next token, which must be of `kind`.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `kind`: The required token kind.
/// - `expected`: Description used in the error, e.g. `"expected ')'"`.
/// - `line`: Line reported if the input has already ended.
///
/// # Errors
/// `UnexpectedToken` for any other token, `UnexpectedEndOfInput` if the
/// stream is exhausted.
pub(in crate::interpreter::parser) fn expect<I>(tokens: &mut Peekable<I>,
                                                kind: TokenKind,
                                                expected: &'static str,
                                                line: usize)
                                                -> ParseResult<Token>
    where I: Iterator<Item = Token>
{
    match tokens.next() {
        Some(token) if token.is(kind) => Ok(token),
        Some(token) => Err(unexpected(&token, expected)),
        None => Err(ParseError::UnexpectedEndOfInput { expected, line }),
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<I>(tokens: &mut Peekable<I>,
                                                          expected: &'static str,
                                                          line: usize)
                                                          -> ParseResult<String>
    where I: Iterator<Item = Token>
{
    expect(tokens, TokenKind::Identifier, expected, line).map(|token| token.literal)
}

/// Skips any number of `;` separators.
pub(in crate::interpreter::parser) fn skip_semicolons<I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = Token>
{
    while tokens.next_if(|token| token.is(TokenKind::Semicolon)).is_some() {}
}

/// Consumes a single `{`.
///
/// A `{{` token is split: one brace is consumed and the other is left in the
/// stream as a `{`.
///
/// # Returns
/// The line of the brace.
pub(in crate::interpreter::parser) fn expect_open_brace<I>(tokens: &mut Peekable<I>,
                                                           expected: &'static str,
                                                           line: usize)
                                                           -> ParseResult<usize>
    where I: Iterator<Item = Token>
{
    split_or_expect(tokens, TokenKind::LBrace, TokenKind::ExprOpen, expected, line)
}

/// Consumes a single `}`, splitting a `}}` token the same way
/// [`expect_open_brace`] splits `{{`.
///
/// # Errors
/// `UnterminatedBlock` if anything else follows or the input has ended.
/// `line` is the line the construct was opened on.
pub(in crate::interpreter::parser) fn expect_close_brace<I>(tokens: &mut Peekable<I>,
                                                            line: usize)
                                                            -> ParseResult<usize>
    where I: Iterator<Item = Token>
{
    match peek_kind(tokens) {
        Some((TokenKind::RBrace | TokenKind::ExprClose, _)) => {
            split_or_expect(tokens, TokenKind::RBrace, TokenKind::ExprClose, "expected '}'", line)
        },
        Some(_) => {
            let found = tokens.peek()
                              .map(|token| format!("'{}'", token.literal))
                              .unwrap_or_default();
            Err(ParseError::UnterminatedBlock { found, line })
        },
        None => Err(ParseError::UnterminatedBlock { found: "end of input".to_owned(),
                                                    line }),
    }
}

fn split_or_expect<I>(tokens: &mut Peekable<I>,
                      single: TokenKind,
                      double: TokenKind,
                      expected: &'static str,
                      line: usize)
                      -> ParseResult<usize>
    where I: Iterator<Item = Token>
{
    match peek_kind(tokens) {
        Some((kind, brace_line)) if kind == single => {
            tokens.next();
            Ok(brace_line)
        },
        Some((kind, brace_line)) if kind == double => {
            if let Some(token) = tokens.peek_mut() {
                token.kind = single;
                token.literal.truncate(1);
            }
            Ok(brace_line)
        },
        Some(_) => match tokens.next() {
            Some(token) => Err(unexpected(&token, expected)),
            None => Err(ParseError::UnexpectedEndOfInput { expected, line }),
        },
        None => Err(ParseError::UnexpectedEndOfInput { expected, line }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call arguments and parameter
/// lists. It repeatedly calls `parse_item` to parse one element, expecting
/// either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. A comma
/// directly before the closing token is an error.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token kind that terminates the list (e.g., `]` or `)`).
/// - `expected`: Description used when neither `,` nor `closing` follows.
/// - `line`: Line of the opening token, for end-of-input errors.
///
/// # Returns
/// A vector of parsed items.
pub(in crate::interpreter::parser) fn parse_comma_separated<I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: TokenKind,
    expected: &'static str,
    line: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = Token> + Clone
{
    let mut items = Vec::new();
    if tokens.next_if(|token| token.is(closing)).is_some() {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some(token) if token.is(TokenKind::Comma) => {},
            Some(token) if token.is(closing) => break,
            Some(token) => return Err(unexpected(&token, expected)),
            None => return Err(ParseError::UnexpectedEndOfInput { expected, line }),
        }
    }
    Ok(items)
}
