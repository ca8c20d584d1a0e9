use std::iter::Peekable;

use crate::{
    ast::Block,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{expect_close_brace, expect_open_brace, peek_kind, skip_semicolons},
        },
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements, optionally separated by
/// semicolons. Parsing continues until the closing `}` is found.
///
/// Grammar: `block := "{" (statement ";"*)* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// The statements of the block.
///
/// # Errors
/// `UnterminatedBlock` if the input ends before the closing brace.
pub fn parse_block<I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = Token> + Clone
{
    let line = expect_open_brace(tokens, "expected '{' to start block", 0)?;
    let mut statements = Vec::new();

    loop {
        skip_semicolons(tokens);
        match peek_kind(tokens) {
            Some((TokenKind::RBrace | TokenKind::ExprClose, _)) => {
                expect_close_brace(tokens, line)?;
                return Ok(statements);
            },
            Some(_) => statements.push(parse_statement(tokens)?),
            None => {
                return Err(ParseError::UnterminatedBlock { found: "end of input".to_owned(),
                                                           line });
            },
        }
    }
}
