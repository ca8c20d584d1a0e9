use brickengine::interpreter::lexer::{Token, TokenKind, Tokenizer};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    Tokenizer::new(source).map(|token| token.kind).collect()
}

fn tokens(source: &str) -> Vec<Token> {
    Tokenizer::new(source).collect()
}

#[test]
fn keywords_ignore_case() {
    assert_eq!(kinds("LET Fn rEtUrn while TRY catch for in"),
               vec![TokenKind::Let,
                    TokenKind::Fn,
                    TokenKind::Return,
                    TokenKind::While,
                    TokenKind::Try,
                    TokenKind::Catch,
                    TokenKind::For,
                    TokenKind::In]);
    assert_eq!(kinds("True NULL false"),
               vec![TokenKind::True, TokenKind::Null, TokenKind::False]);
}

#[test]
fn if_and_else_are_identifiers() {
    let tokens = tokens("if else");
    assert!(tokens.iter().all(|token| token.is(TokenKind::Identifier)));
    assert!(tokens[0].is_word("IF"));
}

#[test]
fn minus_glues_to_digits_only() {
    assert_eq!(tokens("-1.5e3")[0].literal, "-1.5e3");
    assert_eq!(kinds("- 1"), vec![TokenKind::Minus, TokenKind::Number]);
    assert_eq!(kinds("a-1"), vec![TokenKind::Identifier, TokenKind::Number]);
}

#[test]
fn multi_character_operators() {
    assert_eq!(kinds("== != <= >= < > = |"),
               vec![TokenKind::EqualEqual,
                    TokenKind::BangEqual,
                    TokenKind::LessEqual,
                    TokenKind::GreaterEqual,
                    TokenKind::Less,
                    TokenKind::Greater,
                    TokenKind::Assign,
                    TokenKind::Pipe]);
    assert_eq!(kinds("{{ }} { }"),
               vec![TokenKind::ExprOpen, TokenKind::ExprClose, TokenKind::LBrace, TokenKind::RBrace]);
}

#[test]
fn strings_are_unescaped() {
    let tokens = tokens(r#""a\"b\n" 'c\'d'"#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].literal, "a\"b\n");
    assert_eq!(tokens[1].literal, "c'd");
}

#[test]
fn comments_are_skipped() {
    assert_eq!(kinds("1 # hash\n2 // slashes\n3"),
               vec![TokenKind::Number, TokenKind::Number, TokenKind::Number]);
}

#[test]
fn tokens_carry_their_line() {
    let lines: Vec<usize> = tokens("a\nb\n\nc").iter().map(|token| token.line).collect();
    assert_eq!(lines, vec![1, 2, 4]);

    let lines: Vec<usize> = tokens("'multi\nline' x").iter().map(|token| token.line).collect();
    assert_eq!(lines, vec![1, 2]);
}

#[test]
fn unknown_characters_are_illegal() {
    let tokens = tokens("1 @ 2");
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].literal, "@");
}

#[test]
fn end_of_input_repeats() {
    let mut tokenizer = Tokenizer::new("x");
    assert_eq!(tokenizer.next_token().kind, TokenKind::Identifier);
    assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
    assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
}
