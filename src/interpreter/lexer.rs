use logos::Logos;

/// The kind of a lexical token.
///
/// Kinds carry no payload; the matched text lives in [`Token::literal`].
/// Keywords are matched case-insensitively, so `LET` and `Let` both produce
/// [`TokenKind::Let`] while the literal keeps the original casing.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    /// Numeric literals such as `42`, `-3.5` or `1e-9`. A `-` directly
    /// followed by a digit belongs to the number.
    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,
    /// String literals delimited by `"` or `'`. A missing closing quote runs
    /// the literal to the end of the input.
    #[regex(r#""([^"\\]|\\(.|\n))*"?"#, allow_greedy = true)]
    #[regex(r"'([^'\\]|\\(.|\n))*'?", allow_greedy = true)]
    String,
    /// Identifiers such as `user`, `gb` or `_tmp1`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// `true`
    #[token("true", ignore(case))]
    True,
    /// `false`
    #[token("false", ignore(case))]
    False,
    /// `null`
    #[token("null", ignore(case))]
    Null,
    /// `let`
    #[token("let", ignore(case))]
    Let,
    /// `fn`
    #[token("fn", ignore(case))]
    Fn,
    /// `return`
    #[token("return", ignore(case))]
    Return,
    /// `for`
    #[token("for", ignore(case))]
    For,
    /// `in`
    #[token("in", ignore(case))]
    In,
    /// `while`
    #[token("while", ignore(case))]
    While,
    /// `try`
    #[token("try", ignore(case))]
    Try,
    /// `catch`
    #[token("catch", ignore(case))]
    Catch,
    /// `{{`
    #[token("{{")]
    ExprOpen,
    /// `}}`
    #[token("}}")]
    ExprClose,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `|`
    #[token("|")]
    Pipe,
    /// `# comments` and `// comments`, both running to the end of the line.
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// A character the language does not know. Reported by the parser, never
    /// by the tokenizer.
    Illegal,
    /// End of input.
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
#[derive(Debug, Clone)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// A single token: its kind, its literal text and the line it starts on.
///
/// For string tokens the literal is the decoded content, without quotes and
/// with escape sequences resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The text of the token as it should be interpreted.
    pub literal: String,
    /// 1-based source line.
    pub line:    usize,
}

impl Token {
    /// Returns `true` if the token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns `true` if the token is the identifier `word`, ignoring case.
    ///
    /// Used for the contextual words `if` and `else`, which are not reserved.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.literal.eq_ignore_ascii_case(word)
    }
}

/// Produces tokens lazily from source text.
///
/// The tokenizer is cheap to clone, which is how the parser looks ahead past
/// its one-token peek: it clones the stream, parses speculatively, and either
/// commits the clone or throws it away.
///
/// # Example
/// ```
/// use brickengine::interpreter::lexer::{TokenKind, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new("let x = 'a' // comment");
/// let kinds: Vec<TokenKind> = std::iter::from_fn(|| {
///                                 let token = tokenizer.next_token();
///                                 (token.kind != TokenKind::Eof).then_some(token.kind)
///                             }).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Let, TokenKind::Identifier, TokenKind::Assign, TokenKind::String]);
/// ```
#[derive(Clone)]
pub struct Tokenizer<'src> {
    lexer: logos::Lexer<'src, TokenKind>,
}

impl<'src> Tokenizer<'src> {
    /// Creates a tokenizer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { lexer: TokenKind::lexer_with_extras(source, LexerExtras::default()) }
    }

    /// Returns the next token and advances past it.
    ///
    /// Whitespace and comments are skipped first. Once the input is
    /// exhausted every call returns an [`TokenKind::Eof`] token. Characters
    /// that match no rule come back as [`TokenKind::Illegal`].
    pub fn next_token(&mut self) -> Token {
        let next = self.lexer.next();
        let line = self.lexer.extras.line;

        match next {
            Some(Ok(TokenKind::String)) => {
                let slice = self.lexer.slice();
                self.lexer.extras.line += slice.matches('\n').count();
                Token { kind: TokenKind::String,
                        literal: unescape(slice),
                        line }
            },
            Some(Ok(kind)) => Token { kind,
                                      literal: self.lexer.slice().to_owned(),
                                      line },
            Some(Err(())) => Token { kind: TokenKind::Illegal,
                                     literal: self.lexer.slice().to_owned(),
                                     line },
            None => Token { kind: TokenKind::Eof,
                            literal: String::new(),
                            line },
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields tokens until the end of input; the `Eof` token itself is not
    /// yielded.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

/// Decodes a quoted string slice.
///
/// The first character is the delimiter. `\n`, `\r`, `\t`, `\\` and an
/// escaped delimiter are translated; any other escape is kept as written.
fn unescape(slice: &str) -> String {
    let mut chars = slice.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(slice.len());
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some(c) if c == quote => out.push(quote),
                Some(c) => {
                    out.push('\\');
                    out.push(c);
                },
                None => out.push('\\'),
            },
            c if c == quote => break,
            c => out.push(c),
        }
    }
    out
}
