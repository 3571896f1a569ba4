//! Search word lexer (tokenizer).
//!
//! Converts a search line into a stream of tokens for the precedence parser. Juxtaposed terms
//! are joined by explicit [`Token::And`] tokens, and the stream always ends with
//! [`Token::End`].

use std::{iter::Peekable, str::CharIndices};

/// A token in the search word language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A search word. `multi` is true for quoted phrases, false for bare words.
    Word {
        /// The unescaped word text.
        text: String,
        /// Whether the word came from a quoted phrase.
        multi: bool,
    },

    /// Implicit conjunction between two juxtaposed terms.
    And,

    /// The OR keyword.
    Or,

    /// Negation prefix (-).
    Exclude,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,

    /// End of input marker.
    End,
}

/// The type of a token, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input.
    End,
    /// Left parenthesis.
    LParen,
    /// Right parenthesis.
    RParen,
    /// Search word.
    Word,
    /// OR keyword.
    Or,
    /// Implicit AND.
    And,
    /// Negation prefix.
    Exclude,
}

impl Token {
    /// Creates a bare word token.
    pub fn word(text: impl Into<String>) -> Self {
        Self::Word {
            text: text.into(),
            multi: false,
        }
    }

    /// Creates a quoted phrase token.
    pub fn phrase(text: impl Into<String>) -> Self {
        Self::Word {
            text: text.into(),
            multi: true,
        }
    }

    /// Returns the kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Word { .. } => TokenKind::Word,
            Self::And => TokenKind::And,
            Self::Or => TokenKind::Or,
            Self::Exclude => TokenKind::Exclude,
            Self::LParen => TokenKind::LParen,
            Self::RParen => TokenKind::RParen,
            Self::End => TokenKind::End,
        }
    }
}

/// A token together with the byte offset where it starts in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
    /// The token.
    pub token: Token,
    /// Byte offset of the token in the input. Implicit ANDs take the offset of the token that
    /// follows them, and the end marker sits at the input length.
    pub offset: usize,
}

/// Tokenizes a search line.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenizes the entire input, including implicit ANDs and the end marker.
    fn tokenize(mut self) -> Vec<Spanned> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token() {
            tokens.push(token);
        }

        let mut tokens = insert_implicit_and(tokens);
        tokens.push(Spanned {
            token: Token::End,
            offset: self.input.len(),
        });
        tokens
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Option<Spanned> {
        self.skip_whitespace();

        let &(offset, ch) = self.chars.peek()?;

        let token = match ch {
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            '-' => {
                self.advance();
                Token::Exclude
            }
            '"' => match self.read_phrase(offset) {
                Some(token) => token,
                None => self.read_word(),
            },
            _ if self.at_or_keyword(offset) => {
                self.advance();
                self.advance();
                Token::Or
            }
            _ => self.read_word(),
        };

        Some(Spanned { token, offset })
    }

    /// Checks whether a standalone `OR` keyword starts at `offset`.
    ///
    /// `OR` directly followed by `-` or `"` is still the keyword, so `a OR-b` and `a OR"b c"`
    /// read as OR applied to a negation or a phrase.
    fn at_or_keyword(&self, offset: usize) -> bool {
        let Some(rest) = self.input[offset..].strip_prefix("OR") else {
            return false;
        };
        rest.chars()
            .next()
            .is_none_or(|ch| is_word_boundary(ch) || ch == '-' || ch == '"')
    }

    /// Reads a quoted phrase starting at the opening quote at `offset`.
    ///
    /// Returns None without consuming anything if the quote is never closed; the caller then
    /// scans the text as a bare word.
    fn read_phrase(&mut self, offset: usize) -> Option<Token> {
        let body_start = offset + 1;
        let close = find_closing_quote(&self.input[body_start..])? + body_start;

        let text = unescape(&self.input[body_start..close]);
        while self.chars.next_if(|&(idx, _)| idx <= close).is_some() {}

        Some(Token::phrase(text))
    }

    /// Reads a bare word: a maximal run without whitespace or parentheses.
    fn read_word(&mut self) -> Token {
        let mut raw = String::new();

        while let Some(&(_, ch)) = self.chars.peek() {
            if is_word_boundary(ch) {
                break;
            }
            raw.push(ch);
            self.advance();
        }

        Token::word(unescape(&raw))
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, ch)| ch.is_whitespace()).is_some() {}
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        self.chars.next();
    }
}

/// Characters that terminate a bare word.
fn is_word_boundary(ch: char) -> bool {
    ch.is_whitespace() || ch == '(' || ch == ')'
}

/// Finds the byte index of the quote closing a phrase body, honoring `\"` and `\\` escapes.
fn find_closing_quote(body: &str) -> Option<usize> {
    let mut chars = body.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                let mut lookahead = chars.clone();
                if matches!(lookahead.next(), Some((_, '"' | '\\'))) {
                    chars = lookahead;
                }
            }
            '"' => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Replaces `\"` with `"` and `\\` with `\`. Other backslashes are kept as they are.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\'
            && let Some(escaped) = chars.next_if(|&next| next == '"' || next == '\\')
        {
            out.push(escaped);
        } else {
            out.push(ch);
        }
    }

    out
}

/// Inserts an AND after every word or right parenthesis that is followed by anything other
/// than OR or a right parenthesis.
fn insert_implicit_and(tokens: Vec<Spanned>) -> Vec<Spanned> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    let mut iter = tokens.into_iter().peekable();

    while let Some(current) = iter.next() {
        let joins = matches!(current.token, Token::Word { .. } | Token::RParen);
        out.push(current);

        if let Some(next) = iter.peek()
            && joins
            && !matches!(next.token, Token::Or | Token::RParen)
        {
            out.push(Spanned {
                token: Token::And,
                offset: next.offset,
            });
        }
    }

    out
}

/// Tokenizes with byte offsets for error reporting.
pub(crate) fn tokenize_spanned(input: &str) -> Vec<Spanned> {
    Lexer::new(input).tokenize()
}

/// Tokenizes a search line.
///
/// Never fails: every character either starts a token, separates tokens or becomes part of a
/// bare word. The returned stream always ends with [`Token::End`].
pub fn tokenize(input: &str) -> Vec<Token> {
    tokenize_spanned(input)
        .into_iter()
        .map(|spanned| spanned.token)
        .collect()
}
