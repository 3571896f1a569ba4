//! Search word parser.
//!
//! Parses a token stream into an AST with an operator-precedence (shift/reduce) automaton
//! driven by the ranks in [`crate::precedence`].
//!
//! # Productions
//!
//! Tried in this order against the trailing entries of the stack, where `*` is an already
//! reduced node:
//!
//! ```text
//! word    → WORD
//! and     → * AND *
//! or      → * OR *
//! paren   → "(" * ")"
//! exclude → "-" *
//! ```

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::{
    ast::{Node, Op},
    error::{ParseError, QueryError},
    lexer::{Token, TokenKind, tokenize_spanned},
};

/// Default limit on shift/reduce rounds for one parse.
pub const DEFAULT_MAX_ROUNDS: usize = 100;

/// Deepest tree the parser builds, counting a word leaf as depth 1.
///
/// Tree walks are recursive, so this bounds stack use however high the round limit is set. A
/// flat list of words nests one level per implicit AND.
pub const MAX_DEPTH: usize = 256;

/// An entry on the parser stack.
#[derive(Debug)]
enum Entry {
    /// A token that has not been reduced yet.
    Terminal {
        /// The token.
        token: Token,
        /// Index of the token in the input stream; None for the bottom end marker.
        index: Option<usize>,
    },
    /// A reduced subtree.
    Node {
        /// The subtree.
        node: Node,
        /// Height of the subtree.
        depth: usize,
    },
}

impl Entry {
    /// Returns the token kind and index if this entry is a terminal.
    fn terminal(&self) -> Option<(TokenKind, Option<usize>)> {
        match self {
            Self::Terminal { token, index } => Some((token.kind(), *index)),
            Self::Node { .. } => None,
        }
    }
}

/// One slot of a production's right-hand side.
#[derive(Debug, Clone, Copy)]
enum Slot {
    /// Exactly one reduced node.
    Reduced,
    /// Exactly one terminal of the given kind.
    Terminal(TokenKind),
}

impl Slot {
    /// Checks whether a stack entry fits this slot.
    fn accepts(self, entry: &Entry) -> bool {
        match (self, entry) {
            (Self::Reduced, Entry::Node { .. }) => true,
            (Self::Terminal(kind), Entry::Terminal { token, .. }) => token.kind() == kind,
            _ => false,
        }
    }
}

/// A grammar production: a stack suffix shape and the node it reduces to.
#[derive(Debug)]
struct Production {
    /// Right-hand side, matched against the end of the stack.
    form: &'static [Slot],
    /// Operator of the node the handle reduces to.
    op: Op,
}

impl Production {
    /// Checks whether the production matches the exact trailing suffix of the stack.
    fn matches(&self, stack: &[Entry]) -> bool {
        let Some(start) = stack.len().checked_sub(self.form.len()) else {
            return false;
        };
        stack[start..]
            .iter()
            .zip(self.form)
            .all(|(entry, slot)| slot.accepts(entry))
    }
}

/// Productions in priority order; the first match wins.
const PRODUCTIONS: [Production; 5] = [
    Production {
        form: &[Slot::Terminal(TokenKind::Word)],
        op: Op::Word,
    },
    Production {
        form: &[Slot::Reduced, Slot::Terminal(TokenKind::And), Slot::Reduced],
        op: Op::And,
    },
    Production {
        form: &[Slot::Reduced, Slot::Terminal(TokenKind::Or), Slot::Reduced],
        op: Op::Or,
    },
    Production {
        form: &[
            Slot::Terminal(TokenKind::LParen),
            Slot::Reduced,
            Slot::Terminal(TokenKind::RParen),
        ],
        op: Op::Paren,
    },
    Production {
        form: &[Slot::Terminal(TokenKind::Exclude), Slot::Reduced],
        op: Op::Exclude,
    },
];

/// Operator-precedence parser for search words.
struct Parser {
    /// Token stream to parse, terminated by [`Token::End`].
    tokens: Vec<Token>,
    /// Current position in token stream.
    position: usize,
    /// Shift/reduce stack. The bottom entry is always the end marker.
    stack: Vec<Entry>,
    /// Maximum number of shift/reduce rounds.
    max_rounds: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Token>, max_rounds: usize) -> Self {
        Self {
            tokens,
            position: 0,
            stack: vec![Entry::Terminal {
                token: Token::End,
                index: None,
            }],
            max_rounds,
        }
    }

    /// Runs the automaton until the stream is consumed or the round limit is hit.
    fn parse(mut self) -> Result<Node, ParseError> {
        for round in 0..self.max_rounds {
            let (top, top_index) = self.top_terminal()?;
            let Some(next) = self.tokens.get(self.position).map(Token::kind) else {
                return Err(ParseError::syntax("unexpected end of tokens", None));
            };

            if top == TokenKind::End && next == TokenKind::End {
                return self.finish();
            }

            match top.left_rank().cmp(&next.right_rank()) {
                Ordering::Less | Ordering::Equal => {
                    if next == TokenKind::End {
                        // Only an open parenthesis lets the end marker be shifted.
                        return Err(ParseError::syntax("missing closing parenthesis", top_index));
                    }
                    trace!(round, token = ?next, "shift");
                    self.shift();
                }
                Ordering::Greater => self.reduce_handles()?,
            }
        }

        Err(ParseError::Complexity {
            rounds: self.max_rounds,
        })
    }

    /// Moves the next input token onto the stack.
    fn shift(&mut self) {
        let token = self.tokens[self.position].clone();
        self.stack.push(Entry::Terminal {
            token,
            index: Some(self.position),
        });
        self.position += 1;
    }

    /// Reduces handles until the stack's rightmost terminal no longer binds at least as tightly
    /// as the construct just reduced.
    fn reduce_handles(&mut self) -> Result<(), ParseError> {
        loop {
            let reduced = self.reduce()?;
            let (top, _) = self.top_terminal()?;
            if top.left_rank() < reduced.right_rank() {
                return Ok(());
            }
        }
    }

    /// Replaces the first matching production's handle with its node.
    ///
    /// Returns the kind of the leftmost terminal in the handle.
    fn reduce(&mut self) -> Result<TokenKind, ParseError> {
        let Some(production) = PRODUCTIONS.iter().find(|p| p.matches(&self.stack)) else {
            return Err(self.syntax_error());
        };

        let handle = self
            .stack
            .split_off(self.stack.len() - production.form.len());
        let leftmost = handle
            .iter()
            .find_map(|entry| entry.terminal().map(|(kind, _)| kind))
            .ok_or_else(|| ParseError::internal("production without a terminal"))?;

        let depth = handle
            .iter()
            .filter_map(|entry| match entry {
                Entry::Node { depth, .. } => Some(*depth),
                Entry::Terminal { .. } => None,
            })
            .max()
            .map_or(1, |deepest| deepest + 1);
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                max_depth: MAX_DEPTH,
            });
        }

        let node = build_node(production.op, handle)?;
        trace!(op = ?production.op, depth, "reduce");
        self.stack.push(Entry::Node { node, depth });

        Ok(leftmost)
    }

    /// Returns the rightmost terminal on the stack.
    fn top_terminal(&self) -> Result<(TokenKind, Option<usize>), ParseError> {
        self.stack
            .iter()
            .rev()
            .find_map(Entry::terminal)
            .ok_or_else(|| ParseError::internal("parser stack lost its end marker"))
    }

    /// Describes why no production matches the current stack.
    fn syntax_error(&self) -> ParseError {
        let Ok((kind, index)) = self.top_terminal() else {
            return ParseError::syntax("syntax error", None);
        };

        let message = match kind {
            TokenKind::RParen => {
                let before = self.stack.len().checked_sub(2).map(|i| &self.stack[i]);
                if matches!(
                    before.and_then(Entry::terminal),
                    Some((TokenKind::LParen, _))
                ) {
                    "empty parenthesis group"
                } else {
                    "unmatched closing parenthesis"
                }
            }
            TokenKind::Or => "OR is missing a search word on one side",
            TokenKind::Exclude => "'-' is missing a search word to exclude",
            _ => "syntax error",
        };

        ParseError::syntax(message, index)
    }

    /// Checks that exactly one node is left above the end marker and returns it.
    fn finish(mut self) -> Result<Node, ParseError> {
        match self.stack.len() {
            1 => Err(ParseError::syntax("no search words", None)),
            2 => match self.stack.pop() {
                Some(Entry::Node { node, .. }) => Ok(node),
                _ => Err(ParseError::internal("end marker above the stack bottom")),
            },
            _ => Err(ParseError::syntax(
                "search words do not form a single expression",
                None,
            )),
        }
    }
}

/// Builds the node for a matched handle.
fn build_node(op: Op, handle: Vec<Entry>) -> Result<Node, ParseError> {
    let mismatch = || ParseError::internal(format!("handle does not fit the {op:?} production"));
    let mut entries = handle.into_iter();

    match op {
        Op::Word => match entries.next() {
            Some(Entry::Terminal {
                token: Token::Word { text, multi },
                index,
            }) => word_leaf(text, multi, index),
            _ => Err(mismatch()),
        },
        Op::And | Op::Or => {
            let (
                Some(Entry::Node { node: left, .. }),
                Some(_),
                Some(Entry::Node { node: right, .. }),
            ) = (entries.next(), entries.next(), entries.next())
            else {
                return Err(mismatch());
            };
            Ok(if op == Op::And {
                Node::and(left, right)
            } else {
                Node::or(left, right)
            })
        }
        Op::Paren => {
            let (Some(_), Some(Entry::Node { node: inner, .. }), Some(_)) =
                (entries.next(), entries.next(), entries.next())
            else {
                return Err(mismatch());
            };
            Ok(Node::paren(inner))
        }
        Op::Exclude => {
            let (Some(_), Some(Entry::Node { node: inner, .. })) = (entries.next(), entries.next())
            else {
                return Err(mismatch());
            };
            Ok(Node::exclude(inner))
        }
    }
}

/// Builds a word leaf, rejecting words that cannot produce a meaningful predicate.
fn word_leaf(text: String, multi: bool, index: Option<usize>) -> Result<Node, ParseError> {
    if text.is_empty() {
        return Err(ParseError::syntax("empty phrase", index));
    }
    if text.chars().all(|ch| ch == '*') {
        return Err(ParseError::syntax(
            "search word consists only of wildcards",
            index,
        ));
    }
    Ok(Node::Word { text, multi })
}

/// Parses a token stream into an AST.
///
/// The stream must end with [`Token::End`], as produced by [`crate::tokenize`].
pub fn parse_tokens(tokens: Vec<Token>, max_rounds: usize) -> Result<Node, ParseError> {
    Parser::new(tokens, max_rounds).parse()
}

/// Parses a search line into an AST using at most `max_rounds` shift/reduce rounds.
pub fn parse_with_limit(input: &str, max_rounds: usize) -> Result<Node, QueryError> {
    let (tokens, offsets): (Vec<Token>, Vec<usize>) = tokenize_spanned(input)
        .into_iter()
        .map(|spanned| (spanned.token, spanned.offset))
        .unzip();

    parse_tokens(tokens, max_rounds).map_err(|err| {
        debug!(query = input, error = %err, "failed to parse search words");
        QueryError::from_parse(err, &offsets, input)
    })
}

/// Parses a search line into an AST.
///
/// Returns `Err(QueryError)` for invalid syntax, including empty input.
pub fn parse(input: &str) -> Result<Node, QueryError> {
    parse_with_limit(input, DEFAULT_MAX_ROUNDS)
}
