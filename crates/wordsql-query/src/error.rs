//! Error types for search word parsing.
//!
//! The parser reports [`ParseError`]s against token indices; [`QueryError`] is the public form
//! with byte positions into the original search line.

use std::{error, fmt};

use thiserror::Error;

/// Parser error with token position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tokens do not reduce to a single well-formed tree.
    #[error("{message}")]
    Syntax {
        /// Error message.
        message: String,
        /// Token index where the error was detected (if applicable).
        token_index: Option<usize>,
    },

    /// The reduce loop did not converge within its round limit.
    #[error("too complex to parse: no result after {rounds} rounds")]
    Complexity {
        /// The round limit that was exceeded.
        rounds: usize,
    },

    /// A reduced subtree would nest deeper than the depth limit.
    #[error("too deeply nested: more than {max_depth} levels")]
    TooDeep {
        /// The depth limit that was exceeded.
        max_depth: usize,
    },

    /// The parser reached a state that the precedence table should make impossible.
    #[error("internal parser error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a syntax error.
    pub fn syntax(message: impl Into<String>, token_index: Option<usize>) -> Self {
        Self::Syntax {
            message: message.into(),
            token_index,
        }
    }

    /// Creates an internal consistency error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// A unified error type for search word parsing.
///
/// This type provides detailed error messages with context, including
/// the original search line and a position indicator where applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The kind of error that occurred.
    pub kind: QueryErrorKind,
    /// The original search line (if available).
    pub query: Option<String>,
}

/// The specific kind of query error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Invalid syntax: unbalanced parentheses, dangling operators, degenerate words.
    Syntax {
        /// Error message.
        message: String,
        /// Byte position in the search line (if available).
        position: Option<usize>,
    },
    /// The search line is too complex to parse within the round limit.
    Complexity {
        /// The round limit that was exceeded.
        rounds: usize,
    },
    /// The search line nests operators or groups deeper than the parser allows.
    TooDeep {
        /// The depth limit that was exceeded.
        max_depth: usize,
    },
    /// Broken parser invariant. Never caused by user input alone.
    Internal {
        /// Error message.
        message: String,
    },
}

impl QueryError {
    /// Creates a syntax error.
    pub fn syntax(
        message: impl Into<String>,
        position: Option<usize>,
        query: Option<String>,
    ) -> Self {
        Self {
            kind: QueryErrorKind::Syntax {
                message: message.into(),
                position,
            },
            query,
        }
    }

    /// Creates a complexity error.
    pub fn complexity(rounds: usize) -> Self {
        Self {
            kind: QueryErrorKind::Complexity { rounds },
            query: None,
        }
    }

    /// Creates a nesting depth error.
    pub fn too_deep(max_depth: usize) -> Self {
        Self {
            kind: QueryErrorKind::TooDeep { max_depth },
            query: None,
        }
    }

    /// Creates an internal consistency error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Internal {
                message: message.into(),
            },
            query: None,
        }
    }

    /// Converts a parser error, mapping its token index to a byte position via `offsets`.
    pub(crate) fn from_parse(err: ParseError, offsets: &[usize], query: &str) -> Self {
        let err = match err {
            ParseError::Syntax {
                message,
                token_index,
            } => {
                let position = token_index.and_then(|idx| offsets.get(idx).copied());
                Self::syntax(message, position, None)
            }
            ParseError::Complexity { rounds } => Self::complexity(rounds),
            ParseError::TooDeep { max_depth } => Self::too_deep(max_depth),
            ParseError::Internal { message } => Self::internal(message),
        };
        err.with_query(query)
    }

    /// Sets the search line for this error.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns true for syntax errors.
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, QueryErrorKind::Syntax { .. })
    }

    /// Returns true when the round limit or the nesting limit was exceeded.
    pub fn is_complexity(&self) -> bool {
        matches!(
            self.kind,
            QueryErrorKind::Complexity { .. } | QueryErrorKind::TooDeep { .. }
        )
    }

    /// Returns true for internal consistency errors.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind, QueryErrorKind::Internal { .. })
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        match &self.kind {
            QueryErrorKind::Syntax { message, .. } | QueryErrorKind::Internal { message } => {
                message.clone()
            }
            QueryErrorKind::Complexity { rounds } => {
                format!("too complex to parse: no result after {rounds} rounds")
            }
            QueryErrorKind::TooDeep { max_depth } => {
                format!("too deeply nested: more than {max_depth} levels")
            }
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            QueryErrorKind::Syntax { message, .. } if message.contains("parenthesis") => {
                Some("Check that every ( has a matching )")
            }
            QueryErrorKind::Syntax { message, .. } if message.contains("OR") => {
                Some("OR requires search words on both sides, e.g., 'mysql OR postgres'")
            }
            QueryErrorKind::Syntax { message, .. } if message.contains("'-'") => {
                Some("'-' must be followed by the word or group to exclude, e.g., '-draft'")
            }
            QueryErrorKind::Syntax { message, .. } if message.contains("wildcard") => {
                Some("Add at least one literal character next to '*'")
            }
            QueryErrorKind::Complexity { .. } => Some("Use fewer search words or groups"),
            QueryErrorKind::TooDeep { .. } => {
                Some("Use fewer nested groups or '-' signs, or split the search into several")
            }
            _ => None,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match &self.kind {
            QueryErrorKind::Syntax { .. } => "search syntax error",
            QueryErrorKind::Complexity { .. } | QueryErrorKind::TooDeep { .. } => "search error",
            QueryErrorKind::Internal { .. } => "internal error",
        };

        writeln!(f, "{}: {}", prefix, self.message())?;

        if let Some(query) = &self.query {
            writeln!(f, "  {query}")?;
            if let QueryErrorKind::Syntax {
                position: Some(pos),
                ..
            } = &self.kind
            {
                let column = query.char_indices().take_while(|(idx, _)| idx < pos).count();
                writeln!(f, "  {}^", " ".repeat(column))?;
            }
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }

        Ok(())
    }
}

impl error::Error for QueryError {}
