//! Tokenizer, precedence parser and AST for Google-style search words.
//!
//! The search word language:
//!
//! - **Words**: `mysql` - bare words, `*` acts as a wildcard
//! - **Phrases**: `"full text"` - quoted, with `\"` and `\\` escapes
//! - **AND**: `mysql index` - juxtaposition
//! - **OR**: `mysql OR postgres` - case-sensitive keyword, binds tighter than AND
//! - **Negation**: `-draft` - excludes the following word or group
//! - **Grouping**: `(a b) OR c` - precedence control
//!
//! # Example
//!
//! ```
//! use wordsql_query::parse;
//!
//! let tree = parse("mysql -(draft OR old)").unwrap();
//! assert_eq!(tree.word_count(), 3);
//! assert!(!tree.is_complement());
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;
mod precedence;

pub use ast::{Node, Op};
pub use error::{ParseError, QueryError, QueryErrorKind};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{DEFAULT_MAX_ROUNDS, MAX_DEPTH, parse, parse_tokens, parse_with_limit};
