//! Convert Google-style search words into SQL.
//!
//! A search line such as `mysql -(draft OR old) "full text"` is parsed into a tree and turned
//! into three things at once:
//!
//! - a parameterized SQL boolean expression built from a per-word template, with the values
//!   to bind to its placeholders
//! - the equivalent MySQL boolean-mode (`IN BOOLEAN MODE`) full-text expression, called IBL
//! - the literal parts of the non-excluded words, for highlighting matches
//!
//! # Example
//!
//! ```
//! use wordsql::{SqlBuilder, like_value};
//!
//! let builder = SqlBuilder::new("body LIKE ?").with_value_converter(like_value);
//! let result = builder.build("mysql OR postgres").unwrap();
//! assert_eq!(result.sql, "( (body LIKE ?) OR (body LIKE ?) )");
//! assert_eq!(result.values, vec!["%mysql%", "%postgres%"]);
//! assert_eq!(result.ibl, "(mysql postgres)");
//! ```
//!
//! Templates with several placeholders per word take a composite value:
//!
//! ```
//! use wordsql::SqlBuilder;
//!
//! let builder = SqlBuilder::new("title = ? OR body = ?")
//!     .with_value_converter(|word| vec![word.to_owned(), word.to_owned()]);
//! let result = builder.build("rust").unwrap();
//! assert_eq!(result.values, vec![vec!["rust", "rust"]]);
//! ```

#![warn(missing_docs)]

mod builder;
mod convert;
mod generate;

pub use builder::{BuildResult, IblConverter, SqlBuilder, ValueConverter};
pub use convert::{identity_value, like_value, replicate_data_type, strip_ibl};
pub use wordsql_config::{Config, ConfigError, ConfigWarning};
pub use wordsql_query::{
    DEFAULT_MAX_ROUNDS, MAX_DEPTH, Node, Op, QueryError, QueryErrorKind, parse, parse_with_limit,
    tokenize,
};
