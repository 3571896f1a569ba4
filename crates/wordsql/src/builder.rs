//! The search word builder.

use std::fmt;

use tracing::{debug, warn};
use wordsql_config::{Config, IblConverterKind, ValueConverterKind};
use wordsql_query::{DEFAULT_MAX_ROUNDS, Node, QueryError, parse_with_limit};

use crate::{
    convert::{identity_value, like_value, strip_ibl},
    generate::Generator,
};

/// Converts a search word into the value bound for its placeholder(s).
pub type ValueConverter<V> = dyn Fn(&str) -> V + Send + Sync;

/// Converts a search word into its boolean-mode full-text form.
pub type IblConverter = dyn Fn(&str) -> String + Send + Sync;

/// Everything produced from one search line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult<V = String> {
    /// Parameterized SQL boolean expression.
    pub sql: String,
    /// Values for the placeholders in `sql`, one entry per search word.
    pub values: Vec<V>,
    /// Equivalent boolean-mode (`IN BOOLEAN MODE`) full-text expression.
    pub ibl: String,
    /// Literal parts of the non-excluded search words, for highlighting.
    pub hits: Vec<String>,
    /// The parsed search words.
    pub tree: Node,
}

impl<V> BuildResult<V> {
    /// Returns true if the search can only exclude rows.
    ///
    /// For example `-word1` is a complement while `-word1 word2` is not. A complement
    /// search usually returns most of the table and is rarely what the user wanted.
    pub fn is_complement(&self) -> bool {
        self.tree.is_complement()
    }
}

/// Builds SQL and IBL from search words.
///
/// A builder is configured once with an SQL template and per-word converters, then builds any
/// number of search lines. Building takes `&self`, so one builder can serve several threads.
///
/// ```
/// use wordsql::SqlBuilder;
///
/// let builder = SqlBuilder::new("body = ?");
/// let result = builder.build("mysql -draft").unwrap();
/// assert_eq!(result.sql, "( (body = ?) AND ( not (body = ?) ) )");
/// assert_eq!(result.values, vec!["mysql", "draft"]);
/// assert_eq!(result.ibl, "+mysql -draft");
/// assert_eq!(result.hits, vec!["mysql"]);
/// ```
pub struct SqlBuilder<V = String> {
    /// The template wrapped in parentheses.
    word_sql: String,
    /// Value converter.
    value: Box<ValueConverter<V>>,
    /// IBL converter.
    ibl: Box<IblConverter>,
    /// Parser round limit.
    max_rounds: usize,
}

impl SqlBuilder<String> {
    /// Creates a builder binding each word unchanged and stripping IBL operators.
    ///
    /// `template` is a parameterized SQL boolean expression with the placeholder(s) the
    /// database driver expects, e.g. `body LIKE ?`.
    pub fn new(template: &str) -> Self {
        Self {
            word_sql: format!("({template})"),
            value: Box::new(identity_value),
            ibl: Box::new(strip_ibl),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Creates a builder from a loaded configuration, logging its warnings.
    pub fn from_config(config: &Config) -> Self {
        for warning in config.validate() {
            warn!(%warning, "questionable builder configuration");
        }

        let settings = &config.builder;
        let builder = Self::new(&settings.template).with_max_rounds(settings.max_rounds);
        let builder = match settings.value {
            ValueConverterKind::Identity => builder,
            ValueConverterKind::Like => builder.with_value_converter(like_value),
        };
        match settings.ibl {
            IblConverterKind::Strip => builder,
            IblConverterKind::Verbatim => builder.with_ibl_converter(identity_value),
        }
    }
}

impl<V> SqlBuilder<V> {
    /// Replaces the value converter.
    ///
    /// The converter may return a composite value, e.g. a `Vec` when the template has
    /// several placeholders per word.
    pub fn with_value_converter<W, F>(self, converter: F) -> SqlBuilder<W>
    where
        F: Fn(&str) -> W + Send + Sync + 'static,
    {
        SqlBuilder {
            word_sql: self.word_sql,
            value: Box::new(converter),
            ibl: self.ibl,
            max_rounds: self.max_rounds,
        }
    }

    /// Replaces the IBL converter.
    pub fn with_ibl_converter<F>(mut self, converter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.ibl = Box::new(converter);
        self
    }

    /// Sets the parser round limit.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Returns the parenthesized SQL template used for every word.
    pub fn word_sql(&self) -> &str {
        &self.word_sql
    }

    /// Returns the parser round limit.
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Converts a search line into SQL, bound values, IBL and hits.
    ///
    /// Fails on invalid syntax (unbalanced parentheses, dangling operators, empty input,
    /// all-wildcard words) and when the search line exceeds the round limit or nests deeper than
    /// [`wordsql_query::MAX_DEPTH`].
    pub fn build(&self, query: &str) -> Result<BuildResult<V>, QueryError> {
        let tree = parse_with_limit(query, self.max_rounds)?;

        let fragment = Generator {
            word_sql: &self.word_sql,
            value: &*self.value,
            ibl: &*self.ibl,
        }
        .generate(&tree);

        debug!(
            query,
            words = fragment.values.len(),
            complement = tree.is_complement(),
            "built search expression"
        );

        Ok(BuildResult {
            sql: fragment.sql,
            values: fragment.values,
            ibl: fragment.ibl,
            hits: fragment.hits,
            tree,
        })
    }
}

impl<V> fmt::Debug for SqlBuilder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlBuilder")
            .field("word_sql", &self.word_sql)
            .field("max_rounds", &self.max_rounds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_parenthesized_once() {
        let builder = SqlBuilder::new("a = ? OR b = ?");
        assert_eq!(builder.word_sql(), "(a = ? OR b = ?)");
        assert_eq!(builder.build("x").unwrap().sql, "(a = ? OR b = ?)");
    }

    #[test]
    fn value_converter_sees_unescaped_word() {
        let builder = SqlBuilder::new("c = ?").with_value_converter(|word| word.len());
        let result = builder.build(r#""a\"b""#).unwrap();
        assert_eq!(result.values, vec![3]);
    }

    #[test]
    fn ibl_converter_sees_unescaped_word() {
        let builder = SqlBuilder::new("c = ?").with_ibl_converter(|word| word.to_owned());
        let result = builder.build(r#""a\"b\\c""#).unwrap();
        assert_eq!(result.ibl, "\"a\"b\\c\"");
    }

    #[test]
    fn ibl_converter_is_replaceable() {
        let builder = SqlBuilder::new("c = ?").with_ibl_converter(|word| word.to_uppercase());
        assert_eq!(builder.build("a OR b").unwrap().ibl, "(A B)");
    }

    #[test]
    fn max_rounds_applies() {
        let builder = SqlBuilder::new("c = ?").with_max_rounds(3);
        assert_eq!(builder.max_rounds(), 3);
        assert!(builder.build("a b").unwrap_err().is_complexity());
    }

    #[test]
    fn debug_shows_template() {
        let debug = format!("{:?}", SqlBuilder::new("c = ?"));
        assert!(debug.contains("(c = ?)"));
    }

    #[test]
    fn from_config_selects_converters() {
        let config = Config::from_toml(
            "[builder]\ntemplate = \"c LIKE ?\"\nvalue = \"like\"\nibl = \"verbatim\"\n",
        )
        .unwrap();
        let builder = SqlBuilder::from_config(&config);
        let result = builder.build("+a_b*").unwrap();
        assert_eq!(result.values, vec![r"%+a\_b%%"]);
        assert_eq!(result.ibl, "+a_b*");
    }

    #[test]
    fn from_config_defaults() {
        let config = Config::from_toml("[builder]\ntemplate = \"c = ?\"\n").unwrap();
        let builder = SqlBuilder::from_config(&config);
        let result = builder.build("+a").unwrap();
        assert_eq!(result.values, vec!["+a"]);
        assert_eq!(result.ibl, "a");
        assert_eq!(builder.max_rounds(), DEFAULT_MAX_ROUNDS);
    }
}
