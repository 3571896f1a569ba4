//! Search word abstract syntax tree.
//!
//! The parser produces binary `And`/`Or` nodes and keeps explicit `Paren` nodes, because the
//! generated SQL and IBL both preserve the grouping the user typed.

use std::fmt;

/// The operator tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// A search word leaf.
    Word,
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
    /// Parenthesized group.
    Paren,
    /// Negation.
    Exclude,
}

/// A parsed search expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A search word or quoted phrase.
    Word {
        /// The unescaped word text.
        text: String,
        /// Whether the word came from a quoted phrase.
        multi: bool,
    },

    /// Both sides must match.
    And(Box<Self>, Box<Self>),

    /// At least one side must match.
    Or(Box<Self>, Box<Self>),

    /// A parenthesized group.
    Paren(Box<Self>),

    /// Results must NOT match the inner expression.
    Exclude(Box<Self>),
}

impl Node {
    /// Creates a bare word leaf.
    pub fn word(text: impl Into<String>) -> Self {
        Self::Word {
            text: text.into(),
            multi: false,
        }
    }

    /// Creates a quoted phrase leaf.
    pub fn phrase(text: impl Into<String>) -> Self {
        Self::Word {
            text: text.into(),
            multi: true,
        }
    }

    /// Creates a conjunction.
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Creates a disjunction.
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Creates a parenthesized group.
    pub fn paren(inner: Self) -> Self {
        Self::Paren(Box::new(inner))
    }

    /// Creates a negation.
    pub fn exclude(inner: Self) -> Self {
        Self::Exclude(Box::new(inner))
    }

    /// Returns the operator tag of this node.
    pub fn op(&self) -> Op {
        match self {
            Self::Word { .. } => Op::Word,
            Self::And(..) => Op::And,
            Self::Or(..) => Op::Or,
            Self::Paren(_) => Op::Paren,
            Self::Exclude(_) => Op::Exclude,
        }
    }

    /// Returns true if the expression can only ever exclude documents.
    ///
    /// Such an expression has no unconditionally required positive term: `-word1` is a
    /// complement, `-word1 word2` is not. A complement query usually matches far more than
    /// the user intended, so callers may want to reject or warn about it.
    pub fn is_complement(&self) -> bool {
        match self {
            Self::Word { .. } => false,
            Self::Exclude(_) => true,
            Self::Paren(inner) => inner.is_complement(),
            Self::Or(left, right) => left.is_complement() || right.is_complement(),
            Self::And(left, right) => left.is_complement() && right.is_complement(),
        }
    }

    /// Returns the word leaves in left-to-right order.
    pub fn words(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_words(&mut out);
        out
    }

    /// Appends this subtree's word leaves to `out`.
    fn collect_words<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Word { text, .. } => out.push(text),
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_words(out);
                right.collect_words(out);
            }
            Self::Paren(inner) | Self::Exclude(inner) => inner.collect_words(out),
        }
    }

    /// Returns the number of word leaves.
    pub fn word_count(&self) -> usize {
        match self {
            Self::Word { .. } => 1,
            Self::And(left, right) | Self::Or(left, right) => {
                left.word_count() + right.word_count()
            }
            Self::Paren(inner) | Self::Exclude(inner) => inner.word_count(),
        }
    }

    /// Formats the expression as a search line.
    ///
    /// Quotes and backslashes inside words are escaped, so parsing the output of a tree that
    /// came from the parser yields the same tree again.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Word { text, multi: false } => escape(text),
            Self::Word { text, multi: true } => format!("\"{}\"", escape(text)),
            Self::And(left, right) => {
                format!("{} {}", left.to_query_string(), right.to_query_string())
            }
            Self::Or(left, right) => {
                format!("{} OR {}", left.to_query_string(), right.to_query_string())
            }
            Self::Paren(inner) => format!("({})", inner.to_query_string()),
            Self::Exclude(inner) => format!("-{}", inner.to_query_string()),
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Word { text, multi: false } => writeln!(f, "{prefix}Word({text:?})"),
            Self::Word { text, multi: true } => writeln!(f, "{prefix}Phrase({text:?})"),
            Self::And(left, right) => {
                writeln!(f, "{prefix}And")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::Or(left, right) => {
                writeln!(f, "{prefix}Or")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::Paren(inner) => {
                writeln!(f, "{prefix}Paren")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::Exclude(inner) => {
                writeln!(f, "{prefix}Exclude")?;
                inner.fmt_tree(f, indent + 1)
            }
        }
    }
}

/// Escapes backslashes and double quotes so the lexer unescapes them back.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\\' || ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
