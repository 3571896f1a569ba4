//! SQL and IBL generation from a parsed search word tree.
//!
//! The tree is folded bottom-up. Every node yields an SQL fragment, the values bound by its
//! placeholders, an IBL fragment and the hits usable for highlighting.

use wordsql_query::{Node, Op};

use crate::{
    builder::{IblConverter, ValueConverter},
    convert::split_wildcards,
};

/// Output for one subtree.
#[derive(Debug)]
pub(crate) struct Fragment<V> {
    /// Parameterized SQL boolean expression.
    pub sql: String,
    /// Values for the placeholders in `sql`, in order.
    pub values: Vec<V>,
    /// Boolean-mode full-text expression.
    pub ibl: String,
    /// Literal word parts that may appear in matching rows.
    pub hits: Vec<String>,
}

/// Folds a tree into a [`Fragment`].
pub(crate) struct Generator<'a, V> {
    /// Parenthesized template used for every word.
    pub word_sql: &'a str,
    /// Converts a word into the value bound for it.
    pub value: &'a ValueConverter<V>,
    /// Converts a word into its IBL form.
    pub ibl: &'a IblConverter,
}

impl<V> Generator<'_, V> {
    /// Generates the fragment for `node` and its subtree.
    pub fn generate(&self, node: &Node) -> Fragment<V> {
        match node {
            Node::Word { text, multi } => {
                let ibl = (self.ibl)(text);
                Fragment {
                    sql: self.word_sql.to_owned(),
                    values: vec![(self.value)(text)],
                    ibl: if *multi { format!("\"{ibl}\"") } else { ibl },
                    hits: split_wildcards(text),
                }
            }
            Node::And(left, right) => {
                let (lhs, rhs) = (self.generate(left), self.generate(right));
                let ibl = format!(
                    "{} {}",
                    add_plus_sign(left.op(), &lhs.ibl),
                    add_plus_sign(right.op(), &rhs.ibl)
                );
                join("AND", lhs, rhs, ibl)
            }
            Node::Or(left, right) => {
                let (lhs, rhs) = (self.generate(left), self.generate(right));
                let ibl = format!("({} {})", lhs.ibl, rhs.ibl);
                join("OR", lhs, rhs, ibl)
            }
            Node::Paren(inner) => {
                let inner = self.generate(inner);
                Fragment {
                    sql: format!("( {} )", inner.sql),
                    values: inner.values,
                    ibl: format!("({})", inner.ibl),
                    hits: inner.hits,
                }
            }
            Node::Exclude(inner_node) => {
                let inner = self.generate(inner_node);
                let ibl = if inner_node.op() == Op::Word {
                    format!("-{}", inner.ibl)
                } else {
                    format!("-({})", inner.ibl)
                };
                Fragment {
                    sql: format!("( not {} )", inner.sql),
                    values: inner.values,
                    ibl,
                    hits: Vec::new(),
                }
            }
        }
    }
}

/// Combines two fragments with a binary SQL operator.
fn join<V>(operator: &str, mut lhs: Fragment<V>, rhs: Fragment<V>, ibl: String) -> Fragment<V> {
    lhs.values.extend(rhs.values);
    lhs.hits.extend(rhs.hits);
    Fragment {
        sql: format!("( {} {operator} {} )", lhs.sql, rhs.sql),
        values: lhs.values,
        ibl,
        hits: lhs.hits,
    }
}

/// Marks an AND operand as required in boolean mode.
///
/// Negations already carry their sign, and a nested AND has signed its own operands.
fn add_plus_sign(op: Op, ibl: &str) -> String {
    match op {
        Op::Exclude | Op::And => ibl.to_owned(),
        Op::Word | Op::Or => format!("+{ibl}"),
        Op::Paren => format!("+({ibl})"),
    }
}
