//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// Rounds below which ordinary search lines start failing as too complex. A plain word costs
/// about four rounds.
const MIN_PRACTICAL_ROUNDS: usize = 20;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The template has no recognizable parameter placeholder.
    TemplateWithoutPlaceholder {
        /// The configured template.
        template: String,
    },
    /// The round limit rejects even short search lines.
    MaxRoundsTooLow {
        /// The configured limit.
        max_rounds: usize,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateWithoutPlaceholder { template } => {
                write!(f, "template '{template}' has no parameter placeholder")
            }
            Self::MaxRoundsTooLow { max_rounds } => {
                write!(
                    f,
                    "max_rounds = {max_rounds} only allows a handful of search words"
                )
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - Templates without a `?`, `$N`, `:name` or `@name` placeholder
/// - Round limits too small for practical search lines
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let builder = &config.builder;

    if !has_placeholder(&builder.template) {
        warnings.push(ConfigWarning::TemplateWithoutPlaceholder {
            template: builder.template.clone(),
        });
    }

    if builder.max_rounds < MIN_PRACTICAL_ROUNDS {
        warnings.push(ConfigWarning::MaxRoundsTooLow {
            max_rounds: builder.max_rounds,
        });
    }

    warnings
}

/// Checks for a positional (`?`, `$1`) or named (`:name`, `@name`) placeholder.
fn has_placeholder(template: &str) -> bool {
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        let found = match ch {
            '?' => true,
            '$' => chars.peek().is_some_and(char::is_ascii_digit),
            ':' | '@' => chars
                .peek()
                .is_some_and(|next| next.is_alphabetic() || *next == '_'),
            _ => false,
        };
        if found {
            return true;
        }
    }
    false
}
