//! Operator precedence table.
//!
//! Each token kind has a left rank, used when the token is the rightmost terminal on the
//! parser stack, and a right rank, used when it is the next input token. The parser shifts
//! while `left(stack) <= right(input)` and reduces otherwise.
//!
//! | kind    | left | right |
//! |---------|------|-------|
//! | End     | 0    | 0     |
//! | LParen  | 0    | 6     |
//! | RParen  | 6    | 0     |
//! | Word    | 6    | 6     |
//! | Or      | 4    | 3     |
//! | And     | 2    | 1     |
//! | Exclude | 5    | 5     |
//!
//! `Or` binds tighter than the implicit `And`; both associate to the left. `Exclude` is
//! right-associative so `--x` nests.

use crate::lexer::TokenKind;

impl TokenKind {
    /// Rank of the token when it is the rightmost terminal on the stack.
    pub const fn left_rank(self) -> u8 {
        match self {
            Self::End | Self::LParen => 0,
            Self::RParen | Self::Word => 6,
            Self::Or => 4,
            Self::And => 2,
            Self::Exclude => 5,
        }
    }

    /// Rank of the token when it is the next unconsumed input token.
    pub const fn right_rank(self) -> u8 {
        match self {
            Self::End | Self::RParen => 0,
            Self::LParen | Self::Word => 6,
            Self::Or => 3,
            Self::And => 1,
            Self::Exclude => 5,
        }
    }
}
