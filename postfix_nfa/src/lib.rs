//! Postfix Thompson NFA
//!
//! A small regular expression engine in three stages:
//!
//! 1. [`to_postfix`] converts an infix pattern to postfix with the
//!    shunting-yard algorithm.
//! 2. [`Compiler`] builds a Thompson NFA from the postfix sequence.
//! 3. [`Matcher`] simulates every active state in parallel while reading the
//!    subject one symbol at a time.
//!
//! The pattern syntax has symbols, parentheses and four operators:
//! explicit concatenation `.`, alternation `|`, zero-or-more `*` and
//! one-or-more `+`. Concatenation is never implied, so `ab` must be written
//! `a.b`. Matches are anchored at both ends of the subject.
//!
//! ```
//! assert!(postfix_nfa::is_match("a.(b|d).c*", "abccc").unwrap());
//! assert!(!postfix_nfa::is_match("a.(b|d).c*", "abbc").unwrap());
//! assert_eq!(postfix_nfa::to_postfix("a.(b|d).c*").unwrap().to_string(), "abd|.c*.");
//! ```
//!
//! # Operator precedence
//!
//! From tightest to loosest: `*` (50), `.` (40), `+` (35), `|` (30). Because
//! `+` ranks below `.`, `a.b+` means `(a.b)+`. All operators are
//! left-associative.
//!
//! # Crate features
//!
//! * **logging** (enabled by default) - emits `log` messages about postfix
//!   production, compilation and every simulation step.

#[macro_use]
mod macros;

pub mod compiler;
pub mod error;
pub mod matcher;
pub mod nfa;
pub mod postfix;

pub use compiler::{Compiler, Config, PlusSemantics};
pub use error::{Error, Malformed, Result};
pub use matcher::Matcher;
pub use nfa::{Fragment, Nfa, State, StateId};
pub use postfix::{precedence, to_postfix, Postfix, Token};

/// Compile a postfix sequence with the default configuration.
pub fn compile(postfix: &Postfix) -> Result<Nfa> {
    Compiler::new().compile(postfix)
}

/// Whether `subject` is entirely matched by `nfa`.
pub fn matches(nfa: &Nfa, subject: &str) -> bool {
    Matcher::new(nfa).is_match(subject)
}

/// Convert, compile and match in one go.
///
/// Every call builds a fresh automaton; nothing is cached between calls.
pub fn is_match(pattern: &str, subject: &str) -> Result<bool> {
    is_match_with(Config::default(), pattern, subject)
}

/// Like [`is_match`], with an explicit compiler configuration.
pub fn is_match_with(config: Config, pattern: &str, subject: &str) -> Result<bool> {
    let postfix = to_postfix(pattern)?;
    let nfa = Compiler::with_config(config).compile(&postfix)?;
    Ok(matches(&nfa, subject))
}
