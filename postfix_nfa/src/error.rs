/// The result of converting or compiling a pattern.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a pattern into an automaton.
///
/// Once an [`Nfa`](crate::Nfa) exists, matching against it cannot fail, so
/// every error here is reported before the first subject symbol is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `)` without a matching `(`, or a `(` that is never closed.
    ///
    /// `pos` is the character offset of the offending parenthesis in the
    /// infix pattern.
    UnbalancedParentheses { pos: usize },
    /// The postfix sequence does not describe exactly one automaton.
    MalformedPattern(Malformed),
}

/// The ways a postfix sequence can fail to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// The operator `op` at postfix offset `pos` had fewer fragments
    /// available than it consumes.
    MissingOperand { op: char, pos: usize },
    /// The sequence produced no fragment at all (the empty pattern).
    Empty,
    /// More than one fragment was left once the sequence was consumed.
    Leftover { fragments: usize },
}

impl Error {
    pub fn is_unbalanced_parentheses(&self) -> bool {
        matches!(self, Error::UnbalancedParentheses { .. })
    }

    pub fn is_malformed_pattern(&self) -> bool {
        matches!(self, Error::MalformedPattern(_))
    }
}

impl From<Malformed> for Error {
    fn from(malformed: Malformed) -> Self {
        Error::MalformedPattern(malformed)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnbalancedParentheses { pos } => {
                write!(f, "unbalanced parenthesis at offset {}", pos)
            }
            Error::MalformedPattern(malformed) => write!(f, "malformed pattern: {}", malformed),
        }
    }
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::MissingOperand { op, pos } => {
                write!(f, "operator '{}' at postfix offset {} is missing an operand", op, pos)
            }
            Malformed::Empty => write!(f, "pattern is empty"),
            Malformed::Leftover { fragments } => {
                write!(f, "{} fragments left unjoined, expected exactly one", fragments)
            }
        }
    }
}

impl std::error::Error for Error {}
