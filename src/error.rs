use thiserror::Error;

/// Result type used by every fallible operation of the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong when building or transforming automata and expressions.
///
/// Errors are always raised before a result is assembled, a failed call never hands out a
/// partially built automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The operand has the wrong kind (or shape) for the requested operation.
    #[error("automaton `{automaton}` is {found} but {operation} requires {expected}")]
    PreconditionViolation {
        /// Name of the offending automaton.
        automaton: String,
        /// Operation that was refused.
        operation: &'static str,
        /// What the operation needs.
        expected: &'static str,
        /// What it got instead.
        found: String,
    },
    /// Subset construction was asked to determinize an automaton that already is a DFA.
    #[error("automaton `{0}` is already deterministic")]
    NotNondeterministic(String),
    /// A binary operation was given automata with different declared alphabets.
    #[error("alphabets of `{left}` {{{left_alphabet}}} and `{right}` {{{right_alphabet}}} differ")]
    AlphabetMismatch {
        /// Name of the left operand.
        left: String,
        /// Alphabet of the left operand.
        left_alphabet: String,
        /// Name of the right operand.
        right: String,
        /// Alphabet of the right operand.
        right_alphabet: String,
    },
    /// The automaton has no initial state.
    #[error("automaton `{0}` has no initial state")]
    NoInitialState(String),
    /// Malformed regular expression, equation system or automaton description.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The equation solver hit its iteration ceiling.
    #[error("equation solver did not converge within {0} rounds")]
    NonConvergence(usize),
    /// An equation uses a variable somewhere other than the end of a disjunct.
    #[error("equation for {variable} is not right-linear in {offending}")]
    NotRightLinear {
        /// Variable whose equation was rejected.
        variable: String,
        /// The variable that appears in a non-trailing position.
        offending: String,
    },
    /// A flat description violates the automaton invariants.
    #[error("malformed automaton `{automaton}`: {reason}")]
    Malformed {
        /// Name of the automaton being built.
        automaton: String,
        /// Which invariant was violated.
        reason: String,
    },
}

impl Error {
    pub(crate) fn precondition(
        automaton: &crate::Automaton,
        operation: &'static str,
        expected: &'static str,
    ) -> Self {
        Error::PreconditionViolation {
            automaton: automaton.name().to_string(),
            operation,
            expected,
            found: automaton.kind().to_string(),
        }
    }

    pub(crate) fn malformed(automaton: &str, reason: impl Into<String>) -> Self {
        Error::Malformed {
            automaton: automaton.to_string(),
            reason: reason.into(),
        }
    }
}

/// A syntax error, located by character position (or line, for line based inputs).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    /// Zero based character offset (or one based line number for line oriented formats).
    pub position: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }
}

/// The different kinds of syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Input was empty (after removing whitespace).
    #[error("empty input")]
    Empty,
    /// A character that is not part of the grammar.
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    /// Input ended while more was expected.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// An opening parenthesis that is never closed.
    #[error("unmatched `(`")]
    UnmatchedOpen,
    /// A closing parenthesis without matching opening one.
    #[error("unmatched `)`")]
    UnmatchedClose,
    /// An operator lacking one of its operands.
    #[error("operator `{0}` is missing an operand")]
    MissingOperand(char),
    /// A line of an equation system that is not of the form `Xi = <expression>`.
    #[error("malformed equation `{0}`")]
    MalformedEquation(String),
    /// A line of an automaton description that could not be understood.
    #[error("malformed description line `{0}`")]
    MalformedLine(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = Error::NoInitialState("A".into());
        assert_eq!(err.to_string(), "automaton `A` has no initial state");

        let err: Error = ParseError::new(3, ParseErrorKind::UnexpectedChar('#')).into();
        assert_eq!(err.to_string(), "unexpected character `#` at position 3");
    }
}
