//! Finite automaton algebra and regular expression compilation.
//!
//! The crate works on plain [`Automaton`] values. Every transformation reads its operands and
//! allocates a fresh result, so nothing a caller holds is ever mutated. Regular expressions are
//! compiled into automata by [`regex::thompson`] and [`regex::glushkov`], and automata are turned
//! back into expressions by [`extract::by_elimination`] and [`extract::by_equations`].
#![warn(missing_docs)]

mod error;
pub use error::{Error, ParseError, ParseErrorKind, Result};

pub mod automaton;
pub use automaton::{Automaton, Kind, State, StateId, Symbol, Transition, EPSILON};

mod trace;
pub use trace::{Trace, Traced};

pub mod reachability;

pub mod closure;

pub mod operations;

pub mod algorithms;

pub mod regex;
pub use regex::Expression;

pub mod extract;

/// Hash map used throughout the crate.
#[cfg(feature = "ahash")]
pub type Map<K, V> = ahash::HashMap<K, V>;
/// Hash set used throughout the crate.
#[cfg(feature = "ahash")]
pub type Set<S> = ahash::HashSet<S>;

/// Hash map used throughout the crate.
#[cfg(not(feature = "ahash"))]
pub type Map<K, V> = std::collections::HashMap<K, V>;
/// Hash set used throughout the crate.
#[cfg(not(feature = "ahash"))]
pub type Set<S> = std::collections::HashSet<S>;

/// Commonly used items, glob-import them with `use fa_algebra::prelude::*`.
pub mod prelude {
    pub use crate::{
        algorithms::{canonicalize, determinize, minimize},
        closure::{eliminate_epsilon, eliminate_epsilon_and_determinize, epsilon_closure},
        extract::{by_elimination, by_equations, EquationSolver, EquationSystem},
        operations::*,
        reachability::{accessible, co_accessible, prune, useful},
        regex::{glushkov, thompson},
        Automaton, Error, Expression, Kind, Result, State, StateId, Symbol, Transition, Traced,
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use itertools::Itertools;

    use crate::{Automaton, Kind, Symbol};

    /// All words over `alphabet` of length at most `max_len`, shortest first.
    pub fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
        (0..=max_len)
            .flat_map(|len| {
                itertools::repeat_n(alphabet.iter().copied(), len)
                    .multi_cartesian_product()
                    .map(|w| w.into_iter().collect::<String>())
            })
            .collect()
    }

    /// Asserts that both automata agree on every word over `alphabet` up to `max_len`.
    pub fn assert_same_language(left: &Automaton, right: &Automaton, alphabet: &[char], max_len: usize) {
        for word in words(alphabet, max_len) {
            assert_eq!(
                left.accepts(&word),
                right.accepts(&word),
                "`{}` and `{}` disagree on {:?}",
                left.name(),
                right.name(),
                word
            );
        }
    }

    /// The words of length at most `max_len` accepted by `aut`.
    pub fn language(aut: &Automaton, max_len: usize) -> Vec<String> {
        words(aut.alphabet(), max_len)
            .into_iter()
            .filter(|w| aut.accepts(w))
            .collect()
    }

    /// Complete DFA over `{a, b}` accepting words with an even number of `a`s.
    pub fn even_as() -> Automaton {
        Automaton::from_parts(
            "even_a",
            Kind::Dfa,
            ['a', 'b'],
            [("e", true, true), ("o", false, false)],
            [
                ("e", Symbol::Letter('a'), "o"),
                ("e", Symbol::Letter('b'), "e"),
                ("o", Symbol::Letter('a'), "e"),
                ("o", Symbol::Letter('b'), "o"),
            ],
        )
        .unwrap()
    }

    /// Complete DFA over `{a, b}` accepting words that end in `b`.
    pub fn ends_in_b() -> Automaton {
        Automaton::from_parts(
            "ends_b",
            Kind::Dfa,
            ['a', 'b'],
            [("n", true, false), ("y", false, true)],
            [
                ("n", Symbol::Letter('a'), "n"),
                ("n", Symbol::Letter('b'), "y"),
                ("y", Symbol::Letter('a'), "n"),
                ("y", Symbol::Letter('b'), "y"),
            ],
        )
        .unwrap()
    }

    /// The six state DFA from the Wikipedia article on DFA minimization, relabelled over `{a, b}`.
    /// It accepts the words containing exactly one `b` and minimizes to three states.
    pub fn wiki_dfa() -> Automaton {
        Automaton::from_parts(
            "wiki",
            Kind::Dfa,
            ['a', 'b'],
            [
                ("a", true, false),
                ("b", false, false),
                ("c", false, true),
                ("d", false, true),
                ("e", false, true),
                ("f", false, false),
            ],
            [
                ("a", Symbol::Letter('a'), "b"),
                ("a", Symbol::Letter('b'), "c"),
                ("b", Symbol::Letter('a'), "a"),
                ("b", Symbol::Letter('b'), "d"),
                ("c", Symbol::Letter('a'), "e"),
                ("c", Symbol::Letter('b'), "f"),
                ("d", Symbol::Letter('a'), "e"),
                ("d", Symbol::Letter('b'), "f"),
                ("e", Symbol::Letter('a'), "e"),
                ("e", Symbol::Letter('b'), "f"),
                ("f", Symbol::Letter('a'), "f"),
                ("f", Symbol::Letter('b'), "f"),
            ],
        )
        .unwrap()
    }
}
