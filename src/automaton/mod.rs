//! The automaton value type shared by every other module.
//!
//! An [`Automaton`] owns its states and transitions in index addressed vectors; transitions
//! refer to states by [`StateId`], which is simply the position of the state in
//! [`Automaton::states`]. This keeps automata cheap to clone and compare and lets the
//! algorithms use plain integers as set and map keys.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use itertools::Itertools;

use crate::{Error, Result, Set};

mod builder;
pub(crate) use builder::Builder;

mod description;
mod display;

/// Index of a state inside its owning [`Automaton`].
pub type StateId = usize;

/// The printed form of the empty word.
pub const EPSILON: char = 'ε';

/// The three flavours of finite automata the crate distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// At most one initial state and at most one transition per state and symbol.
    Dfa,
    /// No determinism restriction, no ε transitions.
    Nfa,
    /// Like [`Kind::Nfa`], but ε transitions are allowed.
    EpsilonNfa,
}

impl Kind {
    /// The least permissive non-deterministic kind that can hold the given transitions.
    pub(crate) fn nondeterministic(has_epsilon: bool) -> Self {
        if has_epsilon {
            Kind::EpsilonNfa
        } else {
            Kind::Nfa
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Dfa => write!(f, "DFA"),
            Kind::Nfa => write!(f, "NFA"),
            Kind::EpsilonNfa => write!(f, "EpsilonNFA"),
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DFA" => Ok(Kind::Dfa),
            "NFA" => Ok(Kind::Nfa),
            "EPSILONNFA" | "EFA" | "ENFA" => Ok(Kind::EpsilonNfa),
            _ => Err(format!("unknown automaton kind `{s}`")),
        }
    }
}

/// A transition label: an alphabet letter or the empty word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A letter of the alphabet.
    Letter(char),
    /// The empty word, only allowed in [`Kind::EpsilonNfa`] automata.
    Epsilon,
}

impl Symbol {
    /// Returns true for [`Symbol::Epsilon`].
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The letter, if this is not ε.
    pub fn letter(&self) -> Option<char> {
        match self {
            Symbol::Letter(c) => Some(*c),
            Symbol::Epsilon => None,
        }
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        if value == EPSILON {
            Symbol::Epsilon
        } else {
            Symbol::Letter(value)
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Letter(c) => write!(f, "{c}"),
            Symbol::Epsilon => write!(f, "{EPSILON}"),
        }
    }
}

/// A state of an automaton. Names are unique within one automaton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    name: String,
    initial: bool,
    accepting: bool,
}

impl State {
    /// Creates a state.
    pub fn new<S: Into<String>>(name: S, initial: bool, accepting: bool) -> Self {
        Self {
            name: name.into(),
            initial,
            accepting,
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether runs may start here.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Whether runs may end here.
    pub fn is_final(&self) -> bool {
        self.accepting
    }
}

/// An arc `source --symbol--> target`, endpoints are indices into the owning automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition {
    /// Where the arc starts.
    pub source: StateId,
    /// The label.
    pub symbol: Symbol,
    /// Where the arc ends.
    pub target: StateId,
}

impl Transition {
    /// Creates a transition.
    pub fn new(source: StateId, symbol: Symbol, target: StateId) -> Self {
        Self {
            source,
            symbol,
            target,
        }
    }
}

/// A finite automaton: a kind, an ordered alphabet and an arena of states and transitions.
///
/// Values are immutable once built; use [`Automaton::from_parts`] or the textual description
/// format (see [`Automaton::from_description`]) to create them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    name: String,
    kind: Kind,
    alphabet: Vec<char>,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl Automaton {
    /// Builds an automaton from a flat description: states are `(name, is_initial, is_final)`
    /// triples and transitions refer to states by name.
    ///
    /// Fails with [`Error::Malformed`] if a name is duplicated or unknown, a letter is outside
    /// the alphabet, ε is used outside an epsilon automaton, or a DFA is not deterministic.
    pub fn from_parts<N, Q, A, B, I, J>(
        name: N,
        kind: Kind,
        alphabet: A,
        states: I,
        transitions: J,
    ) -> Result<Self>
    where
        N: Into<String>,
        A: IntoIterator<Item = char>,
        I: IntoIterator<Item = (Q, bool, bool)>,
        Q: Into<String>,
        J: IntoIterator<Item = (B, Symbol, B)>,
        B: AsRef<str>,
    {
        let name = name.into();
        let alphabet = alphabet.into_iter().collect_vec();
        let mut builder = Builder::new(name.clone(), kind, alphabet);
        for (state, initial, accepting) in states {
            let state = state.into();
            if builder.state_id(&state).is_some() {
                return Err(Error::malformed(&name, format!("duplicate state `{state}`")));
            }
            builder.add_state(state, initial, accepting);
        }
        for (source, symbol, target) in transitions {
            let lookup = |q: &str| {
                builder
                    .state_id(q)
                    .ok_or_else(|| Error::malformed(&name, format!("unknown state `{q}`")))
            };
            let (source, target) = (lookup(source.as_ref())?, lookup(target.as_ref())?);
            builder.add_transition(source, symbol, target);
        }
        builder.build()
    }

    pub(crate) fn from_raw(
        name: String,
        kind: Kind,
        alphabet: Vec<char>,
        states: Vec<State>,
        transitions: Vec<Transition>,
    ) -> Self {
        Self {
            name,
            kind,
            alphabet,
            states,
            transitions,
        }
    }

    /// Checks the data model invariants.
    pub(crate) fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(Error::malformed(&self.name, reason));

        let mut seen = Set::default();
        for &c in &self.alphabet {
            if c == EPSILON {
                return fail(format!("{EPSILON} cannot be part of the alphabet"));
            }
            if !seen.insert(c) {
                return fail(format!("symbol `{c}` occurs twice in the alphabet"));
            }
        }

        let mut arcs = Set::default();
        for t in &self.transitions {
            if t.source >= self.states.len() || t.target >= self.states.len() {
                return fail(format!("transition {t:?} refers to a missing state"));
            }
            match t.symbol {
                Symbol::Letter(c) if !self.alphabet.contains(&c) => {
                    return fail(format!("symbol `{c}` is not in the alphabet"));
                }
                Symbol::Epsilon if self.kind != Kind::EpsilonNfa => {
                    return fail(format!("{EPSILON} transitions require an EpsilonNFA"));
                }
                _ => {}
            }
            if self.kind == Kind::Dfa && !arcs.insert((t.source, t.symbol)) {
                return fail(format!(
                    "state `{}` has several transitions on `{}`",
                    self.states[t.source].name, t.symbol
                ));
            }
        }

        if self.kind == Kind::Dfa && self.initial_states().count() > 1 {
            return fail("a DFA has at most one initial state".to_string());
        }
        Ok(())
    }

    /// The identifying name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the same automaton under a different name.
    pub fn renamed<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// The kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The declared alphabet, in declaration order. Never contains ε.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Comma separated alphabet, as used in error messages and the description format.
    pub fn alphabet_string(&self) -> String {
        self.alphabet.iter().join(",")
    }

    /// All states, indexed by [`StateId`].
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// All transitions in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// The state with the given index.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id)
    }

    /// Looks up a state by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.iter().position(|q| q.name == name)
    }

    /// Name of the given state. Panics on an out of range index.
    pub fn state_name(&self, id: StateId) -> &str {
        &self.states[id].name
    }

    /// Indices of the initial states.
    pub fn initial_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(i, q)| q.initial.then_some(i))
    }

    /// Indices of the final states.
    pub fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(i, q)| q.accepting.then_some(i))
    }

    /// Transitions leaving `state`.
    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter().filter(move |t| t.source == state)
    }

    /// Targets reached from `state` by a single `symbol` transition.
    pub fn successors(&self, state: StateId, symbol: Symbol) -> impl Iterator<Item = StateId> + '_ {
        self.transitions_from(state)
            .filter(move |t| t.symbol == symbol)
            .map(|t| t.target)
    }

    /// For every state the list of outgoing `(symbol, target)` pairs.
    pub(crate) fn adjacency(&self) -> Vec<Vec<(Symbol, StateId)>> {
        let mut out = vec![Vec::new(); self.states.len()];
        for t in &self.transitions {
            out[t.source].push((t.symbol, t.target));
        }
        out
    }

    /// Whether any transition is labelled with ε.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.iter().any(|t| t.symbol.is_epsilon())
    }

    /// Whether every state has an outgoing transition for every letter of the alphabet.
    pub fn is_complete(&self) -> bool {
        let present: Set<_> = self
            .transitions
            .iter()
            .filter_map(|t| t.symbol.letter().map(|c| (t.source, c)))
            .collect();
        (0..self.size()).all(|q| self.alphabet.iter().all(|c| present.contains(&(q, *c))))
    }

    /// Structural determinism: no ε arcs, at most one initial state, at most one arc per
    /// state and letter. Independent of the declared [`Kind`].
    pub fn is_deterministic(&self) -> bool {
        let mut arcs = Set::default();
        !self.has_epsilon_transitions()
            && self.initial_states().count() <= 1
            && self.transitions.iter().all(|t| arcs.insert((t.source, t.symbol)))
    }

    /// Decides membership of `word` by simulating the automaton on sets of states, following
    /// ε transitions. Characters outside the alphabet are rejected.
    pub fn accepts(&self, word: &str) -> bool {
        let adjacency = self.adjacency();
        let mut current: BTreeSet<StateId> =
            crate::closure::closure_of(&adjacency, self.initial_states());
        for c in word.chars() {
            if !self.alphabet.contains(&c) {
                return false;
            }
            let step = current.iter().flat_map(|&q| {
                adjacency[q]
                    .iter()
                    .filter(|(s, _)| *s == Symbol::Letter(c))
                    .map(|(_, p)| *p)
            });
            current = crate::closure::closure_of(&adjacency, step);
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|&q| self.states[q].accepting)
    }

    /// Fails with [`Error::PreconditionViolation`] unless the kind is [`Kind::Dfa`].
    pub(crate) fn require_dfa(&self, operation: &'static str) -> Result<()> {
        if self.kind != Kind::Dfa {
            return Err(Error::precondition(self, operation, "a DFA"));
        }
        Ok(())
    }

    /// Fails with [`Error::AlphabetMismatch`] unless both declared alphabets hold the same
    /// letters.
    pub(crate) fn require_same_alphabet(&self, other: &Automaton) -> Result<()> {
        let left: BTreeSet<_> = self.alphabet.iter().collect();
        let right: BTreeSet<_> = other.alphabet.iter().collect();
        if left != right {
            return Err(Error::AlphabetMismatch {
                left: self.name.clone(),
                left_alphabet: self.alphabet_string(),
                right: other.name.clone(),
                right_alphabet: other.alphabet_string(),
            });
        }
        Ok(())
    }

    /// The first initial state, or [`Error::NoInitialState`].
    pub(crate) fn require_initial(&self) -> Result<StateId> {
        self.initial_states()
            .next()
            .ok_or_else(|| Error::NoInitialState(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::even_as;

    #[test]
    fn from_parts_resolves_names() {
        let aut = even_as();
        assert_eq!(aut.size(), 2);
        assert_eq!(aut.initial_states().collect_vec(), vec![0]);
        assert_eq!(aut.final_states().collect_vec(), vec![0]);
        assert_eq!(aut.successors(0, Symbol::Letter('a')).collect_vec(), vec![1]);
        assert!(aut.is_complete());
        assert!(aut.is_deterministic());
    }

    #[test]
    fn acceptance() {
        let aut = even_as();
        for w in ["", "b", "aa", "abab", "bbaab"] {
            assert!(aut.accepts(w), "should accept {w}");
        }
        for w in ["a", "ab", "aaa", "c"] {
            assert!(!aut.accepts(w), "should reject {w}");
        }
    }

    #[test]
    fn acceptance_follows_epsilon() {
        let aut = Automaton::from_parts(
            "eps",
            Kind::EpsilonNfa,
            ['a'],
            [("0", true, false), ("1", false, false), ("2", false, true)],
            [("0", Symbol::Epsilon, "1"), ("1", Symbol::Letter('a'), "2"), ("2", Symbol::Epsilon, "0")],
        )
        .unwrap();
        assert!(aut.accepts("a"));
        assert!(aut.accepts("aaa"));
        assert!(!aut.accepts(""));
    }

    #[test]
    fn rejects_malformed_parts() {
        let dup = Automaton::from_parts(
            "dup",
            Kind::Nfa,
            ['a'],
            [("p", true, false), ("p", false, true)],
            Vec::<(&str, Symbol, &str)>::new(),
        );
        assert!(matches!(dup, Err(Error::Malformed { .. })));

        let unknown = Automaton::from_parts(
            "unknown",
            Kind::Nfa,
            ['a'],
            [("p", true, false)],
            [("p", Symbol::Letter('a'), "q")],
        );
        assert!(matches!(unknown, Err(Error::Malformed { .. })));

        let epsilon = Automaton::from_parts(
            "eps",
            Kind::Nfa,
            ['a'],
            [("p", true, false)],
            [("p", Symbol::Epsilon, "p")],
        );
        assert!(matches!(epsilon, Err(Error::Malformed { .. })));

        let nondet = Automaton::from_parts(
            "nd",
            Kind::Dfa,
            ['a'],
            [("p", true, false), ("q", false, true)],
            [("p", Symbol::Letter('a'), "p"), ("p", Symbol::Letter('a'), "q")],
        );
        assert!(matches!(nondet, Err(Error::Malformed { .. })));

        let letter = Automaton::from_parts(
            "letter",
            Kind::Dfa,
            ['a'],
            [("p", true, false)],
            [("p", Symbol::Letter('z'), "p")],
        );
        assert!(matches!(letter, Err(Error::Malformed { .. })));
    }

    #[test]
    fn kinds_parse_leniently() {
        assert_eq!("dfa".parse::<Kind>(), Ok(Kind::Dfa));
        assert_eq!("EFA".parse::<Kind>(), Ok(Kind::EpsilonNfa));
        assert_eq!(Kind::EpsilonNfa.to_string(), "EpsilonNFA");
        assert!("pda".parse::<Kind>().is_err());
    }
}
