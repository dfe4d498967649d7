use crate::{Automaton, Kind, Map, Result, Set, State, StateId, Symbol, Transition};

/// Incrementally assembles a new [`Automaton`]. Every transformation builds its result in a
/// local `Builder` and only hands out the finished value, so no partial automaton escapes.
///
/// Adding a transition that already exists is a no-op.
#[derive(Debug, Clone)]
pub(crate) struct Builder {
    name: String,
    kind: Kind,
    alphabet: Vec<char>,
    states: Vec<State>,
    names: Map<String, StateId>,
    transitions: Vec<Transition>,
    seen: Set<Transition>,
}

impl Builder {
    pub fn new<S: Into<String>>(name: S, kind: Kind, alphabet: Vec<char>) -> Self {
        Self {
            name: name.into(),
            kind,
            alphabet,
            states: Vec::new(),
            names: Map::default(),
            transitions: Vec::new(),
            seen: Set::default(),
        }
    }

    pub fn add_state<S: Into<String>>(&mut self, name: S, initial: bool, accepting: bool) -> StateId {
        let name = name.into();
        let id = self.states.len();
        self.names.insert(name.clone(), id);
        self.states.push(State::new(name, initial, accepting));
        id
    }

    /// Adds a state under `base`, or the first of `base'`, `base''`, ... that is still free.
    pub fn add_fresh_state(&mut self, base: &str, initial: bool, accepting: bool) -> StateId {
        let mut name = base.to_string();
        while self.names.contains_key(&name) {
            name.push('\'');
        }
        self.add_state(name, initial, accepting)
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    pub fn state_name(&self, id: StateId) -> &str {
        self.states[id].name()
    }

    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, target: StateId) {
        let t = Transition::new(source, symbol, target);
        if self.seen.insert(t) {
            self.transitions.push(t);
        }
    }

    pub fn set_initial(&mut self, state: StateId, initial: bool) {
        self.states[state].initial = initial;
    }

    pub fn set_final(&mut self, state: StateId, accepting: bool) {
        self.states[state].accepting = accepting;
    }

    pub fn has_epsilon(&self) -> bool {
        self.transitions.iter().any(|t| t.symbol.is_epsilon())
    }

    pub fn set_kind(&mut self, kind: Kind) {
        self.kind = kind;
    }

    /// Validates the invariants and returns the automaton.
    pub fn build(self) -> Result<Automaton> {
        let aut = self.assemble();
        aut.validate()?;
        Ok(aut)
    }

    /// Returns the automaton without validation, for constructions whose output is valid by
    /// construction. Debug builds still check.
    pub fn finish(self) -> Automaton {
        let aut = self.assemble();
        debug_assert!(aut.validate().is_ok(), "{:?}", aut.validate());
        aut
    }

    fn assemble(self) -> Automaton {
        Automaton::from_raw(
            self.name,
            self.kind,
            self.alphabet,
            self.states,
            self.transitions,
        )
    }
}
