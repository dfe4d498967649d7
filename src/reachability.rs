//! Accessible, co-accessible and useful states, and pruning down to the useful part.

use std::collections::{BTreeSet, VecDeque};

use itertools::Itertools;

use crate::{automaton::Builder, Automaton, StateId, Symbol, Trace, Traced};

/// States reachable from some initial state, following every transition (ε included).
/// Empty if there is no initial state.
pub fn accessible(aut: &Automaton) -> BTreeSet<StateId> {
    let adjacency = aut.adjacency();
    search(aut.initial_states(), |q| adjacency[q].iter().map(|(_, p)| *p).collect())
}

/// States from which some final state is reachable, found by walking transitions backwards
/// from the final states.
pub fn co_accessible(aut: &Automaton) -> BTreeSet<StateId> {
    let mut reverse = vec![Vec::new(); aut.size()];
    for t in aut.transitions() {
        reverse[t.target].push(t.source);
    }
    search(aut.final_states(), |q| reverse[q].clone())
}

/// States that are both accessible and co-accessible.
pub fn useful(aut: &Automaton) -> BTreeSet<StateId> {
    let co = co_accessible(aut);
    accessible(aut).intersection(&co).copied().collect()
}

fn search<I, F>(seeds: I, next: F) -> BTreeSet<StateId>
where
    I: IntoIterator<Item = StateId>,
    F: Fn(StateId) -> Vec<StateId>,
{
    let mut seen = BTreeSet::new();
    let mut queue: VecDeque<StateId> = seeds.into_iter().collect();
    while let Some(q) = queue.pop_front() {
        if !seen.insert(q) {
            continue;
        }
        queue.extend(next(q).into_iter().filter(|p| !seen.contains(p)));
    }
    seen
}

/// The result of [`prune`]: the trimmed automaton plus what was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pruned {
    /// The automaton restricted to its useful states.
    pub automaton: Automaton,
    /// Names of the dropped states.
    pub removed_states: Vec<String>,
    /// Dropped transitions as `(source, symbol, target)` names.
    pub removed_transitions: Vec<(String, Symbol, String)>,
}

/// Restricts `aut` to its useful states and the transitions between them. The kind and
/// alphabet are kept.
pub fn prune(aut: &Automaton) -> Traced<Pruned> {
    restrict(aut, &useful(aut), format!("{}_pruned", aut.name()))
}

/// Keeps only the states in `keep`, preserving their relative order.
pub(crate) fn restrict(aut: &Automaton, keep: &BTreeSet<StateId>, name: String) -> Traced<Pruned> {
    let mut trace = Trace::new();
    let mut builder = Builder::new(name, aut.kind(), aut.alphabet().to_vec());
    let mut map = vec![None; aut.size()];
    let mut removed_states = Vec::new();
    for (id, state) in aut.states().iter().enumerate() {
        if keep.contains(&id) {
            map[id] = Some(builder.add_state(state.name(), state.is_initial(), state.is_final()));
        } else {
            removed_states.push(state.name().to_string());
        }
    }

    let mut removed_transitions = Vec::new();
    for t in aut.transitions() {
        match (map[t.source], map[t.target]) {
            (Some(p), Some(q)) => builder.add_transition(p, t.symbol, q),
            _ => removed_transitions.push((
                aut.state_name(t.source).to_string(),
                t.symbol,
                aut.state_name(t.target).to_string(),
            )),
        }
    }

    trace.step(format!(
        "kept {} of {} states: {{{}}}",
        keep.len(),
        aut.size(),
        keep.iter().map(|q| aut.state_name(*q)).join(", ")
    ));
    if !removed_states.is_empty() {
        trace.step(format!("removed states {{{}}}", removed_states.join(", ")));
    }
    if !removed_transitions.is_empty() {
        trace.step(format!("removed {} transitions", removed_transitions.len()));
    }

    trace.finish(Pruned {
        automaton: builder.finish(),
        removed_states,
        removed_transitions,
    })
}

/// Accessible, co-accessible and useful state names of an automaton, with its pruned form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Names of the accessible states.
    pub accessible: Vec<String>,
    /// Names of the co-accessible states.
    pub co_accessible: Vec<String>,
    /// Names of the useful states.
    pub useful: Vec<String>,
    /// The automaton restricted to its useful states.
    pub pruned: Pruned,
}

/// Computes the full [`Analysis`] of `aut`.
pub fn analyse(aut: &Automaton) -> Analysis {
    let names = |set: BTreeSet<StateId>| set.into_iter().map(|q| aut.state_name(q).to_string()).collect();
    Analysis {
        accessible: names(accessible(aut)),
        co_accessible: names(co_accessible(aut)),
        useful: names(useful(aut)),
        pruned: prune(aut).into_value(),
    }
}
