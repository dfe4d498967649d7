use std::collections::VecDeque;

use itertools::Itertools;

use crate::{automaton::Builder, Automaton, Kind, Result, StateId, Traced};

use super::minimize;

/// Minimizes `dfa` and renames the states `q0`, `q1`, ... in breadth first order from the
/// initial state, visiting successors ordered by letter and then by target name. The alphabet is
/// sorted. Two DFAs with the same language over the same letters give equal results up to the
/// automaton name.
pub fn canonicalize(dfa: &Automaton) -> Result<Traced<Automaton>> {
    let (min, mut trace) = minimize(dfa)?.into_parts();
    let start = min.require_initial()?;

    let mut order: Vec<StateId> = vec![start];
    let mut position = vec![None; min.size()];
    position[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    let mut arcs = Vec::new();
    while let Some(q) = queue.pop_front() {
        let outgoing = min
            .transitions_from(q)
            .sorted_by(|s, t| {
                (s.symbol, min.state_name(s.target)).cmp(&(t.symbol, min.state_name(t.target)))
            })
            .collect_vec();
        for t in outgoing {
            if position[t.target].is_none() {
                position[t.target] = Some(order.len());
                order.push(t.target);
                queue.push_back(t.target);
            }
            arcs.push(*t);
        }
    }

    let mut alphabet = min.alphabet().to_vec();
    alphabet.sort_unstable();
    let mut builder = Builder::new(format!("{}_canonical", dfa.name()), Kind::Dfa, alphabet);
    for (i, q) in order.iter().enumerate() {
        let state = &min.states()[*q];
        builder.add_state(format!("q{i}"), state.is_initial(), state.is_final());
        trace.step(format!("q{i} := {}", state.name()));
    }
    for t in arcs {
        if let (Some(p), Some(q)) = (position[t.source], position[t.target]) {
            builder.add_transition(p, t.symbol, q);
        }
    }
    Ok(trace.finish(builder.finish()))
}
