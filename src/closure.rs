//! ε-closures and ε elimination.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{
    algorithms::determinize, automaton::Builder, Automaton, Kind, Result, StateId, Symbol, Trace,
    Traced,
};

/// The states reachable from `seeds` through ε transitions only, seeds included.
pub(crate) fn closure_of<I>(adjacency: &[Vec<(Symbol, StateId)>], seeds: I) -> BTreeSet<StateId>
where
    I: IntoIterator<Item = StateId>,
{
    let mut closure = BTreeSet::new();
    let mut stack: Vec<StateId> = seeds.into_iter().collect();
    while let Some(q) = stack.pop() {
        if closure.insert(q) {
            stack.extend(
                adjacency[q]
                    .iter()
                    .filter(|(s, p)| s.is_epsilon() && !closure.contains(p))
                    .map(|(_, p)| *p),
            );
        }
    }
    closure
}

/// The ε-closure of a single state.
pub fn epsilon_closure(aut: &Automaton, state: StateId) -> BTreeSet<StateId> {
    closure_of(&aut.adjacency(), [state])
}

/// Removes all ε transitions. Every state is kept; a state becomes final if its closure
/// contains a final state, and `p --a--> q` exists iff `q` lies in the closure of a state
/// reached by one `a` step from the closure of `p`. The result is an NFA over the same
/// alphabet. Automata without ε transitions are valid input, elimination is then a copy.
pub fn eliminate_epsilon(aut: &Automaton) -> Traced<Automaton> {
    let mut trace = Trace::new();
    let adjacency = aut.adjacency();
    let closures = (0..aut.size())
        .map(|q| closure_of(&adjacency, [q]))
        .collect_vec();
    for (q, closure) in closures.iter().enumerate() {
        trace.step(format!(
            "closure({}) = {{{}}}",
            aut.state_name(q),
            closure.iter().map(|p| aut.state_name(*p)).sorted().join(", ")
        ));
    }

    let mut builder = Builder::new(
        format!("{}_without_epsilon", aut.name()),
        Kind::Nfa,
        aut.alphabet().to_vec(),
    );
    for (q, state) in aut.states().iter().enumerate() {
        let accepting = closures[q].iter().any(|p| aut.states()[*p].is_final());
        builder.add_state(state.name(), state.is_initial(), accepting);
    }

    for (q, closure) in closures.iter().enumerate() {
        for &c in aut.alphabet() {
            let targets: BTreeSet<StateId> = closure
                .iter()
                .flat_map(|p| {
                    adjacency[*p]
                        .iter()
                        .filter(|(s, _)| *s == Symbol::Letter(c))
                        .flat_map(|(_, r)| closures[*r].iter().copied())
                })
                .collect();
            for target in targets {
                builder.add_transition(q, Symbol::Letter(c), target);
            }
        }
    }

    let result = builder.finish();
    trace.step(format!(
        "rebuilt {} transitions without {}",
        result.transitions().len(),
        crate::EPSILON
    ));
    trace.finish(result)
}

/// ε elimination followed by subset construction; the intermediate NFA is discarded.
pub fn eliminate_epsilon_and_determinize(aut: &Automaton) -> Result<Traced<Automaton>> {
    let (nfa, mut trace) = eliminate_epsilon(aut).into_parts();
    let (dfa, inner) = determinize(&nfa)?.into_parts();
    trace.nest(inner);
    Ok(trace.finish(dfa.renamed(format!("{}_determinized", aut.name()))))
}
