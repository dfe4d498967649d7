use itertools::Itertools;

use crate::{
    automaton::Builder, reachability, Automaton, Kind, Map, Result, StateId, Symbol, Trace,
    Traced,
};

/// Splits the states of a DFA into classes of equivalent states.
///
/// Starts from the split into non-final and final states and refines by signature: two states
/// stay together iff they were in the same class and, for every letter, their successors lie in
/// the same class (a missing successor counts as a class of its own). Classes are numbered by
/// their smallest member, and members are listed in increasing order.
pub fn partition_refinement(dfa: &Automaton) -> Vec<Vec<StateId>> {
    let classes = refine(dfa, &mut Trace::new());
    let count = classes.iter().max().map_or(0, |c| c + 1);
    let mut partition = vec![Vec::new(); count];
    for (q, c) in classes.into_iter().enumerate() {
        partition[c].push(q);
    }
    partition
}

/// The class index of every state at the fixpoint.
fn refine(dfa: &Automaton, trace: &mut Trace) -> Vec<usize> {
    let adjacency = dfa.adjacency();
    let target = |q: StateId, c: char| {
        adjacency[q]
            .iter()
            .find(|(s, _)| *s == Symbol::Letter(c))
            .map(|(_, p)| *p)
    };

    let mut classes = renumber(dfa.states().iter().map(|q| q.is_final()));
    let mut count = classes.iter().unique().count();
    for round in 1.. {
        let signatures = (0..dfa.size()).map(|q| {
            let successors = dfa
                .alphabet()
                .iter()
                .map(|c| target(q, *c).map(|p| classes[p]))
                .collect_vec();
            (classes[q], successors)
        });
        let refined = renumber(signatures);
        let refined_count = refined.iter().unique().count();
        trace.step(format!("round {round}: {refined_count} classes"));
        classes = refined;
        if refined_count == count {
            break;
        }
        count = refined_count;
    }
    classes
}

/// Numbers distinct keys by first occurrence.
fn renumber<K: std::hash::Hash + Eq>(keys: impl IntoIterator<Item = K>) -> Vec<usize> {
    let mut seen: Map<K, usize> = Map::default();
    keys.into_iter()
        .map(|k| {
            let next = seen.len();
            *seen.entry(k).or_insert(next)
        })
        .collect()
}

/// Minimizes a DFA: unreachable states are dropped, the rest is quotiented by
/// [`partition_refinement`]. A class is named by its sorted member names joined with `_`, and is
/// initial (final) iff one of its members is.
pub fn minimize(dfa: &Automaton) -> Result<Traced<Automaton>> {
    dfa.require_dfa("minimization")?;
    dfa.require_initial()?;

    let (pruned, mut trace) = reachability::restrict(
        dfa,
        &reachability::accessible(dfa),
        dfa.name().to_string(),
    )
    .into_parts();
    let reachable = pruned.automaton;

    let classes = refine(&reachable, &mut trace);
    let mut members: Vec<Vec<StateId>> = Vec::new();
    for (q, c) in classes.iter().enumerate() {
        if *c == members.len() {
            members.push(Vec::new());
        }
        members[*c].push(q);
    }

    let mut builder = Builder::new(
        format!("{}_min", dfa.name()),
        Kind::Dfa,
        dfa.alphabet().to_vec(),
    );
    for class in &members {
        let name = class
            .iter()
            .map(|q| reachable.state_name(*q))
            .sorted()
            .join("_");
        let states = class.iter().map(|q| &reachable.states()[*q]);
        let initial = states.clone().any(|q| q.is_initial());
        let accepting = states.clone().any(|q| q.is_final());
        let id = builder.add_fresh_state(&name, initial, accepting);
        if class.len() > 1 {
            trace.step(format!("merged into {}", builder.state_name(id)));
        }
    }
    for t in reachable.transitions() {
        builder.add_transition(classes[t.source], t.symbol, classes[t.target]);
    }

    let result = builder.finish();
    tracing::debug!(
        "minimized {} from {} to {} states",
        dfa.name(),
        dfa.size(),
        result.size()
    );
    Ok(trace.finish(result))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        tests::{assert_same_language, wiki_dfa},
        Error,
    };

    #[test]
    fn partition_refinement_wiki() {
        let dfa = wiki_dfa();
        let p = partition_refinement(&dfa);
        assert_eq!(p, vec![vec![0, 1], vec![2, 3, 4], vec![5]]);
    }

    #[test]
    #[traced_test]
    fn minimize_wiki() {
        let dfa = wiki_dfa();
        let min = minimize(&dfa).unwrap().into_value();
        assert_eq!(min.size(), 3);
        assert_eq!(min.state_name(0), "a_b");
        assert_eq!(min.state_name(1), "c_d_e");
        assert!(min.states()[0].is_initial());
        assert!(min.states()[1].is_final());
        assert_same_language(&dfa, &min, &['a', 'b'], 6);

        let again = minimize(&min).unwrap().into_value();
        assert_eq!(again.size(), min.size());
        assert_same_language(&again, &min, &['a', 'b'], 6);
    }

    #[test]
    fn indistinguishable_dead_states_collapse() {
        let dfa = Automaton::from_parts(
            "dead",
            Kind::Dfa,
            ['a', 'b'],
            [
                ("s", true, false),
                ("f", false, true),
                ("d1", false, false),
                ("d2", false, false),
            ],
            [
                ("s", Symbol::Letter('a'), "f"),
                ("s", Symbol::Letter('b'), "d1"),
                ("f", Symbol::Letter('a'), "d2"),
                ("f", Symbol::Letter('b'), "d2"),
                ("d1", Symbol::Letter('a'), "d1"),
                ("d1", Symbol::Letter('b'), "d1"),
                ("d2", Symbol::Letter('a'), "d2"),
                ("d2", Symbol::Letter('b'), "d2"),
            ],
        )
        .unwrap();
        let min = minimize(&dfa).unwrap().into_value();
        assert_eq!(min.size(), 3);
        assert!(min.state_id("d1_d2").is_some());
    }

    #[test]
    fn unreachable_states_are_dropped() {
        let dfa = Automaton::from_parts(
            "island",
            Kind::Dfa,
            ['a'],
            [("s", true, true), ("x", false, false)],
            [("s", Symbol::Letter('a'), "s"), ("x", Symbol::Letter('a'), "s")],
        )
        .unwrap();
        let min = minimize(&dfa).unwrap().into_value();
        assert_eq!(min.size(), 1);
        assert_eq!(min.transitions().len(), 1);
    }

    #[test]
    fn minimization_requires_a_dfa_with_initial_state() {
        let lost = Automaton::from_parts(
            "lost",
            Kind::Dfa,
            ['a'],
            [("p", false, true)],
            Vec::<(&str, Symbol, &str)>::new(),
        )
        .unwrap();
        assert_eq!(minimize(&lost), Err(Error::NoInitialState("lost".into())));
    }
}
