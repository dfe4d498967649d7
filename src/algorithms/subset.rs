use std::collections::{BTreeSet, VecDeque};

use itertools::Itertools;

use crate::{automaton::Builder, Automaton, Error, Kind, Map, Result, StateId, Symbol, Trace, Traced};

/// Subset construction. The operand must be an NFA with at least one initial state.
///
/// Starting from the set of all initial states, sets of states are discovered breadth first and
/// named `q0`, `q1`, ... in discovery order; a set is final iff one of its members is. Letters
/// are tried in alphabet order, and empty successor sets are not materialised, so the result
/// may be partial.
///
/// A DFA operand is refused with [`Error::NotNondeterministic`], an epsilon automaton with
/// [`Error::PreconditionViolation`] (eliminate ε first, see
/// [`eliminate_epsilon_and_determinize`](crate::closure::eliminate_epsilon_and_determinize)).
pub fn determinize(aut: &Automaton) -> Result<Traced<Automaton>> {
    match aut.kind() {
        Kind::Dfa => return Err(Error::NotNondeterministic(aut.name().to_string())),
        Kind::EpsilonNfa => {
            return Err(Error::precondition(aut, "determinization", "an NFA without ε transitions"))
        }
        Kind::Nfa => {}
    }
    aut.require_initial()?;

    let mut trace = Trace::new();
    let adjacency = aut.adjacency();
    let mut builder = Builder::new(format!("{}_dfa", aut.name()), Kind::Dfa, aut.alphabet().to_vec());
    let mut ids: Map<BTreeSet<StateId>, StateId> = Map::default();
    let mut queue = VecDeque::new();

    let mut discover = |set: BTreeSet<StateId>, builder: &mut Builder, trace: &mut Trace, initial: bool| {
        if let Some(id) = ids.get(&set) {
            return (*id, None);
        }
        let accepting = set.iter().any(|q| aut.states()[*q].is_final());
        let id = builder.add_state(format!("q{}", ids.len()), initial, accepting);
        trace.step(format!(
            "q{} = {{{}}}{}",
            id,
            set.iter().map(|q| aut.state_name(*q)).join(", "),
            if accepting { " (final)" } else { "" }
        ));
        ids.insert(set.clone(), id);
        (id, Some(set))
    };

    let start: BTreeSet<StateId> = aut.initial_states().collect();
    if let (id, Some(set)) = discover(start, &mut builder, &mut trace, true) {
        queue.push_back((id, set));
    }

    while let Some((id, set)) = queue.pop_front() {
        for &c in aut.alphabet() {
            let targets: BTreeSet<StateId> = set
                .iter()
                .flat_map(|q| {
                    adjacency[*q]
                        .iter()
                        .filter(|(s, _)| *s == Symbol::Letter(c))
                        .map(|(_, p)| *p)
                })
                .collect();
            if targets.is_empty() {
                continue;
            }
            let (target, fresh) = discover(targets, &mut builder, &mut trace, false);
            if let Some(set) = fresh {
                queue.push_back((target, set));
            }
            builder.add_transition(id, Symbol::Letter(c), target);
        }
    }

    let result = builder.finish();
    tracing::debug!(
        "determinized {} ({} states) into {} states",
        aut.name(),
        aut.size(),
        result.size()
    );
    Ok(trace.finish(result))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::tests::{assert_same_language, even_as};

    /// Words over {a, b} whose second to last letter is `a`.
    fn second_to_last_a() -> Automaton {
        Automaton::from_parts(
            "stl",
            Kind::Nfa,
            ['a', 'b'],
            [("0", true, false), ("1", false, false), ("2", false, true)],
            [
                ("0", Symbol::Letter('a'), "0"),
                ("0", Symbol::Letter('b'), "0"),
                ("0", Symbol::Letter('a'), "1"),
                ("1", Symbol::Letter('a'), "2"),
                ("1", Symbol::Letter('b'), "2"),
            ],
        )
        .unwrap()
    }

    #[test]
    #[traced_test]
    fn subset_construction() {
        let nfa = second_to_last_a();
        let traced = determinize(&nfa).unwrap();
        assert_eq!(traced.steps[0], "q0 = {0}");
        let dfa = traced.into_value();
        assert_eq!(dfa.kind(), Kind::Dfa);
        assert_eq!(dfa.size(), 4);
        assert!(dfa.is_deterministic());
        assert!(dfa.is_complete());
        assert_eq!(dfa.state_name(1), "q1");
        assert_same_language(&nfa, &dfa, &['a', 'b'], 6);
    }

    #[test]
    fn union_of_letters_has_three_states() {
        let nfa = Automaton::from_parts(
            "a_or_b",
            Kind::Nfa,
            ['a', 'b'],
            [("i", true, false), ("x", false, true), ("y", false, true)],
            [("i", Symbol::Letter('a'), "x"), ("i", Symbol::Letter('b'), "y")],
        )
        .unwrap();
        let dfa = determinize(&nfa).unwrap().into_value();
        assert_eq!(dfa.size(), 3);
        assert_eq!(dfa.transitions().len(), 2);
    }

    #[test]
    fn refuses_deterministic_and_epsilon_input() {
        assert!(matches!(determinize(&even_as()), Err(Error::NotNondeterministic(_))));

        let eps = Automaton::from_parts(
            "eps",
            Kind::EpsilonNfa,
            ['a'],
            [("p", true, true)],
            [("p", Symbol::Epsilon, "p")],
        )
        .unwrap();
        assert!(matches!(determinize(&eps), Err(Error::PreconditionViolation { .. })));

        let lost = Automaton::from_parts(
            "lost",
            Kind::Nfa,
            ['a'],
            [("p", false, true)],
            Vec::<(&str, Symbol, &str)>::new(),
        )
        .unwrap();
        assert_eq!(determinize(&lost), Err(Error::NoInitialState("lost".into())));
    }
}
