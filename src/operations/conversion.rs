use crate::{automaton::Builder, Automaton, Error, Kind, Result, State, Symbol, Trace, Traced};

use super::embed;

/// Relabels a DFA as an NFA, states and transitions are copied unchanged.
pub fn to_nfa(aut: &Automaton) -> Result<Traced<Automaton>> {
    aut.require_dfa("conversion to NFA")?;
    let mut trace = Trace::new();
    let mut builder = Builder::new(format!("{}_nfa", aut.name()), Kind::Nfa, aut.alphabet().to_vec());
    embed(&mut builder, aut, str::to_string, State::is_initial, State::is_final);
    trace.step(format!("relabelled {} as NFA", aut.name()));
    Ok(trace.finish(builder.finish()))
}

/// Turns a DFA or NFA into an epsilon automaton with a single fresh initial state `q_init`
/// that has ε transitions to every former initial state.
pub fn to_epsilon_nfa(aut: &Automaton) -> Result<Traced<Automaton>> {
    if aut.kind() == Kind::EpsilonNfa {
        return Err(Error::precondition(aut, "conversion to EpsilonNFA", "a DFA or an NFA"));
    }
    let mut trace = Trace::new();
    let mut builder = Builder::new(
        format!("{}_enfa", aut.name()),
        Kind::EpsilonNfa,
        aut.alphabet().to_vec(),
    );
    let map = embed(&mut builder, aut, str::to_string, |_| false, State::is_final);
    let init = builder.add_fresh_state("q_init", true, false);
    for q in aut.initial_states() {
        builder.add_transition(init, Symbol::Epsilon, map[q]);
        trace.step(format!(
            "{} --{}--> {}",
            builder.state_name(init),
            crate::EPSILON,
            aut.state_name(q)
        ));
    }
    Ok(trace.finish(builder.finish()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::{assert_same_language, even_as};

    #[test]
    fn conversions_keep_the_language() {
        let a = even_as();
        let n = to_nfa(&a).unwrap().into_value();
        assert_eq!(n.kind(), Kind::Nfa);
        assert_same_language(&a, &n, &['a', 'b'], 5);

        let e = to_epsilon_nfa(&n).unwrap().into_value();
        assert_eq!(e.kind(), Kind::EpsilonNfa);
        assert_eq!(e.size(), a.size() + 1);
        assert_eq!(e.initial_states().count(), 1);
        assert_same_language(&a, &e, &['a', 'b'], 5);
    }

    #[test]
    fn preconditions() {
        let e = to_epsilon_nfa(&even_as()).unwrap().into_value();
        assert!(matches!(to_epsilon_nfa(&e), Err(Error::PreconditionViolation { .. })));
        assert!(matches!(to_nfa(&e), Err(Error::PreconditionViolation { .. })));
    }
}
