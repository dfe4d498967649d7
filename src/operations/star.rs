use itertools::Itertools;

use crate::{automaton::Builder, Automaton, Kind, Result, State, Symbol, Trace, Traced};

use super::embed;

/// Kleene star. A fresh state `q_star`, both initial and final, is linked by ε to every former
/// initial state, and every final state gets ε transitions back to every former initial state.
pub fn star(aut: &Automaton) -> Result<Traced<Automaton>> {
    let mut trace = Trace::new();
    let mut builder = Builder::new(format!("{}_star", aut.name()), Kind::EpsilonNfa, aut.alphabet().to_vec());
    let map = embed(&mut builder, aut, str::to_string, |_| false, State::is_final);
    let initials = aut.initial_states().map(|q| map[q]).collect_vec();

    let start = builder.add_fresh_state("q_star", true, true);
    for &i in &initials {
        builder.add_transition(start, Symbol::Epsilon, i);
    }
    trace.step(format!(
        "added {} as initial and final state",
        builder.state_name(start)
    ));

    for f in aut.final_states() {
        for &i in &initials {
            builder.add_transition(map[f], Symbol::Epsilon, i);
        }
    }
    trace.step(format!(
        "linked {} final states back to {} initial states",
        aut.final_states().count(),
        initials.len()
    ));

    let kind = Kind::nondeterministic(builder.has_epsilon());
    builder.set_kind(kind);
    Ok(trace.finish(builder.finish()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::{ends_in_b, words};

    #[test]
    fn star_accepts_repetitions() {
        // exactly the word "ab"
        let ab = Automaton::from_parts(
            "ab",
            Kind::Dfa,
            ['a', 'b'],
            [("0", true, false), ("1", false, false), ("2", false, true)],
            [("0", Symbol::Letter('a'), "1"), ("1", Symbol::Letter('b'), "2")],
        )
        .unwrap();
        let s = star(&ab).unwrap().into_value();
        assert_eq!(s.kind(), Kind::EpsilonNfa);
        assert_eq!(s.size(), 4);
        for w in words(&['a', 'b'], 6) {
            let expected = w.len() % 2 == 0 && w.as_bytes().chunks(2).all(|c| c == b"ab");
            assert_eq!(s.accepts(&w), expected, "{w}");
        }
    }

    #[test]
    fn star_of_star_free_language() {
        let a = ends_in_b();
        let s = star(&a).unwrap().into_value();
        assert!(s.accepts(""));
        assert!(s.accepts("abb"));
        assert!(!s.accepts("ba"));
    }
}
