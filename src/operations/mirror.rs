use itertools::Itertools;

use crate::{automaton::Builder, Automaton, Kind, Result, Symbol, Trace, Traced};

/// Reverses every transition, so the result accepts the reversed words of `aut`.
///
/// Former initial states become final. A single final state becomes the only initial state;
/// with any other number of finals a fresh initial state `q_init` is added with ε transitions to
/// each of them, and the result is an epsilon automaton.
pub fn mirror(aut: &Automaton) -> Result<Traced<Automaton>> {
    let mut trace = Trace::new();
    let mut builder = Builder::new(format!("{}_mirror", aut.name()), Kind::Nfa, aut.alphabet().to_vec());
    let finals = aut.final_states().collect_vec();
    let single = match finals[..] {
        [f] => Some(f),
        _ => None,
    };
    for (id, q) in aut.states().iter().enumerate() {
        builder.add_state(q.name(), single == Some(id), q.is_initial());
    }
    for t in aut.transitions() {
        builder.add_transition(t.target, t.symbol, t.source);
    }
    trace.step(format!("reversed {} transitions", aut.transitions().len()));

    match single {
        Some(f) => trace.step(format!("{} is the new initial state", aut.state_name(f))),
        None => {
            let init = builder.add_fresh_state("q_init", true, false);
            for f in &finals {
                builder.add_transition(init, Symbol::Epsilon, *f);
            }
            trace.step(format!(
                "{} final states, added a fresh initial state",
                finals.len()
            ));
        }
    }

    let kind = Kind::nondeterministic(builder.has_epsilon());
    builder.set_kind(kind);
    Ok(trace.finish(builder.finish()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::{assert_same_language, ends_in_b, words};

    #[test]
    fn mirror_reverses_words() {
        let a = ends_in_b();
        let m = mirror(&a).unwrap().into_value();
        assert_eq!(m.kind(), Kind::Nfa);
        assert_eq!(m.size(), a.size());
        assert_eq!(m.initial_states().collect_vec(), vec![1]);
        for w in words(&['a', 'b'], 5) {
            let reversed: String = w.chars().rev().collect();
            assert_eq!(m.accepts(&w), a.accepts(&reversed), "{w}");
        }
    }

    #[test]
    fn mirror_is_an_involution() {
        let a = ends_in_b();
        let mm = mirror(&mirror(&a).unwrap().value).unwrap().into_value();
        assert_same_language(&a, &mm, &['a', 'b'], 6);
    }

    #[test]
    fn several_finals_get_a_fresh_initial_state() {
        let a = crate::tests::wiki_dfa();
        let m = mirror(&a).unwrap().into_value();
        assert_eq!(m.kind(), Kind::EpsilonNfa);
        assert_eq!(m.size(), a.size() + 1);
        assert_eq!(m.state_name(m.size() - 1), "q_init");
        assert_same_language(
            &mirror(&m).unwrap().into_value(),
            &a,
            &['a', 'b'],
            5,
        );
    }
}
