use crate::{automaton::Builder, Automaton, Kind, Result, State, Symbol, Trace, Traced};

use super::{embed, merged_alphabet};

/// Accepts the words accepted by `left` or by `right`.
///
/// The states of `left` are renamed `A_x`, those of `right` `B_x`. A fresh initial state
/// `q_init` is linked by ε to the initial states of both operands, which lose their initial
/// flag. The alphabet is the union of both alphabets.
pub fn union(left: &Automaton, right: &Automaton) -> Result<Traced<Automaton>> {
    let mut trace = Trace::new();
    let mut builder = Builder::new(
        format!("{}_or_{}", left.name(), right.name()),
        Kind::EpsilonNfa,
        merged_alphabet(left, right),
    );

    let a = embed(&mut builder, left, |q| format!("A_{q}"), |_| false, State::is_final);
    trace.step(format!("copied {} states of {} as A_*", left.size(), left.name()));
    let b = embed(&mut builder, right, |q| format!("B_{q}"), |_| false, State::is_final);
    trace.step(format!("copied {} states of {} as B_*", right.size(), right.name()));

    let init = builder.add_fresh_state("q_init", true, false);
    for q in left.initial_states().map(|q| a[q]).chain(right.initial_states().map(|q| b[q])) {
        builder.add_transition(init, Symbol::Epsilon, q);
    }
    trace.step(format!(
        "added initial state with {} transitions to the former initial states",
        crate::EPSILON
    ));

    let kind = Kind::nondeterministic(builder.has_epsilon());
    builder.set_kind(kind);
    Ok(trace.finish(builder.finish()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::tests::{ends_in_b, even_as, words};

    #[test]
    #[traced_test]
    fn union_of_dfas() {
        let (a, b) = (even_as(), ends_in_b());
        let u = union(&a, &b).unwrap();
        assert!(!u.steps.is_empty());
        let u = u.into_value();
        assert_eq!(u.kind(), Kind::EpsilonNfa);
        assert_eq!(u.size(), a.size() + b.size() + 1);
        assert!(u.state_id("A_e").is_some());
        assert!(u.state_id("B_y").is_some());
        assert_eq!(u.initial_states().count(), 1);
        for w in words(&['a', 'b'], 5) {
            assert_eq!(u.accepts(&w), a.accepts(&w) || b.accepts(&w), "{w}");
        }
    }

    #[test]
    fn union_merges_alphabets() {
        let a = Automaton::from_parts(
            "x",
            Kind::Nfa,
            ['x'],
            [("p", true, true)],
            [("p", Symbol::Letter('x'), "p")],
        )
        .unwrap();
        let u = union(&a, &even_as()).unwrap().into_value();
        assert_eq!(u.alphabet(), &['x', 'a', 'b']);
        assert!(u.accepts("xx"));
        assert!(u.accepts("aa"));
        assert!(!u.accepts("xa"));
    }

    #[test]
    fn operand_without_initial_state_contributes_nothing() {
        let lost = Automaton::from_parts(
            "lost",
            Kind::Nfa,
            ['a', 'b'],
            [("p", false, true)],
            [("p", Symbol::Letter('a'), "p")],
        )
        .unwrap();
        let u = union(&lost, &ends_in_b()).unwrap().into_value();
        assert!(u.accepts("ab"));
        assert!(!u.accepts(""));
        assert!(!u.accepts("a"));
    }
}
