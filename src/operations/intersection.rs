use itertools::Itertools;

use crate::{automaton::Builder, Automaton, Kind, Result, Symbol, Trace, Traced};

use super::merged_alphabet;

/// Product construction: accepts the words accepted by both `left` and `right`.
///
/// Every pair of states becomes a state named `p_q`, initial (final) iff both components are.
/// A pair moves on a letter iff both components do. ε transitions of either operand are taken
/// by that component alone, so epsilon automata are intersected correctly too.
///
/// The result is a DFA iff both operands are; otherwise it is an NFA, or an epsilon automaton if
/// an operand contributed ε transitions.
pub fn intersection(left: &Automaton, right: &Automaton) -> Result<Traced<Automaton>> {
    let mut trace = Trace::new();
    let mut builder = Builder::new(
        format!("{}_and_{}", left.name(), right.name()),
        Kind::Nfa,
        merged_alphabet(left, right),
    );

    let width = right.size();
    let pair = |p: usize, q: usize| p * width + q;
    for (p, q) in left.states().iter().cartesian_product(right.states()) {
        builder.add_fresh_state(
            &format!("{}_{}", p.name(), q.name()),
            p.is_initial() && q.is_initial(),
            p.is_final() && q.is_final(),
        );
    }
    trace.step(format!(
        "built {} x {} product states",
        left.size(),
        right.size()
    ));

    let (ladj, radj) = (left.adjacency(), right.adjacency());
    for p in 0..left.size() {
        for q in 0..right.size() {
            for (s, p2) in &ladj[p] {
                match s {
                    Symbol::Epsilon => builder.add_transition(pair(p, q), *s, pair(*p2, q)),
                    Symbol::Letter(_) => {
                        for (_, q2) in radj[q].iter().filter(|(r, _)| r == s) {
                            builder.add_transition(pair(p, q), *s, pair(*p2, *q2));
                        }
                    }
                }
            }
            for (_, q2) in radj[q].iter().filter(|(s, _)| s.is_epsilon()) {
                builder.add_transition(pair(p, q), Symbol::Epsilon, pair(p, *q2));
            }
        }
    }

    let kind = if left.kind() == Kind::Dfa && right.kind() == Kind::Dfa {
        Kind::Dfa
    } else {
        Kind::nondeterministic(builder.has_epsilon())
    };
    builder.set_kind(kind);
    let result = builder.finish();
    trace.step(format!(
        "kept {} synchronised transitions, result is {kind}",
        result.transitions().len()
    ));
    Ok(trace.finish(result))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::tests::{ends_in_b, even_as, words};

    #[test]
    #[traced_test]
    fn product_of_dfas() {
        let (a, b) = (even_as(), ends_in_b());
        let i = intersection(&a, &b).unwrap().into_value();
        assert_eq!(i.kind(), Kind::Dfa);
        assert_eq!(i.size(), 4);
        assert_eq!(i.state_id("e_n"), Some(0));
        assert_eq!(i.initial_states().collect_vec(), vec![0]);
        assert!(i.is_deterministic());
        for w in words(&['a', 'b'], 6) {
            assert_eq!(i.accepts(&w), a.accepts(&w) && b.accepts(&w), "{w}");
        }
    }

    #[test]
    fn product_follows_epsilon_moves() {
        // a* with an ε detour
        let eps = Automaton::from_parts(
            "eps",
            Kind::EpsilonNfa,
            ['a', 'b'],
            [("s", true, false), ("t", false, true)],
            [("s", Symbol::Epsilon, "t"), ("t", Symbol::Letter('a'), "s")],
        )
        .unwrap();
        let i = intersection(&eps, &even_as()).unwrap().into_value();
        assert_eq!(i.kind(), Kind::EpsilonNfa);
        for w in words(&['a', 'b'], 6) {
            assert_eq!(i.accepts(&w), eps.accepts(&w) && even_as().accepts(&w), "{w}");
        }
    }
}
