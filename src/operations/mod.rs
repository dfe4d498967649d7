//! The automaton algebra. Every operation reads its operands and builds a fresh result, the
//! operands are never modified.

use crate::{automaton::Builder, Automaton, State, StateId};

mod union;
pub use union::union;

mod intersection;
pub use intersection::intersection;

mod complement;
pub use complement::complement;

mod concatenation;
pub use concatenation::concatenation;

mod mirror;
pub use mirror::mirror;

mod star;
pub use star::star;

mod completion;
pub use completion::complete;

mod difference;
pub use difference::difference;

mod quotient;
pub use quotient::quotient;

mod conversion;
pub use conversion::{to_epsilon_nfa, to_nfa};

/// Copies all states of `aut` into `builder`, renaming them with `rename` and deciding the
/// initial and final flags with the given predicates. Transitions are copied as well. Returns
/// the new index of every state of `aut`.
pub(crate) fn embed<R, I, F>(
    builder: &mut Builder,
    aut: &Automaton,
    rename: R,
    initial: I,
    accepting: F,
) -> Vec<StateId>
where
    R: Fn(&str) -> String,
    I: Fn(&State) -> bool,
    F: Fn(&State) -> bool,
{
    let map: Vec<StateId> = aut
        .states()
        .iter()
        .map(|q| builder.add_state(rename(q.name()), initial(q), accepting(q)))
        .collect();
    for t in aut.transitions() {
        builder.add_transition(map[t.source], t.symbol, map[t.target]);
    }
    map
}

/// Letters of `left` in order, followed by the letters of `right` that `left` lacks.
pub(crate) fn merged_alphabet(left: &Automaton, right: &Automaton) -> Vec<char> {
    let mut alphabet = left.alphabet().to_vec();
    for c in right.alphabet() {
        if !alphabet.contains(c) {
            alphabet.push(*c);
        }
    }
    alphabet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        closure::eliminate_epsilon_and_determinize,
        tests::{assert_same_language, ends_in_b, even_as},
    };

    #[test]
    fn de_morgan() {
        let (a, b) = (even_as(), ends_in_b());
        let either = union(&a, &b).unwrap().into_value();
        let either = eliminate_epsilon_and_determinize(&either).unwrap().into_value();
        let neither = complement(&complete(&either).unwrap().into_value())
            .unwrap()
            .into_value();

        let both_not = intersection(
            &complement(&a).unwrap().into_value(),
            &complement(&b).unwrap().into_value(),
        )
        .unwrap()
        .into_value();
        assert_same_language(&neither, &both_not, &['a', 'b'], 6);
    }

    #[test]
    fn intersection_and_difference_laws() {
        let (a, b) = (even_as(), ends_in_b());
        let both = intersection(&a, &b).unwrap().into_value();
        let only_a = difference(&a, &b).unwrap().into_value();
        for w in crate::tests::words(&['a', 'b'], 6) {
            assert_eq!(both.accepts(&w), a.accepts(&w) && b.accepts(&w), "{w}");
            assert_eq!(only_a.accepts(&w), a.accepts(&w) && !b.accepts(&w), "{w}");
        }
    }
}
