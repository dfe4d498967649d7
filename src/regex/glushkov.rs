use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{automaton::Builder, Automaton, Kind, Result, Symbol, Trace, Traced};

use super::postfix::{self, Fold};

/// `nullable`, `first` and `last` of a subexpression. Positions are 1-based.
#[derive(Debug, Clone, Default)]
struct Node {
    nullable: bool,
    first: BTreeSet<usize>,
    last: BTreeSet<usize>,
}

/// Per build state: the letter at every position and the follow sets.
#[derive(Debug, Default)]
struct Positions {
    letters: Vec<char>,
    follow: Vec<BTreeSet<usize>>,
}

impl Positions {
    fn link(&mut self, from: &BTreeSet<usize>, to: &BTreeSet<usize>) {
        for p in from {
            self.follow[p - 1].extend(to.iter().copied());
        }
    }
}

impl Fold for Positions {
    type Value = Node;

    fn letter(&mut self, c: char) -> Node {
        self.letters.push(c);
        self.follow.push(BTreeSet::new());
        let position = BTreeSet::from([self.letters.len()]);
        Node {
            nullable: false,
            first: position.clone(),
            last: position,
        }
    }

    fn epsilon(&mut self) -> Node {
        Node {
            nullable: true,
            ..Node::default()
        }
    }

    fn star(&mut self, inner: Node) -> Node {
        self.link(&inner.last, &inner.first);
        Node {
            nullable: true,
            ..inner
        }
    }

    fn optional(&mut self, inner: Node) -> Node {
        Node {
            nullable: true,
            ..inner
        }
    }

    fn concat(&mut self, left: Node, right: Node) -> Node {
        self.link(&left.last, &right.first);
        let mut first = left.first;
        if left.nullable {
            first.extend(right.first.iter().copied());
        }
        let mut last = right.last;
        if right.nullable {
            last.extend(left.last.iter().copied());
        }
        Node {
            nullable: left.nullable && right.nullable,
            first,
            last,
        }
    }

    fn union(&mut self, left: Node, right: Node) -> Node {
        Node {
            nullable: left.nullable || right.nullable,
            first: left.first.union(&right.first).copied().collect(),
            last: left.last.union(&right.last).copied().collect(),
        }
    }
}

/// Glushkov (position) construction: an NFA without ε transitions accepting the language of
/// `regex`.
///
/// State `q0` is the only initial state, final iff the expression accepts the empty word, and
/// every letter occurrence `i` (counted from 1, left to right) becomes state `qi`, final iff it
/// can end a word. `q0` moves to the first positions, `qi` to the positions that may follow `i`,
/// always on the letter of the target position.
pub fn glushkov(regex: &str) -> Result<Traced<Automaton>> {
    let mut trace = Trace::new();
    let mut positions = Positions::default();
    let root = postfix::fold(regex, &mut positions)?;
    trace.step(format!(
        "nullable: {}, first: {{{}}}, last: {{{}}}",
        root.nullable,
        root.first.iter().join(", "),
        root.last.iter().join(", ")
    ));

    let mut builder = Builder::new(
        format!("glushkov({})", regex.trim()),
        Kind::Nfa,
        postfix::letters(regex),
    );
    let start = builder.add_state("q0", true, root.nullable);
    for (i, c) in positions.letters.iter().enumerate() {
        let position = i + 1;
        builder.add_state(format!("q{position}"), false, root.last.contains(&position));
        trace.step(format!(
            "position {position} ({c}) follow: {{{}}}",
            positions.follow[i].iter().join(", ")
        ));
    }

    let target = |p: usize| (Symbol::Letter(positions.letters[p - 1]), p);
    for &p in &root.first {
        let (symbol, state) = target(p);
        builder.add_transition(start, symbol, state);
    }
    for (i, follow) in positions.follow.iter().enumerate() {
        for &p in follow {
            let (symbol, state) = target(p);
            builder.add_transition(i + 1, symbol, state);
        }
    }
    Ok(trace.finish(builder.finish()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        regex::thompson,
        tests::{assert_same_language, language, words},
    };

    #[test]
    fn letter_followed_by_star() {
        let aut = glushkov("ab*").unwrap().into_value();
        assert_eq!(aut.kind(), Kind::Nfa);
        assert!(!aut.has_epsilon_transitions());
        assert_eq!(aut.size(), 3);
        assert!(!aut.states()[0].is_final());
        for w in words(&['a', 'b'], 5) {
            let expected = w.starts_with('a') && w.chars().skip(1).all(|c| c == 'b');
            assert_eq!(aut.accepts(&w), expected, "{w}");
        }
    }

    #[test]
    fn nullable_expression_has_final_initial_state() {
        let aut = glushkov("(a+b)*").unwrap().into_value();
        assert!(aut.states()[0].is_final());
        assert_eq!(language(&aut, 2), vec!["", "a", "b", "aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn agrees_with_thompson() {
        for regex in ["(a+b)*abb", "a(ba)*+b?", "(ab+ε)(a*b)*", "ε"] {
            let g = glushkov(regex).unwrap().into_value();
            let t = thompson(regex).unwrap().into_value();
            assert_same_language(&g, &t, &['a', 'b'], 6);
        }
    }

    #[test]
    fn optional_is_nullable() {
        let aut = glushkov("a?b").unwrap().into_value();
        assert_eq!(language(&aut, 3), vec!["b", "ab"]);
    }
}
