use crate::{automaton::Builder, Automaton, Kind, Result, StateId, Symbol, Trace, Traced};

use super::postfix::{self, Fold};

/// A partial automaton with one entry and one exit state.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

struct Thompson {
    builder: Builder,
    trace: Trace,
    next: usize,
}

impl Thompson {
    fn fresh(&mut self) -> StateId {
        let id = self.builder.add_state(format!("q{}", self.next), false, false);
        self.next += 1;
        id
    }

    fn link(&mut self, from: StateId, to: StateId) {
        self.builder.add_transition(from, Symbol::Epsilon, to);
    }

    fn wrap(&mut self, what: &str) -> Fragment {
        let fragment = Fragment {
            start: self.fresh(),
            end: self.fresh(),
        };
        self.trace.step(format!(
            "{what}: {} .. {}",
            self.builder.state_name(fragment.start),
            self.builder.state_name(fragment.end)
        ));
        fragment
    }
}

impl Fold for Thompson {
    type Value = Fragment;

    fn letter(&mut self, c: char) -> Fragment {
        let f = self.wrap(&format!("letter {c}"));
        self.builder.add_transition(f.start, Symbol::Letter(c), f.end);
        f
    }

    fn epsilon(&mut self) -> Fragment {
        let f = self.wrap("empty word");
        self.link(f.start, f.end);
        f
    }

    fn star(&mut self, inner: Fragment) -> Fragment {
        let f = self.wrap("star");
        self.link(inner.end, inner.start);
        self.link(f.start, inner.start);
        self.link(inner.end, f.end);
        self.link(f.start, f.end);
        f
    }

    fn optional(&mut self, inner: Fragment) -> Fragment {
        let f = self.wrap("option");
        self.link(f.start, inner.start);
        self.link(inner.end, f.end);
        self.link(f.start, f.end);
        f
    }

    fn concat(&mut self, left: Fragment, right: Fragment) -> Fragment {
        self.link(left.end, right.start);
        self.trace.step(format!(
            "concatenation: {} --{}--> {}",
            self.builder.state_name(left.end),
            crate::EPSILON,
            self.builder.state_name(right.start)
        ));
        Fragment {
            start: left.start,
            end: right.end,
        }
    }

    fn union(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let f = self.wrap("union");
        self.link(f.start, left.start);
        self.link(f.start, right.start);
        self.link(left.end, f.end);
        self.link(right.end, f.end);
        f
    }
}

/// Thompson construction: an epsilon automaton with a single initial and a single final state
/// accepting the language of `regex`. States are named `q0`, `q1`, ... in creation order.
///
/// The syntax is that of the expression parser without variables, plus a postfix `?`.
pub fn thompson(regex: &str) -> Result<Traced<Automaton>> {
    let mut folder = Thompson {
        builder: Builder::new(
            format!("thompson({})", regex.trim()),
            Kind::EpsilonNfa,
            postfix::letters(regex),
        ),
        trace: Trace::new(),
        next: 0,
    };
    let whole = postfix::fold(regex, &mut folder)?;
    let Thompson {
        mut builder,
        mut trace,
        ..
    } = folder;
    builder.set_initial(whole.start, true);
    builder.set_final(whole.end, true);
    trace.step(format!(
        "initial {}, final {}",
        builder.state_name(whole.start),
        builder.state_name(whole.end)
    ));
    Ok(trace.finish(builder.finish()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        tests::{language, words},
        Error, ParseError, ParseErrorKind,
    };

    #[test]
    #[traced_test]
    fn union_of_letters() {
        let aut = thompson("a+b").unwrap().into_value();
        assert_eq!(aut.kind(), Kind::EpsilonNfa);
        assert_eq!(aut.alphabet(), &['a', 'b']);
        assert_eq!(aut.size(), 6);
        assert_eq!(language(&aut, 3), vec!["a", "b"]);
    }

    #[test]
    fn star_and_concatenation() {
        let aut = thompson("(a+b)*abb").unwrap().into_value();
        assert_eq!(aut.initial_states().count(), 1);
        assert_eq!(aut.final_states().count(), 1);
        for w in words(&['a', 'b'], 6) {
            assert_eq!(aut.accepts(&w), w.ends_with("abb"), "{w}");
        }
    }

    #[test]
    fn optional_and_epsilon() {
        let aut = thompson("ab?").unwrap().into_value();
        assert_eq!(language(&aut, 3), vec!["a", "ab"]);
        let aut = thompson("ε+a").unwrap().into_value();
        assert_eq!(language(&aut, 2), vec!["", "a"]);
    }

    #[test]
    fn names_are_fresh() {
        let aut = thompson("a*a").unwrap().into_value();
        let names = aut.states().iter().map(|q| q.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["q0", "q1", "q2", "q3", "q4", "q5"]);
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert_eq!(
            thompson("a+(b").unwrap_err(),
            Error::Parse(ParseError::new(2, ParseErrorKind::UnmatchedOpen))
        );
    }
}
