use crate::{automaton::Builder, Automaton, Kind, Result, Trace, Traced};

use super::embed;

/// Swaps final and non-final states of a DFA, the transitions are copied unchanged.
///
/// This complements the language only for complete DFAs; on a partial DFA the words that fall
/// off the transition function stay rejected. Use [`complete`](super::complete) first if that
/// matters.
pub fn complement(aut: &Automaton) -> Result<Traced<Automaton>> {
    aut.require_dfa("complement")?;
    let mut trace = Trace::new();
    let mut builder = Builder::new(format!("not_{}", aut.name()), Kind::Dfa, aut.alphabet().to_vec());
    embed(&mut builder, aut, str::to_string, |q| q.is_initial(), |q| !q.is_final());
    if !aut.is_complete() {
        tracing::debug!("complementing partial DFA {}", aut.name());
    }
    trace.step(format!("flipped the final flag of {} states", aut.size()));
    Ok(trace.finish(builder.finish()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        tests::{assert_same_language, even_as, words},
        Error, Symbol,
    };

    #[test]
    fn complement_of_complete_dfa() {
        let a = even_as();
        let c = complement(&a).unwrap().into_value();
        assert_eq!(c.kind(), Kind::Dfa);
        for w in words(&['a', 'b'], 5) {
            assert_eq!(c.accepts(&w), !a.accepts(&w));
        }
        let cc = complement(&c).unwrap().into_value();
        assert_same_language(&a, &cc, &['a', 'b'], 5);
    }

    #[test]
    fn requires_dfa() {
        let nfa = Automaton::from_parts(
            "n",
            Kind::Nfa,
            ['a'],
            [("p", true, true)],
            [("p", Symbol::Letter('a'), "p")],
        )
        .unwrap();
        let err = complement(&nfa).unwrap_err();
        assert!(matches!(
            err,
            Error::PreconditionViolation { ref automaton, operation: "complement", .. } if automaton == "n"
        ));
    }
}
