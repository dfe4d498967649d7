use crate::{automaton::Builder, Automaton, Kind, Result, State, Symbol, Trace, Traced};

use super::embed;

/// Makes a DFA complete by routing every missing `(state, letter)` arc to a fresh non-final
/// `sink` state that loops on every letter. An automaton that is already complete is copied
/// without adding a sink.
pub fn complete(aut: &Automaton) -> Result<Traced<Automaton>> {
    aut.require_dfa("completion")?;
    let mut trace = Trace::new();
    let mut builder = Builder::new(format!("{}_complete", aut.name()), Kind::Dfa, aut.alphabet().to_vec());
    embed(&mut builder, aut, str::to_string, State::is_initial, State::is_final);

    let missing: Vec<(usize, char)> = (0..aut.size())
        .flat_map(|q| {
            aut.alphabet()
                .iter()
                .filter(move |c| aut.successors(q, Symbol::Letter(**c)).next().is_none())
                .map(move |c| (q, *c))
        })
        .collect();
    if missing.is_empty() {
        trace.step(format!("{} is already complete", aut.name()));
        return Ok(trace.finish(builder.finish()));
    }

    let sink = builder.add_fresh_state("sink", false, false);
    for (q, c) in &missing {
        builder.add_transition(*q, Symbol::Letter(*c), sink);
        trace.step(format!("{} --{c}--> {}", aut.state_name(*q), builder.state_name(sink)));
    }
    for c in aut.alphabet() {
        builder.add_transition(sink, Symbol::Letter(*c), sink);
    }
    trace.step(format!("{} loops on every letter", builder.state_name(sink)));
    Ok(trace.finish(builder.finish()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::{assert_same_language, even_as};

    fn partial() -> Automaton {
        Automaton::from_parts(
            "partial",
            Kind::Dfa,
            ['a', 'b'],
            [("p", true, false), ("q", false, true)],
            [
                ("p", Symbol::Letter('a'), "q"),
                ("p", Symbol::Letter('b'), "p"),
                ("q", Symbol::Letter('a'), "q"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn adds_one_sink_and_the_missing_arcs() {
        let a = partial();
        let c = complete(&a).unwrap().into_value();
        assert!(c.is_complete());
        assert_eq!(c.size(), a.size() + 1);
        // one missing arc plus a loop per letter on the sink
        assert_eq!(c.transitions().len(), a.transitions().len() + 1 + 2);
        assert_eq!(c.state_name(2), "sink");
        assert!(!c.states()[2].is_final());
        assert_same_language(&a, &c, &['a', 'b'], 5);
    }

    #[test]
    fn complete_dfa_is_copied() {
        let a = even_as();
        let c = complete(&a).unwrap().into_value();
        assert_eq!(c.size(), a.size());
        assert_eq!(c.transitions(), a.transitions());
    }
}
