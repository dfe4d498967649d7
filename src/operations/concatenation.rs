use crate::{automaton::Builder, Automaton, Kind, Result, State, Symbol, Trace, Traced};

use super::embed;

/// Accepts `uv` for every `u` accepted by `first` and `v` accepted by `second`.
///
/// Both operands are copied side by side, states of `first` suffixed `_1` and those of `second`
/// suffixed `_2`. Finals of the first copy lose their flag and get ε transitions to every
/// initial state of the second copy, which in turn loses its initial flag.
///
/// Fails with [`Error::AlphabetMismatch`](crate::Error::AlphabetMismatch) if the alphabets
/// differ.
pub fn concatenation(first: &Automaton, second: &Automaton) -> Result<Traced<Automaton>> {
    first.require_same_alphabet(second)?;
    let mut trace = Trace::new();
    let mut builder = Builder::new(
        format!("{}_then_{}", first.name(), second.name()),
        Kind::EpsilonNfa,
        first.alphabet().to_vec(),
    );

    let one = embed(&mut builder, first, |q| format!("{q}_1"), State::is_initial, |_| false);
    let two = embed(&mut builder, second, |q| format!("{q}_2"), |_| false, State::is_final);
    trace.step(format!(
        "copied {} as *_1 and {} as *_2",
        first.name(),
        second.name()
    ));

    for f in first.final_states() {
        for i in second.initial_states() {
            builder.add_transition(one[f], Symbol::Epsilon, two[i]);
            trace.step(format!(
                "{}_1 --{}--> {}_2",
                first.state_name(f),
                crate::EPSILON,
                second.state_name(i)
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
    use crate::{
        tests::{ends_in_b, even_as, words},
        Error,
    };

    #[test]
    fn concatenation_of_dfas() {
        let (a, b) = (ends_in_b(), even_as());
        let c = concatenation(&a, &b).unwrap().into_value();
        assert_eq!(c.kind(), Kind::EpsilonNfa);
        assert_eq!(c.size(), 4);
        assert!(c.state_id("n_1").is_some());
        assert!(c.state_id("e_2").is_some());
        for w in words(&['a', 'b'], 5) {
            let expected = (0..=w.len()).any(|k| a.accepts(&w[..k]) && b.accepts(&w[k..]));
            assert_eq!(c.accepts(&w), expected, "{w}");
        }
    }

    #[test]
    fn alphabets_must_agree() {
        let x = Automaton::from_parts(
            "x",
            Kind::Dfa,
            ['x'],
            [("p", true, true)],
            Vec::<(&str, Symbol, &str)>::new(),
        )
        .unwrap();
        let err = concatenation(&x, &even_as()).unwrap_err();
        assert!(matches!(err, Error::AlphabetMismatch { .. }));
    }
}
