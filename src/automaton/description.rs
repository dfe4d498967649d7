//! Line oriented text form of an automaton.
//!
//! ```text
//! name even_a
//! kind DFA
//! alphabet a b
//! state e initial final
//! state o
//! edge e a o
//! edge o a e
//! ```
//!
//! Blank lines and everything after `#` are ignored.

use std::{fmt::Write, str::FromStr};

use itertools::Itertools;

use crate::{Automaton, Error, Kind, ParseError, ParseErrorKind, Result, Symbol};

impl Automaton {
    /// Parses the text description format, see the module documentation of
    /// `automaton::description` for the grammar.
    pub fn from_description(input: &str) -> Result<Self> {
        let mut name = String::from("unnamed");
        let mut kind = Kind::Nfa;
        let mut alphabet = Vec::new();
        let mut states: Vec<(String, bool, bool)> = Vec::new();
        let mut edges: Vec<(String, Symbol, String)> = Vec::new();

        for (number, raw) in input.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let malformed =
                || ParseError::new(number + 1, ParseErrorKind::MalformedLine(line.to_string()));
            let mut words = line.split_whitespace();
            let Some(keyword) = words.next() else {
                continue;
            };
            let rest: Vec<&str> = words.collect();
            match keyword {
                "name" => name = rest.join(" "),
                "kind" => {
                    let [k] = rest[..] else {
                        return Err(malformed().into());
                    };
                    kind = k.parse().map_err(|_| malformed())?;
                }
                "alphabet" => {
                    alphabet = rest
                        .iter()
                        .flat_map(|w| w.split(','))
                        .filter(|s| !s.is_empty())
                        .map(|s| single_char(s).ok_or_else(malformed))
                        .collect::<std::result::Result<_, _>>()?;
                }
                "state" => {
                    let Some((state, flags)) = rest.split_first() else {
                        return Err(malformed().into());
                    };
                    let (mut initial, mut accepting) = (false, false);
                    for flag in flags {
                        match *flag {
                            "initial" | "init" => initial = true,
                            "final" | "accepting" => accepting = true,
                            _ => return Err(malformed().into()),
                        }
                    }
                    states.push((state.to_string(), initial, accepting));
                }
                "edge" => {
                    let [source, symbol, target] = rest[..] else {
                        return Err(malformed().into());
                    };
                    let symbol = single_char(symbol).ok_or_else(malformed)?;
                    edges.push((source.to_string(), Symbol::from(symbol), target.to_string()));
                }
                _ => return Err(malformed().into()),
            }
        }

        Automaton::from_parts(name, kind, alphabet, states, edges)
    }

    /// Writes the automaton in the description format accepted by
    /// [`Automaton::from_description`].
    pub fn to_description(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "name {}", self.name());
        let _ = writeln!(out, "kind {}", self.kind());
        let _ = writeln!(out, "alphabet {}", self.alphabet().iter().join(" "));
        for state in self.states() {
            let _ = write!(out, "state {}", state.name());
            if state.is_initial() {
                out.push_str(" initial");
            }
            if state.is_final() {
                out.push_str(" final");
            }
            out.push('\n');
        }
        for t in self.transitions() {
            let _ = writeln!(
                out,
                "edge {} {} {}",
                self.state_name(t.source),
                t.symbol,
                self.state_name(t.target)
            );
        }
        out
    }
}

impl FromStr for Automaton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Automaton::from_description(s)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::even_as;

    #[test]
    fn description_round_trip() {
        let aut = even_as();
        let text = aut.to_description();
        let parsed: Automaton = text.parse().unwrap();
        assert_eq!(parsed, aut);
    }

    #[test]
    fn parses_comments_and_epsilon() {
        let text = "
            # optional a
            name opt
            kind EpsilonNFA
            alphabet a
            state p initial
            state q final
            edge p a q
            edge p ε q   # skip
        ";
        let aut = Automaton::from_description(text).unwrap();
        assert_eq!(aut.name(), "opt");
        assert_eq!(aut.kind(), Kind::EpsilonNfa);
        assert_eq!(aut.transitions().len(), 2);
        assert!(aut.accepts(""));
        assert!(aut.accepts("a"));
    }

    #[test]
    fn reports_line_of_bad_input() {
        let err = Automaton::from_description("kind DFA\nstate p sometimes\n").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError { position: 2, .. })));

        let err = Automaton::from_description("kind DFA\nalphabet a\nstate p\nedge p a q\n").unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }
}
