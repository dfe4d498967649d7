use std::fmt::Display;

use itertools::Itertools;

use crate::{Automaton, Kind, Symbol};

impl Automaton {
    /// Renders the transition table, one row per state and one column per symbol. Initial
    /// states are marked with `->`, final states with `*`.
    pub fn build_transition_table(&self) -> String {
        let mut symbols = self.alphabet().iter().map(|c| Symbol::Letter(*c)).collect_vec();
        if self.kind() == Kind::EpsilonNfa {
            symbols.push(Symbol::Epsilon);
        }

        let mut builder = tabled::builder::Builder::default();
        builder.set_header(
            std::iter::once("State".to_string()).chain(symbols.iter().map(|s| s.to_string())),
        );
        for (id, state) in self.states().iter().enumerate() {
            let mut row = vec![format!(
                "{}{}{}",
                if state.is_initial() { "-> " } else { "" },
                state.name(),
                if state.is_final() { " *" } else { "" }
            )];
            for sym in &symbols {
                let targets = self
                    .successors(id, *sym)
                    .map(|q| self.state_name(q))
                    .join(", ");
                row.push(if targets.is_empty() {
                    "-".to_string()
                } else {
                    targets
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.name(), self.kind())?;
        write!(f, "{}", self.build_transition_table())
    }
}
