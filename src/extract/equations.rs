use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use crate::{
    reachability, Automaton, Error, Expression, ParseError, ParseErrorKind, Result, Symbol, Trace,
    Traced,
};

use super::linear::LinearForm;

/// A system of language equations `Xi = <expression>`, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationSystem {
    equations: Vec<(String, Expression)>,
}

impl EquationSystem {
    /// Creates a system from `(variable, right hand side)` pairs.
    pub fn new<I: IntoIterator<Item = (String, Expression)>>(equations: I) -> Self {
        Self {
            equations: equations.into_iter().collect(),
        }
    }

    /// The equations in declaration order.
    pub fn equations(&self) -> &[(String, Expression)] {
        &self.equations
    }

    /// One equation per useful state of `aut`: state `i` of the pruned automaton becomes `Xi`
    /// with right hand side `Σ symbol·Xtarget`, plus `ε` for final states. Also returns the
    /// variables of the initial states.
    pub fn from_automaton(aut: &Automaton) -> (Self, Vec<String>) {
        let pruned = reachability::prune(aut).into_value().automaton;
        let var = |q: usize| format!("X{q}");
        let equations = (0..pruned.size())
            .map(|q| {
                let arcs = pruned.transitions_from(q).map(|t| {
                    let symbol = match t.symbol {
                        Symbol::Letter(c) => Expression::Letter(c),
                        Symbol::Epsilon => Expression::Epsilon,
                    };
                    Expression::concat(symbol, Expression::Variable(var(t.target)))
                });
                let accepting = pruned.states()[q]
                    .is_final()
                    .then_some(Expression::Epsilon);
                (var(q), Expression::union(arcs.chain(accepting)))
            })
            .collect();
        let initials = pruned.initial_states().map(var).collect();
        (Self { equations }, initials)
    }
}

impl FromStr for EquationSystem {
    type Err = Error;

    /// One equation `Xi = <expression>` per line, blank lines are skipped. A malformed left
    /// hand side or a repeated variable is reported with its 1-based line number; errors in an
    /// expression carry the position inside that expression.
    fn from_str(s: &str) -> Result<Self> {
        let mut equations: Vec<(String, Expression)> = Vec::new();
        for (number, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed =
                || ParseError::new(number + 1, ParseErrorKind::MalformedEquation(line.to_string()));
            let (left, right) = line.split_once('=').ok_or_else(|| malformed())?;
            let variable = left.trim();
            let well_named = variable.len() > 1
                && variable.starts_with('X')
                && variable[1..].chars().all(|c| c.is_ascii_digit());
            if !well_named || equations.iter().any(|(v, _)| v == variable) {
                return Err(malformed().into());
            }
            equations.push((variable.to_string(), right.parse()?));
        }
        if equations.is_empty() {
            return Err(ParseError::new(0, ParseErrorKind::Empty).into());
        }
        Ok(Self { equations })
    }
}

impl Display for EquationSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (v, e) in &self.equations {
            writeln!(f, "{v} = {e}")?;
        }
        Ok(())
    }
}

/// Limits of the [`EquationSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximal number of back substitution rounds before giving up with
    /// [`Error::NonConvergence`].
    pub max_rounds: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_rounds: 64 }
    }
}

/// Solves right-linear equation systems by Arden's lemma and substitution.
///
/// Equations are processed in order: the self reference of `Xi` is removed with Arden's lemma
/// and the result substituted into every later equation. Afterwards solved variables are
/// substituted back into the earlier ones until no equation mentions a defined variable.
/// Variables without an equation are left in place.
#[derive(Debug, Clone, Default)]
pub struct EquationSolver {
    config: SolverConfig,
}

impl EquationSolver {
    /// A solver with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A solver with the given limits.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solves `system`, returning every variable with its simplified and factorized solution.
    pub fn solve(&self, system: &EquationSystem) -> Result<Traced<Vec<(String, Expression)>>> {
        let mut trace = Trace::new();
        let mut forms = system
            .equations()
            .iter()
            .map(|(v, e)| {
                trace.step(format!("{v} = {e}"));
                Ok((v.clone(), LinearForm::from_expression(v, e)?))
            })
            .collect::<Result<Vec<_>>>()?;

        for i in 0..forms.len() {
            let (var, form) = forms[i].clone();
            let (solved, coefficient) = form.arden(&var);
            if let Some(c) = coefficient {
                trace.step(format!(
                    "Arden on {var}: {var} = {c}{var} + ... gives {var} = {}",
                    solved.to_expression()
                ));
            }
            for (other, later) in forms.iter_mut().skip(i + 1) {
                if later.substitute(&var, &solved) {
                    trace.step(format!("substituted {var} into {other}: {}", later.to_expression()));
                }
            }
            forms[i].1 = solved;
        }

        let mut round = 0;
        while forms.iter().any(|(_, f)| forms.iter().any(|(v, _)| f.mentions(v))) {
            round += 1;
            if round > self.config.max_rounds {
                tracing::warn!("equation solver gave up after {} rounds", self.config.max_rounds);
                return Err(Error::NonConvergence(self.config.max_rounds));
            }
            for i in (0..forms.len()).rev() {
                for k in 0..forms.len() {
                    if k == i {
                        continue;
                    }
                    let (var, value) = forms[k].clone();
                    forms[i].1.substitute(&var, &value);
                }
            }
            trace.step(format!("back substitution round {round}"));
        }

        let solutions = forms
            .into_iter()
            .map(|(v, f)| {
                let e = f.to_expression().simplify().factorize();
                trace.step(format!("{v} = {e}"));
                (v, e)
            })
            .collect();
        Ok(trace.finish(solutions))
    }

    /// Parses a system in the text form of [`EquationSystem`] and solves it, mapping every
    /// variable to the printed form of its solution.
    pub fn solve_text(&self, text: &str) -> Result<BTreeMap<String, String>> {
        let system: EquationSystem = text.parse()?;
        Ok(self
            .solve(&system)?
            .into_value()
            .into_iter()
            .map(|(v, e)| (v, e.to_string()))
            .collect())
    }
}

/// Extracts an expression from `aut` by solving the equation system of its useful states. The
/// result is the union of the solutions of the initial states, `∅` if there is no useful state.
pub fn by_equations(aut: &Automaton) -> Result<Traced<Expression>> {
    by_equations_with(aut, &EquationSolver::new())
}

/// [`by_equations`] with a custom solver.
pub fn by_equations_with(aut: &Automaton, solver: &EquationSolver) -> Result<Traced<Expression>> {
    let (system, initials) = EquationSystem::from_automaton(aut);
    if system.equations().is_empty() {
        let mut trace = Trace::new();
        trace.step(format!("{} has no useful state", aut.name()));
        return Ok(trace.finish(Expression::empty()));
    }

    let (solutions, trace) = solver.solve(&system)?.into_parts();
    let result = Expression::union(
        solutions
            .into_iter()
            .filter(|(v, _)| initials.contains(v))
            .map(|(_, e)| e),
    )
    .simplify()
    .factorize();
    Ok(trace.finish(result))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        regex::thompson,
        tests::{assert_same_language, ends_in_b, even_as},
        Kind,
    };

    #[test]
    #[traced_test]
    fn arden_single_equation() {
        let solved = EquationSolver::new().solve_text("X0 = aX0 + b").unwrap();
        assert_eq!(solved.get("X0").map(String::as_str), Some("a*b"));
    }

    #[test]
    fn two_equations() {
        let solved = EquationSolver::new()
            .solve_text("X0 = aX1 + ε\nX1 = bX0")
            .unwrap();
        assert_eq!(solved["X1"], "(ba)*b");
        assert_eq!(solved["X0"], "ε+a(ba)*b");
    }

    #[test]
    fn system_text_errors() {
        let err = "X0 = a\nY = b".parse::<EquationSystem>().unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError {
                position: 2,
                kind: ParseErrorKind::MalformedEquation(_)
            })
        ));
        assert!("X0 = a\nX0 = b".parse::<EquationSystem>().is_err());
        assert!(matches!(
            "X0 = a(".parse::<EquationSystem>(),
            Err(Error::Parse(ParseError {
                kind: ParseErrorKind::UnmatchedOpen,
                ..
            }))
        ));
        assert!(matches!(
            EquationSolver::new().solve_text("X0 = X1a\nX1 = b"),
            Err(Error::NotRightLinear { .. })
        ));
    }

    #[test]
    fn round_limit_is_reported() {
        let solver = EquationSolver::with_config(SolverConfig { max_rounds: 0 });
        assert_eq!(
            solver.solve_text("X0 = aX1\nX1 = b").unwrap_err(),
            Error::NonConvergence(0)
        );
    }

    #[test]
    fn extraction_from_automata() {
        for aut in [even_as(), ends_in_b(), crate::tests::wiki_dfa()] {
            let expr = by_equations(&aut).unwrap().into_value();
            let rebuilt = thompson(&expr.to_string()).unwrap().into_value();
            assert_same_language(&aut, &rebuilt, &['a', 'b'], 6);
        }
    }

    #[test]
    fn automaton_without_useful_states() {
        let dead = Automaton::from_parts(
            "dead",
            Kind::Dfa,
            ['a'],
            [("p", true, false)],
            [("p", Symbol::Letter('a'), "p")],
        )
        .unwrap();
        assert_eq!(by_equations(&dead).unwrap().into_value(), Expression::empty());
    }
}
