use anyhow::Context;
use clap::Parser;
use fa_algebra::{
    algorithms, closure,
    extract::{self, EquationSolver, EquationSystem},
    operations, reachability, regex, Automaton, Trace, Traced,
};
use owo_colors::OwoColorize;
use tracing::{info, Level};

mod cli;
mod io;

use cli::{Commands, Fa, Method};

type Unary = fn(&Automaton) -> fa_algebra::Result<Traced<Automaton>>;
type Binary = fn(&Automaton, &Automaton) -> fa_algebra::Result<Traced<Automaton>>;

fn unary(input: Option<&str>, op: Unary) -> anyhow::Result<Traced<Automaton>> {
    Ok(op(&io::automaton(input)?)?)
}

fn binary(left: &str, right: &str, op: Binary) -> anyhow::Result<Traced<Automaton>> {
    let (left, right) = (io::automaton(Some(left))?, io::automaton(Some(right))?);
    Ok(op(&left, &right)?)
}

fn automaton_result(fa: &Fa) -> anyhow::Result<Option<Traced<Automaton>>> {
    let result = match &fa.command {
        Commands::Union { left, right } => binary(left, right, operations::union)?,
        Commands::Intersection { left, right } => binary(left, right, operations::intersection)?,
        Commands::Concat { first, second } => binary(first, second, operations::concatenation)?,
        Commands::Difference { left, right } => binary(left, right, operations::difference)?,
        Commands::Quotient { left, right } => binary(left, right, operations::quotient)?,
        Commands::Complement { input } => unary(input.as_deref(), operations::complement)?,
        Commands::Mirror { input } => unary(input.as_deref(), operations::mirror)?,
        Commands::Star { input } => unary(input.as_deref(), operations::star)?,
        Commands::Complete { input } => unary(input.as_deref(), operations::complete)?,
        Commands::Determinize { input } => unary(input.as_deref(), algorithms::determinize)?,
        Commands::Minimize { input } => unary(input.as_deref(), algorithms::minimize)?,
        Commands::Canonicalize { input } => unary(input.as_deref(), algorithms::canonicalize)?,
        Commands::Eliminate { input, determinize } => {
            let aut = io::automaton(input.as_deref())?;
            if *determinize {
                closure::eliminate_epsilon_and_determinize(&aut)?
            } else {
                closure::eliminate_epsilon(&aut)
            }
        }
        Commands::Prune { input } => {
            let aut = io::automaton(input.as_deref())?;
            let analysis = reachability::analyse(&aut);
            info!("accessible: {{{}}}", analysis.accessible.join(", "));
            info!("co-accessible: {{{}}}", analysis.co_accessible.join(", "));
            info!("useful: {{{}}}", analysis.useful.join(", "));
            reachability::prune(&aut).map(|pruned| pruned.automaton)
        }
        Commands::Thompson { regex: e } => regex::thompson(e)?,
        Commands::Glushkov { regex: e } => regex::glushkov(e)?,
        _ => return Ok(None),
    };
    Ok(Some(result))
}

fn text_result(fa: &Fa) -> anyhow::Result<Traced<String>> {
    let result = match &fa.command {
        Commands::Closure { state, input } => {
            let aut = io::automaton(input.as_deref())?;
            let id = aut
                .state_id(state)
                .with_context(|| format!("`{}` has no state named {state}", aut.name()))?;
            let closure = closure::epsilon_closure(&aut, id)
                .into_iter()
                .map(|q| aut.state_name(q))
                .collect::<Vec<_>>();
            Trace::new().finish(format!("{{{}}}", closure.join(", ")))
        }
        Commands::Extract { input, method } => {
            let aut = io::automaton(input.as_deref())?;
            let extracted = match method {
                Method::Elimination => extract::by_elimination(&aut)?,
                Method::Equations => extract::by_equations(&aut)?,
            };
            extracted.map(|e| e.to_string())
        }
        Commands::Solve { input } => {
            let system: EquationSystem = io::from_file_or_stdin(input.as_deref())?.parse()?;
            EquationSolver::new().solve(&system)?.map(|solutions| {
                solutions
                    .iter()
                    .map(|(v, e)| format!("{v} = {e}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Commands::Accepts { input, words } => {
            let aut = io::automaton(Some(input))?;
            let colored = fa.output.is_none();
            let lines = words
                .iter()
                .map(|w| match (aut.accepts(w), colored) {
                    (true, true) => format!("{w}: {}", "accepted".green()),
                    (false, true) => format!("{w}: {}", "rejected".red()),
                    (true, false) => format!("{w}: accepted"),
                    (false, false) => format!("{w}: rejected"),
                })
                .collect::<Vec<_>>();
            Trace::new().finish(lines.join("\n"))
        }
        _ => match automaton_result(fa)? {
            Some(result) => result.map(|aut| {
                if fa.table {
                    aut.to_string()
                } else {
                    aut.to_description()
                }
            }),
            None => anyhow::bail!("command produced no result"),
        },
    };
    Ok(result)
}

fn main() -> anyhow::Result<()> {
    let fa = Fa::parse();

    let level = if fa.verbose {
        Level::TRACE
    } else if fa.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let result = text_result(&fa)?;
    if fa.steps {
        eprintln!("{}", "steps".bold());
        for (i, step) in result.steps.iter().enumerate() {
            eprintln!("{} {step}", format!("{:>4}.", i + 1).dimmed());
        }
    }
    io::to_file_or_stdout(fa.output.as_deref(), &result.value)
}
