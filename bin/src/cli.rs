use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Fa {
    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub verbose: bool,
    /// Turn on debugging information
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub debug: bool,
    /// Print the construction steps to stderr
    #[arg(long, global = true)]
    pub steps: bool,
    /// Print automata as transition tables instead of descriptions
    #[arg(long, global = true)]
    pub table: bool,
    /// File to write the result to, stdout if omitted
    #[arg(short, long, global = true)]
    pub output: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Union of two automata")]
    Union { left: String, right: String },
    #[command(about = "Product automaton accepting the intersection")]
    Intersection { left: String, right: String },
    #[command(about = "Complement of a DFA")]
    Complement { input: Option<String> },
    #[command(about = "Concatenation of two automata over the same alphabet")]
    Concat { first: String, second: String },
    #[command(about = "Automaton accepting the reversed words")]
    Mirror { input: Option<String> },
    #[command(about = "Kleene star of an automaton")]
    Star { input: Option<String> },
    #[command(about = "Completes a DFA with a sink state")]
    Complete { input: Option<String> },
    #[command(about = "Difference of two DFAs")]
    Difference { left: String, right: String },
    #[command(about = "Quotient of two automata over the same alphabet")]
    Quotient { left: String, right: String },
    #[command(about = "Subset construction on an NFA")]
    Determinize { input: Option<String> },
    #[command(about = "Removes epsilon transitions")]
    Eliminate {
        input: Option<String>,
        /// Determinize the result as well
        #[arg(long)]
        determinize: bool,
    },
    #[command(about = "Minimizes a DFA by partition refinement")]
    Minimize { input: Option<String> },
    #[command(about = "Minimizes a DFA and renames its states in breadth first order")]
    Canonicalize { input: Option<String> },
    #[command(about = "Keeps only the useful states")]
    Prune { input: Option<String> },
    #[command(about = "Prints the epsilon closure of a state")]
    Closure { state: String, input: Option<String> },
    #[command(about = "Builds an epsilon automaton from a regular expression")]
    Thompson { regex: String },
    #[command(about = "Builds an automaton without epsilon transitions from a regular expression")]
    Glushkov { regex: String },
    #[command(about = "Turns an automaton into a regular expression")]
    Extract {
        input: Option<String>,
        #[arg(short, long, value_enum, default_value_t = Method::Equations)]
        method: Method,
    },
    #[command(about = "Solves a system of language equations, one `Xi = expr` per line")]
    Solve { input: Option<String> },
    #[command(about = "Tests which of the given words are accepted")]
    Accepts {
        input: String,
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    Elimination,
    Equations,
}
