//! Turning automata back into regular expressions, either by eliminating states from a label
//! matrix or by solving the language equations of the states with Arden's lemma.

mod linear;

mod equations;
pub use equations::{by_equations, by_equations_with, EquationSolver, EquationSystem, SolverConfig};

mod elimination;
pub use elimination::by_elimination;
