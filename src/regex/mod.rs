//! Regular expressions: the [`Expression`] tree with its parser, and the Thompson and Glushkov
//! constructions that compile a regex string into an automaton.

mod expression;
pub use expression::{Expression, EMPTY_SET};

mod parser;

mod postfix;

mod thompson;
pub use thompson::thompson;

mod glushkov;
pub use glushkov::glushkov;
