use crate::{Automaton, Result, Traced};

use super::{complement, complete, intersection};

/// Accepts the words of `left` that `right` rejects, computed as the intersection of `left` with
/// the complement of the completed `right`. Both operands must be DFAs over the same alphabet.
pub fn difference(left: &Automaton, right: &Automaton) -> Result<Traced<Automaton>> {
    left.require_dfa("difference")?;
    right.require_dfa("difference")?;
    left.require_same_alphabet(right)?;

    let (completed, mut trace) = complete(right)?.into_parts();
    let (negated, steps) = complement(&completed)?.into_parts();
    trace.nest(steps);
    let (result, steps) = intersection(left, &negated)?.into_parts();
    trace.nest(steps);
    trace.step(format!("discarded temporary {}", negated.name()));
    Ok(trace.finish(result.renamed(format!("{}_minus_{}", left.name(), right.name()))))
}
