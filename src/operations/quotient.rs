use crate::{Automaton, Result, Traced};

use super::{intersection, mirror};

/// The left quotient construction `mirror(intersection(mirror(right), mirror(left)))`.
///
/// Both mirrors and the product are temporary and dropped once the outer mirror is built. Since
/// mirroring preserves intersections, the accepted language is the intersection of both
/// operand languages. The alphabets must agree.
pub fn quotient(left: &Automaton, right: &Automaton) -> Result<Traced<Automaton>> {
    left.require_same_alphabet(right)?;

    let (mirrored_right, mut trace) = mirror(right)?.into_parts();
    let (mirrored_left, steps) = mirror(left)?.into_parts();
    trace.nest(steps);
    let (product, steps) = intersection(&mirrored_right, &mirrored_left)?.into_parts();
    trace.nest(steps);
    let (result, steps) = mirror(&product)?.into_parts();
    trace.nest(steps);
    trace.step("discarded the intermediate mirrors and product");

    Ok(trace.finish(result.renamed(format!("{}_quotient_{}", right.name(), left.name()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{ends_in_b, even_as, words};

    #[test]
    fn quotient_composition() {
        let (a, b) = (even_as(), ends_in_b());
        let q = quotient(&a, &b).unwrap().into_value();
        for w in words(&['a', 'b'], 6) {
            assert_eq!(q.accepts(&w), a.accepts(&w) && b.accepts(&w), "{w}");
        }
    }
}
