use crate::{Automaton, Error, Expression, Result, Symbol, Trace, Traced};

type Matrix = Vec<Vec<Option<Expression>>>;

fn label(symbol: Symbol) -> Expression {
    match symbol {
        Symbol::Letter(c) => Expression::Letter(c),
        Symbol::Epsilon => Expression::Epsilon,
    }
}

fn add(cell: &mut Option<Expression>, e: Expression) {
    *cell = Some(match cell.take() {
        Some(existing) => Expression::union([existing, e]),
        None => e,
    });
}

/// Removes state `k`, folding every path `i -> k -> j` into the arc `i -> j`.
fn eliminate(matrix: &mut Matrix, k: usize) -> usize {
    let n = matrix.len();
    let around = Expression::star(matrix[k][k].take().unwrap_or_else(Expression::empty));
    let incoming = (0..n)
        .filter_map(|i| matrix[i][k].take().map(|e| (i, e)))
        .collect::<Vec<_>>();
    let outgoing = (0..n)
        .filter_map(|j| matrix[k][j].take().map(|e| (j, e)))
        .collect::<Vec<_>>();

    for (i, into) in &incoming {
        for (j, out) in &outgoing {
            let path = Expression::concat(
                into.clone(),
                Expression::concat(around.clone(), out.clone()),
            );
            add(&mut matrix[*i][*j], path);
        }
    }
    incoming.len() * outgoing.len()
}

/// Extracts an expression from `aut` by state elimination.
///
/// The automaton must have exactly one initial and one final state. Arcs between the same pair
/// of states are merged into a union, then every other state is removed in index order. What
/// remains is read off as `Rii* Rif (Rff + Rfi Rii* Rif)*`, or `Rii*` when the initial state is
/// also the final one. The result is `∅` if no path connects the two.
pub fn by_elimination(aut: &Automaton) -> Result<Traced<Expression>> {
    let initials = aut.initial_states().collect::<Vec<_>>();
    let finals = aut.final_states().collect::<Vec<_>>();
    let (initial, last) = match (initials.as_slice(), finals.as_slice()) {
        ([i], [f]) => (*i, *f),
        _ => {
            return Err(Error::precondition(
                aut,
                "elimination extraction",
                "exactly one initial and one final state",
            ))
        }
    };

    let mut trace = Trace::new();
    let n = aut.size();
    let mut matrix: Matrix = vec![vec![None; n]; n];
    for t in aut.transitions() {
        add(&mut matrix[t.source][t.target], label(t.symbol));
    }

    for k in (0..n).filter(|&k| k != initial && k != last) {
        let folded = eliminate(&mut matrix, k);
        trace.step(format!(
            "eliminated {}, {folded} paths folded",
            aut.state_name(k)
        ));
    }

    let cell = |i: usize, j: usize| matrix[i][j].clone().unwrap_or_else(Expression::empty);
    let start_loop = Expression::star(cell(initial, initial));
    let result = if initial == last {
        start_loop
    } else {
        let forward = cell(initial, last);
        let back_and_forth = Expression::concat(
            cell(last, initial),
            Expression::concat(start_loop.clone(), forward.clone()),
        );
        Expression::concat(
            start_loop,
            Expression::concat(
                forward,
                Expression::star(Expression::union([cell(last, last), back_and_forth])),
            ),
        )
    }
    .simplify();

    trace.step(format!(
        "{} -> {}: {result}",
        aut.state_name(initial),
        aut.state_name(last)
    ));
    tracing::debug!("extracted {result} from `{}` by elimination", aut.name());
    Ok(trace.finish(result))
}
