use std::{
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use itertools::Itertools;

use crate::{Map, ParseError, EPSILON};

/// Printed form of the empty language.
pub const EMPTY_SET: char = '∅';

/// A regular expression over single letters, possibly mentioning equation variables `Xn`.
///
/// Expressions are immutable values; [`simplify`](Expression::simplify),
/// [`substitute`](Expression::substitute) and [`factorize`](Expression::factorize) return new
/// trees. Two expressions are equal iff their printed forms are equal.
#[derive(Debug, Clone)]
pub enum Expression {
    /// An equation variable such as `X3`.
    Variable(String),
    /// A single letter.
    Letter(char),
    /// The empty word.
    Epsilon,
    /// Concatenation.
    Concat(Box<Expression>, Box<Expression>),
    /// n-ary union; the empty union denotes the empty language.
    Union(Vec<Expression>),
    /// Kleene star.
    Star(Box<Expression>),
}

impl Expression {
    /// The empty language `∅`.
    pub fn empty() -> Self {
        Expression::Union(Vec::new())
    }

    /// Whether this denotes the empty language syntactically, i.e. is a union without members.
    pub fn is_empty_set(&self) -> bool {
        matches!(self, Expression::Union(members) if members.is_empty())
    }

    /// Concatenation that absorbs `ε` and `∅` operands.
    pub fn concat(left: Expression, right: Expression) -> Self {
        match (left, right) {
            (l, _) if l.is_empty_set() => Expression::empty(),
            (_, r) if r.is_empty_set() => Expression::empty(),
            (Expression::Epsilon, r) => r,
            (l, Expression::Epsilon) => l,
            (l, r) => Expression::Concat(Box::new(l), Box::new(r)),
        }
    }

    /// Union that flattens nested unions, drops `∅` members and collapses singletons.
    pub fn union<I: IntoIterator<Item = Expression>>(members: I) -> Self {
        let mut flat = Vec::new();
        for m in members {
            match m {
                Expression::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.pop().unwrap_or_else(Expression::empty)
        } else {
            Expression::Union(flat)
        }
    }

    /// Kleene star, with `∅* = ε* = ε` and `(e*)* = e*`.
    pub fn star(inner: Expression) -> Self {
        match inner {
            Expression::Epsilon => Expression::Epsilon,
            e if e.is_empty_set() => Expression::Epsilon,
            e @ Expression::Star(_) => e,
            e => Expression::Star(Box::new(e)),
        }
    }

    /// Whether the empty word is in the language. Variables count as not nullable.
    pub fn nullable(&self) -> bool {
        match self {
            Expression::Variable(_) | Expression::Letter(_) => false,
            Expression::Epsilon | Expression::Star(_) => true,
            Expression::Concat(l, r) => l.nullable() && r.nullable(),
            Expression::Union(members) => members.iter().any(Expression::nullable),
        }
    }

    /// Whether some variable occurs anywhere in the tree.
    pub fn has_variables(&self) -> bool {
        match self {
            Expression::Variable(_) => true,
            Expression::Letter(_) | Expression::Epsilon => false,
            Expression::Concat(l, r) => l.has_variables() || r.has_variables(),
            Expression::Union(members) => members.iter().any(Expression::has_variables),
            Expression::Star(inner) => inner.has_variables(),
        }
    }

    /// Names of the variables, in order of first occurrence.
    pub fn variables(&self) -> Vec<String> {
        fn collect(e: &Expression, out: &mut Vec<String>) {
            match e {
                Expression::Variable(v) if !out.contains(v) => out.push(v.clone()),
                Expression::Concat(l, r) => {
                    collect(l, out);
                    collect(r, out);
                }
                Expression::Union(members) => members.iter().for_each(|m| collect(m, out)),
                Expression::Star(inner) => collect(inner, out),
                _ => {}
            }
        }
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }

    /// Rewrites until nothing changes: nested unions are flattened, duplicate members removed,
    /// `ε` operands of concatenations dropped, nested stars collapsed, singleton unions unwrapped
    /// and an `ε` member dropped from a union that already contains a nullable member.
    /// An `ε` next to non-nullable members is kept, since dropping it would lose the empty word.
    pub fn simplify(&self) -> Expression {
        let mut current = self.clone();
        loop {
            let next = current.simplify_once();
            if next == current {
                return next;
            }
            current = next;
        }
    }

    fn simplify_once(&self) -> Expression {
        match self {
            Expression::Variable(_) | Expression::Letter(_) | Expression::Epsilon => self.clone(),
            Expression::Concat(l, r) => Expression::concat(l.simplify_once(), r.simplify_once()),
            Expression::Star(inner) => match inner.simplify_once() {
                Expression::Union(members) => Expression::star(Expression::union(
                    members.into_iter().filter(|m| !matches!(m, Expression::Epsilon)),
                )),
                e => Expression::star(e),
            },
            Expression::Union(members) => {
                let flat = match Expression::union(members.iter().map(Expression::simplify_once)) {
                    Expression::Union(flat) => flat,
                    single => return single,
                };
                let mut unique: Vec<Expression> = Vec::new();
                for m in flat {
                    if !unique.contains(&m) {
                        unique.push(m);
                    }
                }
                let nullable_other = unique
                    .iter()
                    .any(|m| !matches!(m, Expression::Epsilon) && m.nullable());
                if nullable_other {
                    unique.retain(|m| !matches!(m, Expression::Epsilon));
                }
                Expression::union(unique)
            }
        }
    }

    /// Replaces every variable bound in `bindings` by its expression.
    pub fn substitute(&self, bindings: &Map<String, Expression>) -> Expression {
        match self {
            Expression::Variable(v) => bindings.get(v).cloned().unwrap_or_else(|| self.clone()),
            Expression::Letter(_) | Expression::Epsilon => self.clone(),
            Expression::Concat(l, r) => Expression::Concat(
                Box::new(l.substitute(bindings)),
                Box::new(r.substitute(bindings)),
            ),
            Expression::Union(members) => {
                Expression::Union(members.iter().map(|m| m.substitute(bindings)).collect())
            }
            Expression::Star(inner) => Expression::Star(Box::new(inner.substitute(bindings))),
        }
    }

    /// The concatenation factors from left to right; non concatenations are a single factor.
    pub(crate) fn factors(&self) -> Vec<&Expression> {
        match self {
            Expression::Concat(l, r) => {
                let mut out = l.factors();
                out.extend(r.factors());
                out
            }
            other => vec![other],
        }
    }

    fn from_factors<'a>(factors: impl IntoIterator<Item = &'a Expression>) -> Expression {
        factors
            .into_iter()
            .cloned()
            .reduce(Expression::concat)
            .unwrap_or(Expression::Epsilon)
    }

    /// Factors common leftmost factors out of unions, `fa + fb` becomes `f(a+b)`, recursing
    /// into the remaining alternatives and into every subterm. The language is unchanged.
    pub fn factorize(&self) -> Expression {
        match self {
            Expression::Variable(_) | Expression::Letter(_) | Expression::Epsilon => self.clone(),
            Expression::Concat(l, r) => Expression::concat(l.factorize(), r.factorize()),
            Expression::Star(inner) => Expression::star(inner.factorize()),
            Expression::Union(members) => {
                let mut unique: Vec<Expression> = Vec::new();
                for m in members.iter().map(Expression::factorize) {
                    if !unique.contains(&m) {
                        unique.push(m);
                    }
                }
                let order = unique
                    .iter()
                    .map(|m| m.factors()[0].to_string())
                    .unique()
                    .collect_vec();
                let mut groups = unique
                    .into_iter()
                    .into_group_map_by(|m| m.factors()[0].to_string());

                Expression::union(order.into_iter().filter_map(|key| {
                    let group = groups.remove(&key)?;
                    if group.len() == 1 {
                        return group.into_iter().next();
                    }
                    let head = group[0].factors()[0].clone();
                    let tails = group
                        .iter()
                        .map(|m| Expression::from_factors(m.factors().into_iter().skip(1)))
                        .collect_vec();
                    // `aε` and `a` differ but leave the same tail
                    if tails.iter().all_equal() {
                        return Some(Expression::concat(head, tails[0].clone()));
                    }
                    Some(Expression::concat(head, Expression::union(tails).factorize()))
                }))
            }
        }
    }

    /// Whether printing this inside a concatenation needs parentheses.
    fn is_union(&self) -> bool {
        match self {
            Expression::Union(members) => match &members[..] {
                [single] => single.is_union(),
                members => members.len() > 1,
            },
            _ => false,
        }
    }

    fn is_atom(&self) -> bool {
        match self {
            Expression::Variable(_) | Expression::Letter(_) | Expression::Epsilon => true,
            Expression::Union(members) => match &members[..] {
                [] => true,
                [single] => single.is_atom(),
                _ => false,
            },
            _ => false,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Variable(v) => write!(f, "{v}"),
            Expression::Letter(c) => write!(f, "{c}"),
            Expression::Epsilon => write!(f, "{EPSILON}"),
            Expression::Concat(l, r) => {
                for part in [l, r] {
                    if part.is_union() {
                        write!(f, "({part})")?;
                    } else {
                        write!(f, "{part}")?;
                    }
                }
                Ok(())
            }
            Expression::Union(members) if members.is_empty() => write!(f, "{EMPTY_SET}"),
            Expression::Union(members) => write!(f, "{}", members.iter().join("+")),
            Expression::Star(inner) => {
                if inner.is_atom() {
                    write!(f, "{inner}*")
                } else {
                    write!(f, "({inner})*")
                }
            }
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state)
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parser::parse(s)
    }
}
