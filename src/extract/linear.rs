use crate::{Error, Expression, Result};

/// A right-linear right hand side `c1 X1 + ... + cn Xn + c`, variables kept in order of first
/// appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinearForm {
    terms: Vec<(String, Expression)>,
    constant: Expression,
}

impl LinearForm {
    fn constant(e: Expression) -> Self {
        Self {
            terms: Vec::new(),
            constant: e,
        }
    }

    fn variable(name: &str) -> Self {
        Self {
            terms: vec![(name.to_string(), Expression::Epsilon)],
            constant: Expression::empty(),
        }
    }

    /// Brings `e` into linear form. `owner` names the equation, for error reporting.
    pub fn from_expression(owner: &str, e: &Expression) -> Result<Self> {
        let not_linear = |e: &Expression| Error::NotRightLinear {
            variable: owner.to_string(),
            offending: e.variables().into_iter().next().unwrap_or_default(),
        };
        match e {
            Expression::Variable(v) => Ok(Self::variable(v)),
            Expression::Letter(_) | Expression::Epsilon => Ok(Self::constant(e.clone())),
            Expression::Star(_) if e.has_variables() => Err(not_linear(e)),
            Expression::Star(_) => Ok(Self::constant(e.clone())),
            Expression::Union(members) => members.iter().try_fold(
                Self::constant(Expression::empty()),
                |acc, m| Ok(acc.plus(Self::from_expression(owner, m)?)),
            ),
            Expression::Concat(l, _) if l.has_variables() => Err(not_linear(l)),
            Expression::Concat(l, r) => Ok(Self::from_expression(owner, r)?.prefixed(l)),
        }
    }

    pub fn plus(mut self, other: LinearForm) -> Self {
        for (v, c) in other.terms {
            match self.terms.iter_mut().find(|(w, _)| *w == v) {
                Some((_, existing)) => {
                    *existing = Expression::union([existing.clone(), c]);
                }
                None => self.terms.push((v, c)),
            }
        }
        self.constant = Expression::union([self.constant, other.constant]);
        self
    }

    /// Left multiplication by `e`.
    pub fn prefixed(self, e: &Expression) -> Self {
        Self {
            terms: self
                .terms
                .into_iter()
                .map(|(v, c)| (v, Expression::concat(e.clone(), c)))
                .collect(),
            constant: Expression::concat(e.clone(), self.constant),
        }
    }

    /// Removes and returns the coefficient of `var`.
    pub fn take(&mut self, var: &str) -> Option<Expression> {
        let i = self.terms.iter().position(|(v, _)| v == var)?;
        Some(self.terms.remove(i).1)
    }

    /// Arden's lemma: `X = cX + r` has the solution `X = c*r`.
    pub fn arden(mut self, var: &str) -> (Self, Option<Expression>) {
        match self.take(var) {
            Some(c) => (self.prefixed(&Expression::star(c.clone())), Some(c)),
            None => (self, None),
        }
    }

    /// Replaces `var` by `value`. Returns whether `var` occurred.
    pub fn substitute(&mut self, var: &str, value: &LinearForm) -> bool {
        match self.take(var) {
            Some(c) => {
                let replaced = std::mem::replace(self, Self::constant(Expression::empty()));
                *self = replaced.plus(value.clone().prefixed(&c));
                true
            }
            None => false,
        }
    }

    pub fn mentions(&self, var: &str) -> bool {
        self.terms.iter().any(|(v, _)| v == var)
    }

    pub fn to_expression(&self) -> Expression {
        Expression::union(
            self.terms
                .iter()
                .map(|(v, c)| Expression::concat(c.clone(), Expression::Variable(v.clone())))
                .chain(std::iter::once(self.constant.clone())),
        )
    }
}
