//! Recursive descent reader for expressions:
//!
//! ```text
//! union  := concat ('+' concat)*
//! concat := star star*
//! star   := atom '*'*
//! atom   := '(' union ')' | 'ε' | '∅' | 'X' digit+ | letter
//! ```
//!
//! Whitespace is ignored, positions in errors refer to the input without whitespace.

use std::{iter::Peekable, str::Chars};

use crate::{ParseError, ParseErrorKind, EPSILON};

use super::{expression::EMPTY_SET, Expression};

pub(crate) fn parse(input: &str) -> Result<Expression, ParseError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::Empty));
    }
    let mut parser = Parser {
        chars: compact.chars().peekable(),
        position: 0,
    };
    let expr = parser.union()?;
    match parser.peek() {
        None => Ok(expr),
        Some(')') => Err(parser.error(ParseErrorKind::UnmatchedClose)),
        Some(c) => Err(parser.error(ParseErrorKind::UnexpectedChar(c))),
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
}

impl Parser<'_> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position += 1;
        Some(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.position, kind)
    }

    fn union(&mut self) -> Result<Expression, ParseError> {
        let mut members = vec![self.concat()?];
        while self.peek() == Some('+') {
            self.bump();
            members.push(self.concat()?);
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            Expression::Union(members)
        })
    }

    fn concat(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.star()?;
        while matches!(self.peek(), Some(c) if starts_atom(c)) {
            let right = self.star()?;
            expr = Expression::Concat(Box::new(expr), Box::new(right));
        }
        Ok(expr)
    }

    fn star(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.atom()?;
        while self.peek() == Some('*') {
            self.bump();
            expr = Expression::Star(Box::new(expr));
        }
        Ok(expr)
    }

    fn atom(&mut self) -> Result<Expression, ParseError> {
        let start = self.position;
        match self.bump() {
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
            Some('(') => {
                let inner = self.union()?;
                match self.bump() {
                    Some(')') => Ok(inner),
                    _ => Err(ParseError::new(start, ParseErrorKind::UnmatchedOpen)),
                }
            }
            Some(EPSILON) => Ok(Expression::Epsilon),
            Some(EMPTY_SET) => Ok(Expression::empty()),
            Some('X') => {
                let mut name = String::from("X");
                while let Some(d) = self.peek().filter(char::is_ascii_digit) {
                    self.bump();
                    name.push(d);
                }
                if name.len() == 1 {
                    return Err(match self.peek() {
                        Some(c) => self.error(ParseErrorKind::UnexpectedChar(c)),
                        None => self.error(ParseErrorKind::UnexpectedEnd),
                    });
                }
                Ok(Expression::Variable(name))
            }
            Some(c) if c.is_ascii_lowercase() => Ok(Expression::Letter(c)),
            Some(c @ ('+' | '*')) => Err(ParseError::new(start, ParseErrorKind::MissingOperand(c))),
            Some(c) => Err(ParseError::new(start, ParseErrorKind::UnexpectedChar(c))),
        }
    }
}

fn starts_atom(c: char) -> bool {
    c == '(' || c == EPSILON || c == EMPTY_SET || c == 'X' || c.is_ascii_lowercase()
}
