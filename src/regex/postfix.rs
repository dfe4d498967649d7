//! The surface syntax shared by the automaton builders: letters `a`-`z`, `ε`, `+` for union,
//! postfix `*` and `?`, parentheses and implicit concatenation. The input is tokenized, explicit
//! concatenation operators are inserted, and a shunting yard turns the token stream into
//! postfix order, which is then folded bottom-up by a [`Fold`].

use crate::{ParseError, ParseErrorKind, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Letter(char),
    Epsilon,
    Union,
    Concat,
    Star,
    Optional,
    Open,
    Close,
}

impl Token {
    fn precedence(self) -> u8 {
        match self {
            Token::Star | Token::Optional => 3,
            Token::Concat => 2,
            Token::Union => 1,
            _ => 0,
        }
    }

    fn symbol(self) -> char {
        match self {
            Token::Letter(c) => c,
            Token::Epsilon => EPSILON,
            Token::Union => '+',
            Token::Concat => '.',
            Token::Star => '*',
            Token::Optional => '?',
            Token::Open => '(',
            Token::Close => ')',
        }
    }

    /// Whether a concatenation is implied between `self` and a following `next`.
    fn joins(self, next: Token) -> bool {
        matches!(
            self,
            Token::Letter(_) | Token::Epsilon | Token::Close | Token::Star | Token::Optional
        ) && matches!(next, Token::Letter(_) | Token::Epsilon | Token::Open)
    }
}

/// Bottom-up evaluation of a postfix expression.
pub(crate) trait Fold {
    type Value;

    fn letter(&mut self, c: char) -> Self::Value;
    fn epsilon(&mut self) -> Self::Value;
    fn star(&mut self, inner: Self::Value) -> Self::Value;
    fn optional(&mut self, inner: Self::Value) -> Self::Value;
    fn concat(&mut self, left: Self::Value, right: Self::Value) -> Self::Value;
    fn union(&mut self, left: Self::Value, right: Self::Value) -> Self::Value;
}

/// Tokens with their character positions, whitespace skipped.
pub(crate) fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(i, c)| {
            let token = match c {
                'a'..='z' => Token::Letter(c),
                EPSILON => Token::Epsilon,
                '+' => Token::Union,
                '*' => Token::Star,
                '?' => Token::Optional,
                '(' => Token::Open,
                ')' => Token::Close,
                _ => return Err(ParseError::new(i, ParseErrorKind::UnexpectedChar(c))),
            };
            Ok((i, token))
        })
        .collect()
}

/// Distinct letters of the input in alphabetical order.
pub(crate) fn letters(input: &str) -> Vec<char> {
    let mut letters: Vec<char> = input.chars().filter(char::is_ascii_lowercase).collect();
    letters.sort_unstable();
    letters.dedup();
    letters
}

fn with_concatenation(tokens: Vec<(usize, Token)>) -> Vec<(usize, Token)> {
    let mut out: Vec<(usize, Token)> = Vec::with_capacity(tokens.len() * 2);
    for (pos, token) in tokens {
        if let Some((_, last)) = out.last() {
            if last.joins(token) {
                out.push((pos, Token::Concat));
            }
        }
        out.push((pos, token));
    }
    out
}

fn to_postfix(tokens: Vec<(usize, Token)>) -> Result<Vec<(usize, Token)>, ParseError> {
    let mut output = Vec::new();
    let mut stack: Vec<(usize, Token)> = Vec::new();
    let mut previous = None;
    for (pos, token) in tokens {
        match token {
            Token::Letter(_) | Token::Epsilon | Token::Star | Token::Optional => {
                output.push((pos, token))
            }
            Token::Open => stack.push((pos, token)),
            Token::Close => {
                if previous == Some(Token::Open) {
                    return Err(ParseError::new(pos, ParseErrorKind::UnexpectedChar(')')));
                }
                loop {
                    match stack.pop() {
                        Some((_, Token::Open)) => break,
                        Some(op) => output.push(op),
                        None => return Err(ParseError::new(pos, ParseErrorKind::UnmatchedClose)),
                    }
                }
            }
            Token::Union | Token::Concat => {
                while let Some(&(_, top)) = stack.last() {
                    if top == Token::Open || top.precedence() < token.precedence() {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push((pos, token));
            }
        }
        previous = Some(token);
    }
    while let Some((pos, token)) = stack.pop() {
        if token == Token::Open {
            return Err(ParseError::new(pos, ParseErrorKind::UnmatchedOpen));
        }
        output.push((pos, token));
    }
    Ok(output)
}

/// Parses `input` and folds it bottom-up with `folder`.
pub(crate) fn fold<F: Fold>(input: &str, folder: &mut F) -> Result<F::Value, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::Empty));
    }
    let postfix = to_postfix(with_concatenation(tokens))?;

    let mut stack: Vec<F::Value> = Vec::new();
    for (pos, token) in postfix {
        let missing = || ParseError::new(pos, ParseErrorKind::MissingOperand(token.symbol()));
        let value = match token {
            Token::Letter(c) => folder.letter(c),
            Token::Epsilon => folder.epsilon(),
            Token::Star | Token::Optional => {
                let inner = stack.pop().ok_or_else(missing)?;
                if token == Token::Star {
                    folder.star(inner)
                } else {
                    folder.optional(inner)
                }
            }
            Token::Union | Token::Concat => {
                let right = stack.pop().ok_or_else(missing)?;
                let left = stack.pop().ok_or_else(missing)?;
                if token == Token::Union {
                    folder.union(left, right)
                } else {
                    folder.concat(left, right)
                }
            }
            Token::Open | Token::Close => {
                return Err(ParseError::new(pos, ParseErrorKind::UnexpectedChar(token.symbol())))
            }
        };
        stack.push(value);
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => Ok(value),
        _ => Err(ParseError::new(0, ParseErrorKind::UnexpectedEnd)),
    }
}
