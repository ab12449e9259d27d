//! Arithmetic over the calculator keypad alphabet.
//!
//! The accepted grammar is deliberately tiny:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := number (('*' | '/') number)*
//! number := ['0'-'9']+
//! ```
//!
//! There are no parentheses, no unary signs and no decimal point, because the
//! keypad can't produce them. Anything else is rejected with an [`EvalError`].
use thiserror::Error;

/// Why a calculator input could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Invalid expression: nothing to evaluate")]
    Empty,
    #[error("Invalid expression: unexpected '{found}' at position {position}")]
    InvalidCharacter { found: char, position: usize },
    #[error("Invalid expression: operator at position {position} has no left operand")]
    MissingOperand { position: usize },
    #[error("Invalid expression: trailing operator")]
    TrailingOperator,
    #[error("Invalid expression: result is not a finite number")]
    NonFinite,
}

/// The four keypad operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Maps a keypad symbol to its operator.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    const fn binds_tight(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Op(Operator, usize),
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut digits = String::new();

    for (position, ch) in input.chars().enumerate() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let op = Operator::from_symbol(ch)
            .ok_or(EvalError::InvalidCharacter { found: ch, position })?;
        if !digits.is_empty() {
            tokens.push(number(&digits)?);
            digits.clear();
        }
        tokens.push(Token::Op(op, position));
    }
    if !digits.is_empty() {
        tokens.push(number(&digits)?);
    }

    Ok(tokens)
}

// Leading zeros are plain decimal: "012" is twelve.
fn number(digits: &str) -> Result<Token, EvalError> {
    let value: f64 = digits.parse().map_err(|_| EvalError::NonFinite)?;
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(Token::Number(value))
}

/// Evaluates `input` with `*`/`/` binding tighter than `+`/`-`, left to right
/// within the same precedence.
///
/// ```rust
/// use engine::evaluate;
///
/// assert_eq!(evaluate("12+3").unwrap(), 15.0);
/// assert_eq!(evaluate("2+3*4-6/2").unwrap(), 11.0);
/// assert!(evaluate("8/0").is_err());
/// ```
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    if input.is_empty() {
        return Err(EvalError::Empty);
    }

    let tokens = tokenize(input)?;
    let mut tokens = tokens.into_iter();

    // `sum` holds everything left of the last `+`/`-`; `term` the product
    // being built right of it.
    let mut sum = 0.0;
    let mut pending = Operator::Add;
    let mut term = operand(tokens.next(), 0)?;

    while let Some(token) = tokens.next() {
        let Token::Op(op, position) = token else {
            // two numbers are never adjacent after tokenizing
            return Err(EvalError::TrailingOperator);
        };
        let rhs = operand(tokens.next(), position + 1)?;
        if op.binds_tight() {
            term = op.apply(term, rhs)?;
        } else {
            sum = pending.apply(sum, term)?;
            pending = op;
            term = rhs;
        }
    }

    pending.apply(sum, term)
}

fn operand(token: Option<Token>, position: usize) -> Result<f64, EvalError> {
    match token {
        Some(Token::Number(value)) => Ok(value),
        Some(Token::Op(_, position)) => Err(EvalError::MissingOperand { position }),
        None if position == 0 => Err(EvalError::Empty),
        None => Err(EvalError::TrailingOperator),
    }
}

/// Renders a result the way the calculator display shows it: integral
/// values without a fractional part, and no negative zero.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_single_number() {
        assert_eq!(evaluate("42").unwrap(), 42.0);
        assert_eq!(evaluate("007").unwrap(), 7.0);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("2*3+4").unwrap(), 10.0);
        assert_eq!(evaluate("1+2*3*4-5").unwrap(), 20.0);
    }

    #[test]
    fn same_precedence_is_left_associative() {
        assert_eq!(evaluate("10-4-3").unwrap(), 3.0);
        assert_eq!(evaluate("64/4/2").unwrap(), 8.0);
        assert_eq!(evaluate("8/2*4").unwrap(), 16.0);
    }

    #[test]
    fn division_keeps_fraction() {
        assert_eq!(evaluate("7/2").unwrap(), 3.5);
        assert_eq!(format_number(evaluate("7/2").unwrap()), "3.5");
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
    }

    #[test]
    fn rejects_trailing_operator() {
        assert_eq!(evaluate("12+"), Err(EvalError::TrailingOperator));
        assert_eq!(evaluate("3*"), Err(EvalError::TrailingOperator));
    }

    #[test]
    fn rejects_operator_without_left_operand() {
        assert_eq!(
            evaluate("-5+3"),
            Err(EvalError::MissingOperand { position: 0 })
        );
        assert_eq!(
            evaluate("12++3"),
            Err(EvalError::MissingOperand { position: 3 })
        );
        assert_eq!(
            evaluate("4*/2"),
            Err(EvalError::MissingOperand { position: 2 })
        );
    }

    #[test]
    fn rejects_characters_outside_keypad() {
        assert_eq!(
            evaluate("1+alert(1)"),
            Err(EvalError::InvalidCharacter {
                found: 'a',
                position: 2
            })
        );
        assert_eq!(
            evaluate("(1+2)"),
            Err(EvalError::InvalidCharacter {
                found: '(',
                position: 0
            })
        );
        assert!(matches!(
            evaluate("1.5+1"),
            Err(EvalError::InvalidCharacter { found: '.', .. })
        ));
    }

    #[test]
    fn rejects_non_finite_results() {
        assert_eq!(evaluate("8/0"), Err(EvalError::NonFinite));
        assert_eq!(evaluate("0/0"), Err(EvalError::NonFinite));
        assert_eq!(evaluate("1+5/0*2"), Err(EvalError::NonFinite));
    }

    #[test]
    fn formats_without_negative_zero() {
        assert_eq!(format_number(evaluate("0-0").unwrap()), "0");
        assert_eq!(format_number(evaluate("0*5-0").unwrap()), "0");
        assert_eq!(format_number(evaluate("3-10").unwrap()), "-7");
        assert_eq!(format_number(15.0), "15");
    }
}
