//! Signed-sum expressions.
//!
//! The only grammar understood here is cell references joined by `+` and `-`:
//!
//! ```text
//! expression := reference (("+" | "-") reference)*
//! reference  := [A-Za-z]+ [0-9]+
//! ```
//!
//! No literals, no parentheses, no other operators. The textual form produced
//! by [`Expression`]'s `Display` (e.g. `B3+B4-B5`) is what this parser reads.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::cell_ref::CellRef;
use super::table::ValueTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn apply(self, value: f64) -> f64 {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }

    fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    pub cell: CellRef,
    pub sign: Sign,
}

/// Errors from parsing expression text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Empty expression")]
    Empty,

    #[error("Invalid cell reference at offset {offset}: {text}")]
    InvalidReference { offset: usize, text: String },

    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { offset: usize, ch: char },

    #[error("Expression ends with an operator")]
    TrailingOperator,
}

/// An ordered list of signed cell references. The first term is always positive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expression {
    terms: Vec<Term>,
}

impl Expression {
    /// Build an expression from cells and the signs of every term after the first.
    ///
    /// Returns None when there are no cells or the sign count does not match.
    pub fn new(cells: &[CellRef], signs: &[Sign]) -> Option<Expression> {
        let (first, rest) = cells.split_first()?;
        if rest.len() != signs.len() {
            return None;
        }
        let mut terms = Vec::with_capacity(cells.len());
        terms.push(Term {
            cell: *first,
            sign: Sign::Plus,
        });
        terms.extend(
            rest.iter()
                .zip(signs)
                .map(|(cell, sign)| Term { cell: *cell, sign: *sign }),
        );
        Some(Expression { terms })
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellRef> {
        self.terms.iter().map(|t| &t.cell)
    }

    /// Sum the terms against `table`; absent or non-numeric cells count as zero.
    pub fn evaluate(&self, table: &ValueTable) -> f64 {
        signed_sum(self.terms.iter().map(|t| (table.resolve(&t.cell), t.sign)))
    }
}

/// Left-to-right signed sum. Shared with the searcher so a candidate's score
/// and its later evaluation agree bit for bit.
pub(crate) fn signed_sum(values: impl IntoIterator<Item = (f64, Sign)>) -> f64 {
    values
        .into_iter()
        .fold(0.0, |acc, (value, sign)| acc + sign.apply(value))
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bytes = text.as_bytes();
        let mut terms = Vec::new();
        let mut pos = 0;
        let mut sign = Sign::Plus;

        loop {
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos == bytes.len() {
                return Err(if terms.is_empty() {
                    ExpressionError::Empty
                } else {
                    ExpressionError::TrailingOperator
                });
            }

            let start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                pos += 1;
            }
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if start == pos {
                return Err(unexpected(text, start));
            }
            let name = &text[start..pos];
            let cell = CellRef::from_str(name).ok_or_else(|| ExpressionError::InvalidReference {
                offset: start,
                text: name.to_string(),
            })?;
            terms.push(Term { cell, sign });

            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            match bytes.get(pos) {
                None => break,
                Some(b'+') => sign = Sign::Plus,
                Some(b'-') => sign = Sign::Minus,
                Some(_) => return Err(unexpected(text, pos)),
            }
            pos += 1;
        }

        Ok(Expression { terms })
    }
}

fn unexpected(text: &str, offset: usize) -> ExpressionError {
    let ch = text[offset..].chars().next().unwrap_or('\0');
    ExpressionError::UnexpectedChar { offset, ch }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, term) in self.terms.iter().enumerate() {
            if idx > 0 {
                write!(f, "{}", term.sign.symbol())?;
            }
            write!(f, "{}", term.cell)?;
        }
        Ok(())
    }
}

/// Evaluate expression text against `table`. A leading `=` is allowed.
///
/// Returns None only when the text is malformed.
pub fn evaluate_str(text: &str, table: &ValueTable) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_prefix('=').unwrap_or(text);
    text.parse::<Expression>().ok().map(|expr| expr.evaluate(table))
}

/// An expression bound to the cell it was inferred for.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    pub target: CellRef,
    pub expression: Expression,
    /// The expression's value at the time it was bound.
    pub value: f64,
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "={}", self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::Region;

    fn table(values: &[(&str, f64)]) -> ValueTable {
        let mut table = ValueTable::new(Region::new(1, 1, 100, 26));
        for (name, value) in values {
            table.bind(CellRef::from_str(name).unwrap(), *value);
        }
        table
    }

    #[test]
    fn test_evaluate_signed_sum() {
        let t = table(&[("A1", 10.0), ("A2", 5.0), ("A3", 3.0)]);
        assert_eq!(evaluate_str("A1+A2-A3", &t), Some(12.0));
    }

    #[test]
    fn test_missing_reference_is_zero() {
        let t = table(&[("A1", 4.0)]);
        assert_eq!(evaluate_str("A1+B9", &t), Some(4.0));
    }

    #[test]
    fn test_leading_equals_and_whitespace() {
        let t = table(&[("B3", 2.0), ("B4", 7.0)]);
        assert_eq!(evaluate_str("=B3 + B4", &t), Some(9.0));
        assert_eq!(evaluate_str("  B4 - B3 ", &t), Some(5.0));
    }

    #[test]
    fn test_malformed_yields_none() {
        let t = table(&[]);
        for text in ["", "=", "A1+", "A1*A2", "(A1+A2)", "A1+2", "-A1", "A1++A2", "A0", "__import__"] {
            assert_eq!(evaluate_str(text, &t), None, "{text:?} should not evaluate");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Expression>(), Err(ExpressionError::Empty));
        assert_eq!("A1-".parse::<Expression>(), Err(ExpressionError::TrailingOperator));
        assert_eq!(
            "A1*A2".parse::<Expression>(),
            Err(ExpressionError::UnexpectedChar { offset: 2, ch: '*' })
        );
        assert_eq!(
            "A1+B0".parse::<Expression>(),
            Err(ExpressionError::InvalidReference {
                offset: 3,
                text: "B0".to_string()
            })
        );
    }

    #[test]
    fn test_display_is_canonical() {
        let expr: Expression = "b3 + B4 -  b5".parse().unwrap();
        assert_eq!(expr.to_string(), "B3+B4-B5");
        let cells = [CellRef::new(2, 4), CellRef::new(2, 5)];
        let formula = Formula {
            target: CellRef::new(2, 6),
            expression: Expression::new(&cells, &[Sign::Plus]).unwrap(),
            value: 80.0,
        };
        assert_eq!(formula.to_string(), "=B4+B5");
    }

    #[test]
    fn test_new_checks_sign_count() {
        let cells = [CellRef::new(1, 1), CellRef::new(1, 2)];
        assert!(Expression::new(&cells, &[]).is_none());
        assert!(Expression::new(&[], &[]).is_none());
        let expr = Expression::new(&cells, &[Sign::Minus]).unwrap();
        assert_eq!(expr.terms()[0].sign, Sign::Plus);
        assert_eq!(expr.terms()[1].sign, Sign::Minus);
    }
}
