use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveError {
    #[error("invalid variable index in objective term `{term}` (valid indices are 1..={n})")]
    IndexOutOfRange { term: String, n: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    X,
    Y,
}

/// One well-formed objective term: optional sign, optional integer
/// magnitude, then `x_<index>` or `y_<index>`.
#[derive(Debug, Clone, PartialEq)]
struct Term {
    negative: bool,
    magnitude: f64,
    family: Family,
    index_text: String,
}

impl Term {
    /// Compact spelling used in error messages, e.g. `-3x_12`.
    fn render(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        let magnitude = if self.magnitude == 1.0 {
            String::new()
        } else {
            format!("{}", self.magnitude as i64)
        };
        let family = match self.family {
            Family::X => 'x',
            Family::Y => 'y',
        };
        format!("{sign}{magnitude}{family}_{}", self.index_text)
    }
}

/// Parses a linear objective over `x_1..x_n` and `y_1..y_n` into a dense
/// coefficient vector of length 2n (x block first).
///
/// The scan is tolerant: anything that is not a well-formed term is
/// skipped, whitespace may follow the sign and the magnitude, and a
/// missing magnitude means 1. A term whose index falls outside `1..=n`
/// aborts the parse. Repeated mentions of a variable overwrite the
/// earlier coefficient.
pub fn parse_objective(expression: &str, n: usize) -> Result<Vec<f64>, ObjectiveError> {
    let chars: Vec<char> = expression.chars().collect();
    let mut coefficients = vec![0.0; 2 * n];

    let mut pos = 0;
    while pos < chars.len() {
        let Some((term, end)) = match_term(&chars, pos) else {
            pos += 1;
            continue;
        };
        pos = end;

        let index: usize = term
            .index_text
            .parse()
            .map_err(|_| index_out_of_range(&term, n))?;
        if index < 1 || index > n {
            return Err(index_out_of_range(&term, n));
        }

        let coefficient = if term.negative {
            -term.magnitude
        } else {
            term.magnitude
        };
        let column = match term.family {
            Family::X => index - 1,
            Family::Y => n + index - 1,
        };
        coefficients[column] = coefficient;
    }

    Ok(coefficients)
}

fn index_out_of_range(term: &Term, n: usize) -> ObjectiveError {
    ObjectiveError::IndexOutOfRange {
        term: term.render(),
        n,
    }
}

/// Tries to read one term starting exactly at `start`; returns the term
/// and the position one past its final character.
fn match_term(chars: &[char], start: usize) -> Option<(Term, usize)> {
    let mut pos = start;

    let mut negative = false;
    match chars.get(pos) {
        Some('+') => pos += 1,
        Some('-') => {
            negative = true;
            pos += 1;
        }
        _ => {}
    }

    while chars.get(pos).is_some_and(|c| c.is_whitespace()) {
        pos += 1;
    }

    let digits_start = pos;
    while chars.get(pos).is_some_and(|c| c.is_ascii_digit()) {
        pos += 1;
    }
    let magnitude_text: String = chars[digits_start..pos].iter().collect();

    while chars.get(pos).is_some_and(|c| c.is_whitespace()) {
        pos += 1;
    }

    let family = match chars.get(pos) {
        Some('x') => Family::X,
        Some('y') => Family::Y,
        _ => return None,
    };
    pos += 1;

    if chars.get(pos) != Some(&'_') {
        return None;
    }
    pos += 1;

    let index_start = pos;
    while chars.get(pos).is_some_and(|c| c.is_ascii_digit()) {
        pos += 1;
    }
    if pos == index_start {
        return None;
    }
    let index_text: String = chars[index_start..pos].iter().collect();

    let magnitude = if magnitude_text.is_empty() {
        1.0
    } else {
        magnitude_text.parse().ok()?
    };

    Some((
        Term {
            negative,
            magnitude,
            family,
            index_text,
        },
        pos,
    ))
}
