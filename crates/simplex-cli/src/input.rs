use simplex_solver::{Constraint, ConstraintOp};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid input. Please enter an integer.")]
    NotAnInteger,
    #[error("{0} must be a positive integer.")]
    NotPositive(&'static str),
    #[error("Invalid input. Please enter numbers separated by spaces.")]
    NotANumber,
    #[error("Please enter exactly {expected} values.")]
    WrongCount { expected: usize },
    #[error("Invalid constraint type {0:?}, expected one of '<=', '>=', '=='.")]
    BadOperator(String),
    #[error("Please enter 'yes' or 'no'.")]
    NotYesNo,
}

/// Parse a strictly positive count such as the number of variables
pub fn parse_count(line: &str, what: &'static str) -> Result<usize, InputError> {
    let n: i64 = line.trim().parse().map_err(|_| InputError::NotAnInteger)?;
    if n <= 0 {
        return Err(InputError::NotPositive(what));
    }
    Ok(n as usize)
}

/// Parse exactly `expected` whitespace-separated numbers
pub fn parse_coefficients(line: &str, expected: usize) -> Result<Vec<f64>, InputError> {
    let values = line
        .split_whitespace()
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != expected {
        return Err(InputError::WrongCount { expected });
    }
    Ok(values)
}

/// Parse `a1 .. an OP rhs`
pub fn parse_constraint(line: &str, n_vars: usize) -> Result<Constraint, InputError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != n_vars + 2 {
        return Err(InputError::WrongCount { expected: n_vars + 2 });
    }

    let coefficients = tokens[..n_vars]
        .iter()
        .map(|t| parse_number(t))
        .collect::<Result<Vec<_>, _>>()?;
    let op: ConstraintOp = tokens[n_vars]
        .parse()
        .map_err(|_| InputError::BadOperator(tokens[n_vars].to_string()))?;
    let rhs = parse_number(tokens[n_vars + 1])?;

    Ok(Constraint { coefficients, op, rhs })
}

pub fn parse_yes_no(line: &str) -> Result<bool, InputError> {
    match line.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

fn parse_number(token: &str) -> Result<f64, InputError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InputError::NotANumber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(" 3 ", "Number of variables"), Ok(3));
        assert_eq!(parse_count("0", "Number of variables"), Err(InputError::NotPositive("Number of variables")));
        assert_eq!(parse_count("-2", "x"), Err(InputError::NotPositive("x")));
        assert_eq!(parse_count("two", "x"), Err(InputError::NotAnInteger));
    }

    #[test]
    fn test_parse_coefficients() {
        assert_eq!(parse_coefficients("3 5.5 -1e1", 3), Ok(vec![3.0, 5.5, -10.0]));
        assert_eq!(parse_coefficients("3 5", 3), Err(InputError::WrongCount { expected: 3 }));
        assert_eq!(parse_coefficients("3 x", 2), Err(InputError::NotANumber));
        assert_eq!(parse_coefficients("1 inf", 2), Err(InputError::NotANumber));
    }

    #[test]
    fn test_parse_constraint() {
        let c = parse_constraint("1 2 >= 6", 2).unwrap();
        assert_eq!(c.coefficients, vec![1.0, 2.0]);
        assert_eq!(c.op, ConstraintOp::Ge);
        assert_eq!(c.rhs, 6.0);

        assert_eq!(parse_constraint("1 2 6", 2), Err(InputError::WrongCount { expected: 4 }));
        assert_eq!(parse_constraint("1 2 < 6", 2), Err(InputError::BadOperator("<".to_string())));
        assert_eq!(parse_constraint("1 2 == b", 2), Err(InputError::NotANumber));
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("YES"), Ok(true));
        assert_eq!(parse_yes_no(" no\n"), Ok(false));
        assert_eq!(parse_yes_no("maybe"), Err(InputError::NotYesNo));
    }
}
