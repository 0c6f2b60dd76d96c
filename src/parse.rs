//! Read and write CSPs as text
//!
//! The format is line oriented. `#` starts a comment.
//!
//! ```text
//! csp example
//! var A 0 1 2
//! var B 0 1 2
//! con A<B A B
//! 0 1
//! 0 2
//! 1 2
//! end
//! ```
//!
//! The optional `csp` line names the problem and must come first. Each `con` block lists one
//! satisfying tuple per line, positionally matching the scope, and is closed by `end`.

use std::fmt;

use itertools::Itertools;

use crate::csp::{is_valid_name, Csp, CspBuilder, Value, VarId};
use crate::error::{InvalidCsp, ParseCspError, ParseError, ParseErrorType};

const DEFAULT_NAME: &str = "csp";
const KEYWORD_CSP: &str = "csp";
const KEYWORD_VAR: &str = "var";
const KEYWORD_CON: &str = "con";
const KEYWORD_END: &str = "end";

struct PendingConstraint<'a> {
    name: &'a str,
    scope: Vec<VarId>,
    tuples: Vec<Vec<Value>>,
    line: usize,
}

/// parse a `Csp` from a string
pub(crate) fn parse_csp(s: &str) -> Result<Csp, ParseCspError> {
    let mut lines = s
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, tokens(line)))
        .filter(|(_, tokens)| !tokens.is_empty())
        .peekable();
    let name = match lines.peek() {
        Some((line, tokens)) if tokens[0] == KEYWORD_CSP => {
            let name = read_name(tokens, *line)?;
            expect_line_end(&tokens[2..], *line)?;
            Some(name.to_string())
        }
        _ => None,
    };
    if name.is_some() {
        lines.next();
    }
    let mut builder = CspBuilder::new(name.unwrap_or_else(|| DEFAULT_NAME.to_string()));
    let mut pending: Option<PendingConstraint<'_>> = None;
    let mut last_line = 0;
    for (line, tokens) in lines {
        last_line = line;
        match (pending.take(), tokens[0]) {
            (Some(constraint), KEYWORD_END) => {
                expect_line_end(&tokens[1..], line)?;
                add_constraint(&mut builder, constraint)?;
            }
            (Some(mut constraint), _) => {
                let tuple = read_tuple(&tokens, constraint.name, constraint.scope.len(), line)?;
                constraint.tuples.push(tuple);
                pending = Some(constraint);
            }
            (None, KEYWORD_VAR) => read_variable(&mut builder, &tokens, line)?,
            (None, KEYWORD_CON) => pending = Some(read_constraint(&builder, &tokens, line)?),
            (None, token) => {
                let error_type = if token.parse::<Value>().is_ok() {
                    ParseErrorType::TupleOutsideConstraint
                } else {
                    ParseErrorType::UnexpectedToken
                };
                return Err(ParseError::new(error_type, token, line).into());
            }
        }
    }
    if pending.is_some() {
        return Err(ParseError::from_type(ParseErrorType::UnexpectedEnd, last_line).into());
    }
    Ok(builder.build())
}

/// Writes `csp` in the format read by `Csp::parse`. Domains are written in full. The `csp` line is
/// left out if the name of the CSP is not a single token.
pub fn write_csp(csp: &Csp) -> String {
    CspText(csp).to_string()
}

struct CspText<'a>(&'a Csp);

impl fmt::Display for CspText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let csp = self.0;
        if is_valid_name(csp.name()) {
            writeln!(f, "{} {}", KEYWORD_CSP, csp.name())?;
        }
        for v in csp.variables() {
            writeln!(f, "{} {} {}", KEYWORD_VAR, v.name(), v.full_domain().iter().join(" "))?;
        }
        for c in csp.constraints() {
            let scope = c.scope().iter().map(|&var| csp.variable(var).name()).join(" ");
            writeln!(f, "{} {} {}", KEYWORD_CON, c.name(), scope)?;
            for tuple in c.satisfying_tuples() {
                writeln!(f, "{}", tuple.iter().join(" "))?;
            }
            writeln!(f, "{}", KEYWORD_END)?;
        }
        Ok(())
    }
}

fn tokens(line: &str) -> Vec<&str> {
    let content = line.split('#').next().unwrap_or("");
    content.split_whitespace().collect()
}

fn read_name<'a>(tokens: &[&'a str], line: usize) -> Result<&'a str, ParseError> {
    tokens
        .get(1)
        .copied()
        .ok_or_else(|| ParseError::new(ParseErrorType::MissingName, tokens[0], line))
}

fn expect_line_end(rest: &[&str], line: usize) -> Result<(), ParseError> {
    match rest.first() {
        Some(token) => Err(ParseError::new(ParseErrorType::UnexpectedToken, token, line)),
        None => Ok(()),
    }
}

fn read_values(tokens: &[&str], line: usize) -> Result<Vec<Value>, ParseError> {
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<Value>()
                .map_err(|_| ParseError::new(ParseErrorType::InvalidValue, token, line))
        })
        .collect()
}

fn read_variable(builder: &mut CspBuilder, tokens: &[&str], line: usize) -> Result<(), ParseCspError> {
    let name = read_name(tokens, line)?;
    let domain = read_values(&tokens[2..], line)?;
    builder
        .add_variable(name, domain)
        .map_err(|source| ParseCspError::InvalidCsp { line, source })?;
    Ok(())
}

fn read_constraint<'a>(
    builder: &CspBuilder,
    tokens: &[&'a str],
    line: usize,
) -> Result<PendingConstraint<'a>, ParseError> {
    let name = read_name(tokens, line)?;
    let scope = tokens[2..]
        .iter()
        .map(|token| {
            builder
                .variable_id(token)
                .ok_or_else(|| ParseError::new(ParseErrorType::UnknownVariable, token, line))
        })
        .collect::<Result<_, _>>()?;
    Ok(PendingConstraint {
        name,
        scope,
        tuples: Vec::new(),
        line,
    })
}

fn read_tuple(
    tokens: &[&str],
    constraint: &str,
    arity: usize,
    line: usize,
) -> Result<Vec<Value>, ParseCspError> {
    let tuple = read_values(tokens, line)?;
    if tuple.len() != arity {
        let source = InvalidCsp::TupleArity {
            constraint: constraint.to_string(),
            expected: arity,
            found: tuple.len(),
        };
        return Err(ParseCspError::InvalidCsp { line, source });
    }
    Ok(tuple)
}

fn add_constraint(
    builder: &mut CspBuilder,
    constraint: PendingConstraint<'_>,
) -> Result<(), ParseCspError> {
    let PendingConstraint {
        name,
        scope,
        tuples,
        line,
    } = constraint;
    builder
        .add_constraint(name, scope, tuples)
        .map_err(|source| ParseCspError::InvalidCsp { line, source })?;
    Ok(())
}
