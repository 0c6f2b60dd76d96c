use std::fmt::{Display, Formatter};
use std::{fmt, io};

use thiserror::Error;

use crate::csp::{Value, VarId};

/// A CSP model that cannot be built
#[derive(Debug, Error, PartialEq)]
pub enum InvalidCsp {
    #[error("invalid name \"{0}\", names must be non-empty without whitespace or '#'")]
    InvalidName(String),
    #[error("duplicate variable \"{0}\"")]
    DuplicateVariable(String),
    #[error("variable \"{variable}\" has value {value} in its domain more than once")]
    DuplicateValue { variable: String, value: Value },
    #[error("constraint \"{0}\" has an empty scope")]
    EmptyScope(String),
    #[error("constraint \"{constraint}\" references unknown variable {var}")]
    UnknownVariable { constraint: String, var: VarId },
    #[error("constraint \"{constraint}\" has variable \"{variable}\" in its scope more than once")]
    RepeatedVariable { constraint: String, variable: String },
    #[error("constraint \"{constraint}\" has a tuple of length {found}, expected {expected}")]
    TupleArity {
        constraint: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug)]
pub enum CspFromFileError {
    #[error("error reading CSP file")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseCspError),
}

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ParseCspError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid CSP at line {line}: {source}")]
    InvalidCsp { line: usize, source: InvalidCsp },
}

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ParseError {
    error_type: ParseErrorType,
    token: Option<String>,
    line: usize,
}

impl ParseError {
    pub(crate) fn new(error_type: ParseErrorType, token: impl Display, line: usize) -> Self {
        Self {
            error_type,
            token: Some(token.to_string()),
            line,
        }
    }

    pub(crate) const fn from_type(error_type: ParseErrorType, line: usize) -> Self {
        Self {
            error_type,
            token: None,
            line,
        }
    }

    pub fn error_type(&self) -> &ParseErrorType {
        &self.error_type
    }

    /// The 1-based line where the error was found
    pub fn line(&self) -> usize {
        self.line
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParseErrorType {
    InvalidValue,
    MissingName,
    TupleOutsideConstraint,
    UnexpectedEnd,
    UnexpectedToken,
    UnknownVariable,
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorType::InvalidValue => "Invalid value",
            ParseErrorType::MissingName => "Missing name",
            ParseErrorType::TupleOutsideConstraint => "Tuple outside of a constraint",
            ParseErrorType::UnexpectedEnd => "Unexpected end",
            ParseErrorType::UnexpectedToken => "Unexpected token",
            ParseErrorType::UnknownVariable => "Unknown variable",
        };
        write!(f, "{}", s)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_type)?;
        if let Some(token) = &self.token {
            write!(f, ": \"{}\"", token)?;
        }
        write!(f, " at line {}", self.line)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown propagator \"{0}\", expected one of bt, fc, gac")]
pub struct UnknownPropagator(pub String);
