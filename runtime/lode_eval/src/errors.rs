//! Evaluation and loading errors.
//!
//! Factory functions populate both `kind` (for programmatic matching) and
//! `message` (what the user sees). Spans are optional: loading failures have
//! no position in the *importing* unit's source.

use std::fmt;
use std::path::PathBuf;

use lode_ir::Span;
use lode_resolve::UnitNotFound;

/// Structured error category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalErrorKind {
    UndefinedName {
        name: String,
    },
    /// A member missing from a unit namespace. Includes members missing
    /// because the unit is still mid-execution (circular import).
    UndefinedMember {
        unit: String,
        member: String,
    },
    NotCallable {
        found: String,
    },
    ArityMismatch {
        function: String,
        expected: usize,
        supplied: usize,
    },
    TypeMismatch {
        expected: String,
        found: String,
    },
    BinaryTypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },
    DivisionByZero,
    IntegerOverflow {
        op: &'static str,
    },
    ReturnOutsideFunction,
    /// Resolution failure, carrying every path probed.
    UnitNotFound {
        name: String,
        searched: Vec<PathBuf>,
    },
    /// The unit resolved but could not be read, lexed or parsed.
    LoadFailed {
        unit: String,
    },
}

/// An error raised during loading or evaluation.
#[derive(Debug, Clone)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    pub span: Option<Span>,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

pub fn undefined_name(name: &str, span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::UndefinedName {
            name: name.to_string(),
        },
        message: format!("undefined name '{name}'"),
        span: Some(span),
    }
}

pub fn undefined_member(unit: &str, member: &str, span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::UndefinedMember {
            unit: unit.to_string(),
            member: member.to_string(),
        },
        message: format!("unit '{unit}' has no member '{member}'"),
        span: Some(span),
    }
}

pub fn not_callable(found: &str, span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::NotCallable {
            found: found.to_string(),
        },
        message: format!("value of type {found} is not callable"),
        span: Some(span),
    }
}

pub fn arity_mismatch(function: &str, expected: usize, supplied: usize, span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::ArityMismatch {
            function: function.to_string(),
            expected,
            supplied,
        },
        message: format!(
            "'{function}' expects {expected} argument(s), {supplied} supplied"
        ),
        span: Some(span),
    }
}

pub fn type_mismatch(expected: &str, found: &str, span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        },
        message: format!("expected {expected}, found {found}"),
        span: Some(span),
    }
}

pub fn binary_type_mismatch(op: &'static str, left: &str, right: &str, span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::BinaryTypeMismatch {
            op,
            left: left.to_string(),
            right: right.to_string(),
        },
        message: format!("operator '{op}' cannot combine {left} and {right}"),
        span: Some(span),
    }
}

pub fn division_by_zero(span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::DivisionByZero,
        message: "division by zero".to_string(),
        span: Some(span),
    }
}

pub fn integer_overflow(op: &'static str, span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::IntegerOverflow { op },
        message: format!("integer overflow in '{op}'"),
        span: Some(span),
    }
}

pub fn return_outside_function(span: Span) -> EvalError {
    EvalError {
        kind: EvalErrorKind::ReturnOutsideFunction,
        message: "`return` outside of a function body".to_string(),
        span: Some(span),
    }
}

pub fn unit_not_found(err: &UnitNotFound) -> EvalError {
    EvalError {
        kind: EvalErrorKind::UnitNotFound {
            name: err.name.clone(),
            searched: err.searched.clone(),
        },
        message: err.to_string(),
        span: None,
    }
}

pub fn load_failed(unit: &str, detail: &dyn fmt::Display) -> EvalError {
    EvalError {
        kind: EvalErrorKind::LoadFailed {
            unit: unit.to_string(),
        },
        message: format!("failed to load unit '{unit}': {detail}"),
        span: None,
    }
}
