//! Construction contract violations.
//!
//! A tree that breaks a construction rule (a mandatory clause left empty, a
//! combinator applied to an empty condition) is a bug in the code that built
//! it, not bad input. Those cases abort with a panic whose message starts
//! with `contract violation:`; they are never reported as [`ParseError`]s.
//!
//! [`ParseError`]: crate::parser::ParseError

use tracing::error;

use crate::ast::Statement;

/// Aborts the current operation with a contract violation.
#[cold]
#[track_caller]
pub(crate) fn violation(message: &str) -> ! {
    error!(violation = message, "contract violation");
    panic!("contract violation: {message}");
}

/// Aborts unless `clause` is non-empty.
#[track_caller]
pub(crate) fn require(clause: &(impl Statement + ?Sized), what: &str) {
    if clause.is_empty() {
        violation(&format!("{what} must not be empty"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Raw;

    #[test]
    #[should_panic(expected = "contract violation: table must not be empty")]
    fn test_require_empty() {
        require(&Raw::new(""), "table");
    }

    #[test]
    fn test_require_non_empty() {
        require(&Raw::new("NOW()"), "value");
    }
}
