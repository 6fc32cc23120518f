//! Boolean composition of per-condition results.

use crate::error::EngineError;

/// Combine fully-evaluated condition results under the rule's boolean
/// operator.
///
/// Every condition has already been evaluated when this runs; the
/// engine never short-circuits an evaluation away, so composition is a
/// pure fold. A single result stands on its own regardless of the
/// declared operator. Anything other than AND/OR over multiple results
/// is a definition error naming the offending operator.
pub fn compose(boolean_operator: Option<&str>, results: &[bool]) -> Result<bool, EngineError> {
    if results.len() == 1 {
        return Ok(results[0]);
    }

    match boolean_operator {
        Some("AND") => Ok(results.iter().all(|r| *r)),
        Some("OR") => Ok(results.iter().any(|r| *r)),
        other => Err(EngineError::UnsupportedBooleanOperator(
            other.unwrap_or("none").to_string(),
        )),
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_result_passes_through() {
        assert!(compose(None, &[true]).unwrap());
        assert!(!compose(None, &[false]).unwrap());
        // The declared operator is irrelevant for a single condition.
        assert!(compose(Some("AND"), &[true]).unwrap());
        assert!(compose(Some("XOR"), &[true]).unwrap());
    }

    #[test]
    fn and_requires_every_result() {
        assert!(compose(Some("AND"), &[true, true, true]).unwrap());
        assert!(!compose(Some("AND"), &[true, false, true]).unwrap());
        assert!(!compose(Some("AND"), &[false, false]).unwrap());
    }

    #[test]
    fn flipping_one_result_flips_an_all_true_and() {
        let all_true = vec![true; 4];
        assert!(compose(Some("AND"), &all_true).unwrap());

        for i in 0..all_true.len() {
            let mut flipped = all_true.clone();
            flipped[i] = false;
            assert!(!compose(Some("AND"), &flipped).unwrap());
        }
    }

    #[test]
    fn or_requires_any_result() {
        assert!(compose(Some("OR"), &[false, true]).unwrap());
        assert!(compose(Some("OR"), &[true, true]).unwrap());
        assert!(!compose(Some("OR"), &[false, false, false]).unwrap());
    }

    #[test]
    fn unsupported_operator_is_named_in_the_error() {
        let err = compose(Some("XOR"), &[true, false]).unwrap_err();
        match err {
            EngineError::UnsupportedBooleanOperator(op) => assert_eq!(op, "XOR"),
            other => panic!("expected unsupported-operator error, got {:?}", other),
        }

        let err = compose(None, &[true, false]).unwrap_err();
        match err {
            EngineError::UnsupportedBooleanOperator(op) => assert_eq!(op, "none"),
            other => panic!("expected unsupported-operator error, got {:?}", other),
        }
    }
}
