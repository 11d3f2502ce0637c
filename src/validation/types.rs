//! Standard relation vocabulary with soft validation

use crate::types::RelationType;

/// Relation types understood by the closure rules
pub const STANDARD_RELATION_TYPES: &[&str] = &[
    "broader",
    "narrower",
    "part_of",
    "has_part",
    "equivalent",
    "related",
];

/// Check if relation type is standard, return warning if not
///
/// Non-standard types are stored as-is but no rule ever derives from them.
pub fn validate_relation_type(relation_type: &RelationType) -> Option<String> {
    if relation_type.is_standard() {
        None
    } else {
        Some(format!(
            "Non-standard relationType '{}' will not take part in inference. Recommended: {:?}",
            relation_type, STANDARD_RELATION_TYPES
        ))
    }
}

/// Confidence must be a real number within [0, 1]
pub fn validate_confidence(confidence: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(format!(
            "confidence must be within [0, 1], got {}",
            confidence
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_types_parse_as_standard() {
        for name in STANDARD_RELATION_TYPES {
            assert!(validate_relation_type(&RelationType::from(*name)).is_none());
        }
    }

    #[test]
    fn test_non_standard_relation_type() {
        let warning = validate_relation_type(&RelationType::from("Broader"));
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("Non-standard relationType"));
    }

    #[test]
    fn test_confidence_bounds() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(validate_confidence(1.01).is_err());
        assert!(validate_confidence(-0.1).is_err());
        assert!(validate_confidence(f64::NAN).is_err());
    }
}
