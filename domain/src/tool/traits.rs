//! Tool domain traits
//!
//! Contains pure domain logic traits for parameter validation.
//! The async runner and prompt ports are defined in the application layer (ports).

use std::collections::BTreeMap;

use super::entities::ParameterSet;
use crate::core::error::DomainError;

/// Supplied parameter values, keyed by parameter name
pub type ParameterValues = BTreeMap<String, String>;

/// Validator for supplied parameter values
///
/// This is a pure domain trait that checks values against the merged
/// parameter set of a resolved command without any I/O operations.
pub trait ParameterValidator {
    /// Every required parameter has a non-empty value
    fn validate_required(
        &self,
        params: &ParameterSet,
        values: &ParameterValues,
    ) -> Result<(), DomainError>;

    /// No supplied value is listed in one of its parameter's exclusion rules
    fn validate_exclusions(
        &self,
        params: &ParameterSet,
        values: &ParameterValues,
    ) -> Result<(), DomainError>;

    /// Required check followed by the exclusion check
    fn validate(&self, params: &ParameterSet, values: &ParameterValues) -> Result<(), DomainError> {
        self.validate_required(params, values)?;
        self.validate_exclusions(params, values)
    }
}

/// Default implementation of ParameterValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultParameterValidator;

impl ParameterValidator for DefaultParameterValidator {
    fn validate_required(
        &self,
        params: &ParameterSet,
        values: &ParameterValues,
    ) -> Result<(), DomainError> {
        for (name, param) in params {
            if !param.required {
                continue;
            }
            let present = values.get(name).is_some_and(|v| !v.is_empty());
            if !present {
                return Err(DomainError::MissingRequiredParameter(name.clone()));
            }
        }
        Ok(())
    }

    fn validate_exclusions(
        &self,
        params: &ParameterSet,
        values: &ParameterValues,
    ) -> Result<(), DomainError> {
        for (name, value) in values {
            let Some(param) = params.get(name) else {
                continue;
            };
            // Exclusion is a veto: it does not depend on how the level is gated
            if let Some(rule) = param.validation_rules.iter().find(|r| r.excludes(value)) {
                return Err(DomainError::ExcludedValue {
                    name: name.clone(),
                    value: value.clone(),
                    danger_level: rule.danger_level.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParameterSpec, ValidationRule};

    fn params() -> ParameterSet {
        let mut params = ParameterSet::new();
        params.insert(
            "namespace".to_string(),
            ParameterSpec::new("namespace", "Namespace", true)
                .with_rule(ValidationRule::new("high", ["kube-system", "kube-public"])),
        );
        params.insert(
            "pod".to_string(),
            ParameterSpec::new("pod", "Pod name", false),
        );
        params
    }

    fn values(pairs: &[(&str, &str)]) -> ParameterValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultParameterValidator;
        let err = validator.validate(&params(), &values(&[])).unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredParameter("namespace".into()));
    }

    #[test]
    fn test_validator_empty_value_counts_as_missing() {
        let validator = DefaultParameterValidator;
        let err = validator
            .validate(&params(), &values(&[("namespace", "")]))
            .unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredParameter("namespace".into()));
    }

    #[test]
    fn test_validator_reports_first_missing_in_name_order() {
        let mut params = params();
        params.insert("cluster".to_string(), ParameterSpec::new("cluster", "", true));

        let err = DefaultParameterValidator
            .validate_required(&params, &values(&[]))
            .unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredParameter("cluster".into()));
    }

    #[test]
    fn test_validator_excluded_value() {
        let validator = DefaultParameterValidator;
        let err = validator
            .validate(&params(), &values(&[("namespace", "kube-system")]))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::ExcludedValue {
                name: "namespace".into(),
                value: "kube-system".into(),
                danger_level: "high".into(),
            }
        );
    }

    #[test]
    fn test_validator_allowed_value() {
        let validator = DefaultParameterValidator;
        assert!(validator
            .validate(&params(), &values(&[("namespace", "default")]))
            .is_ok());
    }

    #[test]
    fn test_validator_ignores_values_without_spec() {
        let validator = DefaultParameterValidator;
        assert!(validator
            .validate(
                &params(),
                &values(&[("namespace", "default"), ("verbose", "kube-system")])
            )
            .is_ok());
    }

    #[test]
    fn test_rule_without_danger_level_does_not_exclude() {
        let mut params = ParameterSet::new();
        params.insert(
            "namespace".to_string(),
            ParameterSpec::new("namespace", "Namespace", false)
                .with_rule(ValidationRule::new("", ["kube-system"])),
        );
        assert!(DefaultParameterValidator
            .validate_exclusions(&params, &values(&[("namespace", "kube-system")]))
            .is_ok());
    }

    #[test]
    fn test_required_check_runs_before_exclusions() {
        let mut params = params();
        params.insert("context".to_string(), ParameterSpec::new("context", "", true));

        // namespace is excluded, but the missing required parameter is reported
        let err = DefaultParameterValidator
            .validate(&params, &values(&[("namespace", "kube-system")]))
            .unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredParameter("context".into()));
    }
}
