//! Rule-based validation (deterministic, synchronous, no I/O)
//!
//! [`RuleValidator`] runs a fixed, ordered list of named checks against a
//! [`QueryParameters`] record. Every check runs on every call so that all
//! violations are reported together; when none fail, symbol case and order
//! corrections are applied and returned as `corrected_params`.
//!
//! | Check | Fails when |
//! |-------|------------|
//! | `rule_schema` | a key outside the declared field set is present |
//! | `rule_hardness_range` | min/max outside 1–10, or min > max |
//! | `rule_crystal_system` | a value outside the nine crystal systems |
//! | `rule_chemical_element` | a token of `el_inc`/`el_exc` is not a known symbol |
//! | `rule_element_conflict` | a symbol is both included and excluded |
//! | `rule_completeness` | no searchable field is set |

use super::result::{Issue, ValidationResult};
use crate::query::vocabulary::{
    CrystalSystem, MOHS_MAX, MOHS_MIN, canonical_symbol, split_symbols,
};
use crate::query::QueryParameters;
use std::collections::{BTreeMap, BTreeSet};

type CheckFn = fn(&QueryParameters) -> Result<(), String>;

/// A named rule check
#[derive(Clone, Copy)]
pub struct RuleCheck {
    pub name: &'static str,
    check: CheckFn,
}

impl RuleCheck {
    const fn new(name: &'static str, check: CheckFn) -> Self {
        Self { name, check }
    }

    pub fn run(&self, params: &QueryParameters) -> Result<(), String> {
        (self.check)(params)
    }
}

impl std::fmt::Debug for RuleCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCheck").field("name", &self.name).finish()
    }
}

static CHECKS: [RuleCheck; 6] = [
    RuleCheck::new("rule_schema", check_schema),
    RuleCheck::new("rule_hardness_range", check_hardness_range),
    RuleCheck::new("rule_crystal_system", check_crystal_system),
    RuleCheck::new("rule_chemical_element", check_chemical_element),
    RuleCheck::new("rule_element_conflict", check_element_conflict),
    RuleCheck::new("rule_completeness", check_completeness),
];

/// Deterministic validator over [`QueryParameters`]
///
/// Holds only static configuration, so a single instance can be shared
/// across concurrent validations.
///
/// # Example
///
/// ```
/// use mindat_query_domain::{QueryParameters, RuleValidator};
///
/// let params = QueryParameters::new().with_el_inc("fe,cu").with_el_exc("s");
/// let result = RuleValidator::new().run_validation(&params);
///
/// assert!(result.is_valid());
/// let corrected = result.corrected_params.unwrap();
/// assert_eq!(corrected.el_inc.as_deref(), Some("Cu,Fe"));
/// assert_eq!(corrected.el_exc.as_deref(), Some("S"));
/// ```
#[derive(Debug, Clone)]
pub struct RuleValidator {
    checks: &'static [RuleCheck],
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator {
    pub fn new() -> Self {
        Self { checks: &CHECKS }
    }

    /// Registered checks, in evaluation order
    pub fn checks(&self) -> &[RuleCheck] {
        self.checks
    }

    /// Run every check and build the structured result.
    ///
    /// Never fails: violations are reported as issues keyed by check name.
    pub fn run_validation(&self, params: &QueryParameters) -> ValidationResult {
        let mut issues = BTreeMap::new();

        for check in self.checks {
            if let Err(message) = check.run(params) {
                issues.insert(check.name.to_string(), Issue::Message(message));
            }
        }

        if issues.is_empty() {
            ValidationResult::valid(self.apply_corrections(params))
        } else {
            ValidationResult::invalid(issues)
        }
    }

    /// Normalize symbol lists: canonical case, deduplicated, sorted.
    ///
    /// Only meaningful after the chemical element check passed; unknown
    /// tokens are kept as written.
    pub fn apply_corrections(&self, params: &QueryParameters) -> QueryParameters {
        let mut corrected = params.clone();
        corrected.el_inc = correct_symbol_list(params.el_inc.as_deref());
        corrected.el_exc = correct_symbol_list(params.el_exc.as_deref());
        corrected
    }
}

fn correct_symbol_list(list: Option<&str>) -> Option<String> {
    let list = list?;
    if list.is_empty() {
        return Some(String::new());
    }
    let corrected: BTreeSet<String> = split_symbols(list)
        .map(|token| {
            canonical_symbol(token)
                .map(str::to_string)
                .unwrap_or_else(|| token.to_string())
        })
        .collect();
    Some(corrected.into_iter().collect::<Vec<_>>().join(","))
}

fn format_set<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let set: BTreeSet<&str> = items.into_iter().collect();
    set.into_iter().collect::<Vec<_>>().join(", ")
}

fn check_schema(params: &QueryParameters) -> Result<(), String> {
    if params.unknown.is_empty() {
        return Ok(());
    }
    Err(format!(
        "Unexpected fields: {}",
        format_set(params.unknown.keys().map(String::as_str))
    ))
}

fn check_hardness_range(params: &QueryParameters) -> Result<(), String> {
    let in_scale = |value: f64| (MOHS_MIN..=MOHS_MAX).contains(&value);

    if let Some(min) = params.hardness_min
        && !in_scale(min)
    {
        return Err(format!(
            "hardness_min must be between {} and {}",
            MOHS_MIN, MOHS_MAX
        ));
    }
    if let Some(max) = params.hardness_max
        && !in_scale(max)
    {
        return Err(format!(
            "hardness_max must be between {} and {}",
            MOHS_MIN, MOHS_MAX
        ));
    }
    if let (Some(min), Some(max)) = (params.hardness_min, params.hardness_max)
        && min > max
    {
        return Err("hardness_min cannot exceed hardness_max".to_string());
    }
    Ok(())
}

fn check_crystal_system(params: &QueryParameters) -> Result<(), String> {
    let Some(systems) = &params.crystal_system else {
        return Ok(());
    };
    let invalid: Vec<&str> = systems
        .iter()
        .map(String::as_str)
        .filter(|s| s.parse::<CrystalSystem>().is_err())
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Invalid crystal systems: {}. Valid options: {}",
            format_set(invalid),
            CrystalSystem::names().join(", ")
        ))
    }
}

fn check_chemical_element(params: &QueryParameters) -> Result<(), String> {
    let mut problems = Vec::new();

    for (field, list) in [("el_inc", &params.el_inc), ("el_exc", &params.el_exc)] {
        let Some(list) = list else { continue };
        let invalid: Vec<&str> = split_symbols(list)
            .filter(|token| canonical_symbol(token).is_none())
            .collect();
        if !invalid.is_empty() {
            problems.push(format!(
                "Invalid elements in {}: {}",
                field,
                format_set(invalid)
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}

fn check_element_conflict(params: &QueryParameters) -> Result<(), String> {
    let (Some(included), Some(excluded)) = (&params.el_inc, &params.el_exc) else {
        return Ok(());
    };
    let excluded: BTreeSet<String> = split_symbols(excluded)
        .map(|s| s.to_ascii_lowercase())
        .collect();
    let conflicts: Vec<&str> = split_symbols(included)
        .filter(|s| excluded.contains(&s.to_ascii_lowercase()))
        .collect();

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Elements cannot be both included and excluded: {}",
            format_set(conflicts)
        ))
    }
}

fn check_completeness(params: &QueryParameters) -> Result<(), String> {
    if QueryParameters::FIELDS.iter().any(|f| params.is_set(f)) {
        Ok(())
    } else {
        Err("At least one search criterion must be specified".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::result::ValidationStatus;
    use serde_json::json;

    fn validate(params: &QueryParameters) -> ValidationResult {
        RuleValidator::new().run_validation(params)
    }

    // ==================== Passing records ====================

    #[test]
    fn test_full_valid_record() {
        let params = QueryParameters::new()
            .with_ima(true)
            .with_hardness(Some(3.0), Some(5.0))
            .with_crystal_systems(["Hexagonal"])
            .with_el_inc("Nd")
            .with_el_exc("S");

        let result = validate(&params);
        assert_eq!(result.status, ValidationStatus::Valid);
        assert!(result.issues.is_empty());
        assert_eq!(result.corrected_params, Some(params));
    }

    #[test]
    fn test_case_folding_correction() {
        let params = QueryParameters::new().with_el_inc("fe,cu").with_el_exc("s");

        let result = validate(&params);
        assert!(result.is_valid());
        let corrected = result.corrected_params.unwrap();
        assert_eq!(corrected.el_inc.as_deref(), Some("Cu,Fe"));
        assert_eq!(corrected.el_exc.as_deref(), Some("S"));
    }

    #[test]
    fn test_corrections_dedup_and_complex_ions() {
        let params = QueryParameters::new().with_el_inc(" so4, Cu ,CU,oh");
        let corrected = RuleValidator::new().apply_corrections(&params);
        assert_eq!(corrected.el_inc.as_deref(), Some("Cu,OH,SO4"));
    }

    #[test]
    fn test_corrections_are_idempotent() {
        let validator = RuleValidator::new();
        let params = QueryParameters::new()
            .with_el_inc("fe,cu,Fe")
            .with_el_exc("as,s");

        let once = validator.apply_corrections(&params);
        let twice = validator.apply_corrections(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ima_alone_is_complete() {
        let result = validate(&QueryParameters::new().with_ima(false));
        assert!(result.is_valid());
    }

    #[test]
    fn test_hardness_bounds_inclusive() {
        let result = validate(&QueryParameters::new().with_hardness(Some(1.0), Some(10.0)));
        assert!(result.is_valid());

        let result = validate(&QueryParameters::new().with_hardness(Some(4.5), Some(4.5)));
        assert!(result.is_valid());
    }

    // ==================== Individual violations ====================

    #[test]
    fn test_hardness_min_exceeds_max() {
        let result = validate(&QueryParameters::new().with_hardness(Some(3.0), Some(1.0)));
        assert_eq!(result.status, ValidationStatus::Invalid);
        assert_eq!(
            result.issues["rule_hardness_range"].reason(),
            "hardness_min cannot exceed hardness_max"
        );
        assert!(result.corrected_params.is_none());
    }

    #[test]
    fn test_hardness_out_of_scale() {
        let result = validate(&QueryParameters::new().with_hardness(None, Some(11.0)));
        assert!(
            result.issues["rule_hardness_range"]
                .reason()
                .starts_with("hardness_max must be between")
        );

        let result = validate(&QueryParameters::new().with_hardness(Some(0.5), None));
        assert!(
            result.issues["rule_hardness_range"]
                .reason()
                .starts_with("hardness_min must be between")
        );
    }

    #[test]
    fn test_unknown_crystal_system() {
        let params = QueryParameters::new().with_crystal_systems(["Hexagonal", "Cubic"]);
        let result = validate(&params);

        let reason = result.issues["rule_crystal_system"].reason();
        assert!(reason.contains("Cubic"));
        assert!(!reason.starts_with("Invalid crystal systems: Hexagonal"));
    }

    #[test]
    fn test_unknown_element() {
        let result = validate(&QueryParameters::new().with_el_inc("Fe,Xx"));
        assert_eq!(
            result.issues["rule_chemical_element"].reason(),
            "Invalid elements in el_inc: Xx"
        );
    }

    #[test]
    fn test_unknown_elements_in_both_lists() {
        let params = QueryParameters::new().with_el_inc("Qq").with_el_exc("Zz");
        let reason = validate(&params).issues["rule_chemical_element"]
            .reason()
            .to_string();
        assert!(reason.contains("el_inc: Qq"));
        assert!(reason.contains("el_exc: Zz"));
    }

    #[test]
    fn test_element_conflict() {
        let result = validate(&QueryParameters::new().with_el_inc("Fe").with_el_exc("Fe"));
        assert_eq!(result.status, ValidationStatus::Invalid);
        assert!(result.issues.contains_key("rule_element_conflict"));
    }

    #[test]
    fn test_element_conflict_ignores_case() {
        let result = validate(&QueryParameters::new().with_el_inc("fe,Cu").with_el_exc("FE"));
        assert_eq!(
            result.issues["rule_element_conflict"].reason(),
            "Elements cannot be both included and excluded: fe"
        );
    }

    #[test]
    fn test_empty_record_is_incomplete() {
        let result = validate(&QueryParameters::new());
        assert_eq!(result.status, ValidationStatus::Invalid);
        assert!(result.issues.contains_key("rule_completeness"));
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn test_unexpected_field() {
        let params: QueryParameters =
            serde_json::from_value(json!({"ima": true, "unknown_field": 123})).unwrap();
        let result = validate(&params);
        assert_eq!(
            result.issues["rule_schema"].reason(),
            "Unexpected fields: unknown_field"
        );
    }

    // ==================== No short-circuit ====================

    #[test]
    fn test_all_violations_reported_together() {
        let params: QueryParameters = serde_json::from_value(json!({
            "hardness_min": 7,
            "hardness_max": 2,
            "crystal_system": ["Cubic"],
            "el_inc": "Fe,Xx",
            "el_exc": "fe",
            "expand": "locality"
        }))
        .unwrap();

        let result = validate(&params);
        let keys: Vec<&str> = result.issues.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "rule_chemical_element",
                "rule_crystal_system",
                "rule_element_conflict",
                "rule_hardness_range",
                "rule_schema",
            ]
        );
    }

    #[test]
    fn test_check_order() {
        let names: Vec<&str> = RuleValidator::new().checks().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "rule_schema",
                "rule_hardness_range",
                "rule_crystal_system",
                "rule_chemical_element",
                "rule_element_conflict",
                "rule_completeness",
            ]
        );
    }

    #[test]
    fn test_valid_iff_no_check_fails() {
        let validator = RuleValidator::new();
        let samples = [
            QueryParameters::new(),
            QueryParameters::new().with_ima(true),
            QueryParameters::new().with_hardness(Some(2.0), Some(9.5)),
            QueryParameters::new().with_hardness(Some(9.0), Some(2.0)),
            QueryParameters::new().with_crystal_systems(["Trigonal", "Isometric"]),
            QueryParameters::new().with_crystal_systems(["trigonal"]),
            QueryParameters::new().with_el_inc("Cu").with_el_exc("S,As"),
            QueryParameters::new().with_el_inc("Cu").with_el_exc("cu"),
            QueryParameters::new().with_unknown("color", json!("red")),
        ];

        for params in &samples {
            let all_pass = validator.checks().iter().all(|c| c.run(params).is_ok());
            let result = validator.run_validation(params);
            assert_eq!(result.is_valid(), all_pass, "{params:?}");
            assert_eq!(result.corrected_params.is_some(), all_pass);
        }
    }
}
