//! Rule sets and configuration-driven construction.

use conv_lint_core::{Config, ConfigError, RuleBox};

use crate::dao_annotation::{self, DaoAnnotation};
use crate::log_declaration::LogDeclaration;
use crate::test_method_declaration::TestMethodDeclaration;

/// Returns all built-in rules with their default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LogDeclaration::new()),
        Box::new(DaoAnnotation::new()),
        Box::new(TestMethodDeclaration::new()),
    ]
}

/// Builds the rule set from a configuration.
///
/// Rule enablement and severity overrides are applied later by the walker;
/// this only threads construction-time options through, currently the
/// dao-annotation include/exclude patterns.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] if a configured pattern is not a
/// valid regular expression. A bad pattern never degrades to "rule
/// disabled".
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let dao = match config.rule(dao_annotation::NAME) {
        Some(rule_config) => DaoAnnotation::with_patterns(
            rule_config.get_str("include", dao_annotation::DEFAULT_INCLUDE),
            rule_config.get_str("exclude", dao_annotation::DEFAULT_EXCLUDE),
        )?,
        None => DaoAnnotation::new(),
    };

    Ok(vec![
        Box::new(LogDeclaration::new()),
        Box::new(dao),
        Box::new(TestMethodDeclaration::new()),
    ])
}
