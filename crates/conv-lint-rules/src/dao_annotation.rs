//! Rule to check Spring annotations on DAO implementation classes.
//!
//! # Rationale
//!
//! A DAO implementation class is read-only by default, and individual
//! mutating methods opt out:
//!
//! - Classes must be marked `@Repository`
//! - Classes must be marked `@Transactional(readOnly = true)`
//! - Public `insert*`/`update*`/`delete*` methods must be marked
//!   `@Transactional(readOnly = false)`
//!
//! Public classes whose simple name matches the include pattern and not the
//! exclude pattern are considered DAO implementation classes; by default
//! that is names ending in `DaoImpl`, excluding names starting with
//! `Abstract`.
//!
//! # Configuration
//!
//! - `include`: regular expression selecting class names to check
//!   (default: `^.*DaoImpl$`)
//! - `exclude`: regular expression filtering the included names
//!   (default: `^Abstract.+$`)
//!
//! A malformed pattern is rejected when the rule is constructed, never
//! during traversal.

use regex::Regex;
use tracing::trace;

use conv_lint_core::query::{
    annotations_of, argument_value, enclosing_type_of, identifier_of, modifiers_of, ArgValue,
};
use conv_lint_core::{Ast, ConfigError, Kind, NodeId, Rule, Severity, Violation};

/// Rule code for dao-annotation.
pub const CODE: &str = "CV002";

/// Rule name for dao-annotation.
pub const NAME: &str = "dao-annotation";

/// Default include pattern for DAO class names.
pub const DEFAULT_INCLUDE: &str = "^.*DaoImpl$";

/// Default exclude pattern for DAO class names.
pub const DEFAULT_EXCLUDE: &str = "^Abstract.+$";

/// Marker annotation required on DAO classes.
const REPOSITORY: &str = "Repository";

/// Argument-bearing annotation required on DAO classes and mutating methods.
const TRANSACTIONAL: &str = "Transactional";

/// Boolean argument inspected on the transactional annotation.
const READ_ONLY: &str = "readOnly";

/// Method name prefixes that indicate a mutating operation.
const MUTATOR_PREFIXES: [&str; 3] = ["insert", "update", "delete"];

/// Checks that DAO implementation classes carry the expected Spring
/// annotations.
#[derive(Debug, Clone)]
pub struct DaoAnnotation {
    include: Regex,
    exclude: Regex,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DaoAnnotation {
    fn default() -> Self {
        Self::new()
    }
}

impl DaoAnnotation {
    /// Creates a new rule with the default include/exclude patterns.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::expect_used)] // the default patterns are known-good
        Self::with_patterns(DEFAULT_INCLUDE, DEFAULT_EXCLUDE).expect("default patterns compile")
    }

    /// Creates a new rule with custom include/exclude patterns.
    ///
    /// Patterns must match the whole simple class name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if either pattern is not a
    /// valid regular expression.
    pub fn with_patterns(include: &str, exclude: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            include: compile_anchored(include)?,
            exclude: compile_anchored(exclude)?,
            severity: Severity::Error,
        })
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn violation(&self, line: usize, key: &str, message: &str) -> Violation {
        Violation::new(CODE, NAME, self.severity, line, key, message)
    }

    /// A class is in scope iff the include pattern matches its simple name
    /// and the exclude pattern does not.
    fn in_scope(&self, class_name: &str) -> bool {
        self.include.is_match(class_name) && !self.exclude.is_match(class_name)
    }

    fn is_public(ast: &Ast, decl: NodeId) -> bool {
        modifiers_of(ast, decl).contains(&Kind::Public)
    }

    /// Looks up the `readOnly` value on a declaration's own `@Transactional`
    /// annotation, if any.
    fn transactional_read_only(ast: &Ast, decl: NodeId) -> ArgValue {
        for annotation in annotations_of(ast, decl) {
            if identifier_of(ast, annotation) == TRANSACTIONAL {
                return argument_value(ast, annotation, READ_ONLY);
            }
        }
        ArgValue::Absent
    }

    fn check_class(&self, ast: &Ast, class_def: NodeId) -> Vec<Violation> {
        let mut violations = Vec::new();

        let class_name = identifier_of(ast, class_def);
        if !Self::is_public(ast, class_def) || !self.in_scope(class_name) {
            trace!(class = class_name, "class out of scope");
            return violations;
        }

        let has_repository = annotations_of(ast, class_def)
            .any(|annotation| identifier_of(ast, annotation) == REPOSITORY);
        if !has_repository {
            violations.push(self.violation(
                ast.line(class_def),
                "springdaoannotation.missingclassrepository",
                "Class must be annotated with @Repository.",
            ));
        }

        if Self::transactional_read_only(ast, class_def) != ArgValue::True {
            violations.push(self.violation(
                ast.line(class_def),
                "springdaoannotation.missingclasstransactional",
                "Class must be annotated with @Transactional(readOnly = true).",
            ));
        }

        violations
    }

    fn check_method(&self, ast: &Ast, method_def: NodeId) -> Vec<Violation> {
        let mut violations = Vec::new();

        if !Self::is_public(ast, method_def) {
            return violations;
        }

        let Some(class_def) = enclosing_type_of(ast, method_def) else {
            return violations;
        };
        if !Self::is_public(ast, class_def) || !self.in_scope(identifier_of(ast, class_def)) {
            return violations;
        }

        let method_name = identifier_of(ast, method_def);
        if !MUTATOR_PREFIXES
            .iter()
            .any(|prefix| method_name.starts_with(prefix))
        {
            return violations;
        }

        if Self::transactional_read_only(ast, method_def) != ArgValue::False {
            violations.push(self.violation(
                ast.line(method_def),
                "springdaoannotation.missingmethodtransactional",
                "Method must be annotated with @Transactional(readOnly = false).",
            ));
        }

        violations
    }
}

/// Compiles a pattern with whole-name match semantics.
fn compile_anchored(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })
}

impl Rule for DaoAnnotation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks that Spring DAO implementation classes carry the expected annotations"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn kinds(&self) -> &'static [Kind] {
        &[Kind::ClassDef, Kind::MethodDef]
    }

    fn visit(&self, ast: &Ast, node: NodeId) -> Vec<Violation> {
        if ast.kind(node) == Kind::ClassDef {
            self.check_class(ast, node)
        } else {
            self.check_method(ast, node)
        }
    }
}
