//! Rule to check the declaration of unit test methods.
//!
//! # Rationale
//!
//! A method annotated with `@Test` is invoked reflectively by the test
//! runner: it must be declared `public`, must be an instance method, and
//! must have a `void` return type. Methods without the annotation are
//! silently skipped.

use conv_lint_core::query::{first_child_of_kind, has_annotation};
use conv_lint_core::{Ast, Kind, NodeId, Rule, Severity, Violation};

/// Rule code for test-method-declaration.
pub const CODE: &str = "CV003";

/// Rule name for test-method-declaration.
pub const NAME: &str = "test-method-declaration";

/// Marker annotation that selects methods for checking.
const TEST_ANNOTATION: &str = "Test";

/// Checks that `@Test` methods are public instance methods returning void.
#[derive(Debug, Clone)]
pub struct TestMethodDeclaration {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for TestMethodDeclaration {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMethodDeclaration {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The modifier list, in order, must consist of exactly one `public`
    /// plus any number of annotations.
    fn is_pure_public(ast: &Ast, method_def: NodeId) -> bool {
        let Some(modifiers) = first_child_of_kind(ast, method_def, Kind::Modifiers) else {
            return false;
        };
        let mut have_public = false;
        for &modifier in ast.children(modifiers) {
            match ast.kind(modifier) {
                Kind::Public => have_public = true,
                Kind::Annotation => {}
                _ => return false,
            }
        }
        have_public
    }

    fn returns_void(ast: &Ast, method_def: NodeId) -> bool {
        first_child_of_kind(ast, method_def, Kind::Type)
            .map_or(true, |ty| first_child_of_kind(ast, ty, Kind::VoidType).is_some())
    }
}

impl Rule for TestMethodDeclaration {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks that @Test methods are declared public with a void return type"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn kinds(&self) -> &'static [Kind] {
        &[Kind::MethodDef]
    }

    fn visit(&self, ast: &Ast, method_def: NodeId) -> Vec<Violation> {
        let mut violations = Vec::new();

        if !has_annotation(ast, method_def, TEST_ANNOTATION) {
            return violations;
        }

        let line = ast.line(method_def);

        if !Self::returns_void(ast, method_def) {
            violations.push(Violation::new(
                CODE,
                NAME,
                self.severity,
                line,
                "testmethoddeclaration.badreturn",
                "Test method must have void return type.",
            ));
        }

        if !Self::is_pure_public(ast, method_def) {
            violations.push(Violation::new(
                CODE,
                NAME,
                self.severity,
                line,
                "testmethoddeclaration.badscope",
                "Test method must be a public instance method.",
            ));
        }

        violations
    }
}
