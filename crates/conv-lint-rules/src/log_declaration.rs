//! Rule to check the declaration of an SLF4J log field.
//!
//! # Rationale
//!
//! A class that declares a logger must declare it the house way:
//!
//! ```java
//! private static final Logger LOG = LoggerFactory.getLogger(MyClass.class);
//! ```
//!
//! where `MyClass` is the class enclosing the declaration. Classes without a
//! `Logger` field are not checked (the rule is opt-in per class), and
//! annotations on the declaration are ignored.

use conv_lint_core::query::{
    find_descendant_of_kind, find_descendant_with_text, first_child_of_kind, identifier_of,
    modifiers_of, ModifierSet,
};
use conv_lint_core::{Ast, Kind, NodeId, Rule, Severity, Violation};

/// Rule code for log-declaration.
pub const CODE: &str = "CV001";

/// Rule name for log-declaration.
pub const NAME: &str = "log-declaration";

/// Logger type the rule keys on.
const LOGGER_TYPE: &str = "Logger";

/// Factory type that must appear in the initializer.
const FACTORY_TYPE: &str = "LoggerFactory";

/// Factory method that must appear in the initializer.
const FACTORY_METHOD: &str = "getLogger";

/// Required name of the log field.
const FIELD_NAME: &str = "LOG";

/// Checks that a logging field declaration conforms to the standard shape.
#[derive(Debug, Clone)]
pub struct LogDeclaration {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for LogDeclaration {
    fn default() -> Self {
        Self::new()
    }
}

impl LogDeclaration {
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

    fn violation(&self, line: usize, key: &str, message: &str) -> Violation {
        Violation::new(CODE, NAME, self.severity, line, key, message)
    }

    /// Locates a log declaration, if any, amidst the class member variables.
    fn find_log_decl(ast: &Ast, block: NodeId) -> Option<NodeId> {
        ast.children(block)
            .iter()
            .copied()
            .filter(|&member| ast.kind(member) == Kind::VariableDef)
            .find(|&member| {
                first_child_of_kind(ast, member, Kind::Type)
                    .is_some_and(|ty| identifier_of(ast, ty) == LOGGER_TYPE)
            })
    }

    fn check_initializer(
        &self,
        ast: &Ast,
        assign: NodeId,
        class_name: &str,
        line: usize,
        violations: &mut Vec<Violation>,
    ) {
        if find_descendant_with_text(ast, assign, FACTORY_TYPE).is_none() {
            violations.push(self.violation(
                line,
                "logdeclaration.badtype",
                "Declared type is not LoggerFactory, check that SLF4J is being used.",
            ));
        }

        if find_descendant_with_text(ast, assign, FACTORY_METHOD).is_none() {
            violations.push(self.violation(
                line,
                "logdeclaration.missingcall",
                "getLogger method is not called, check that SLF4J is being used.",
            ));
        }

        match find_descendant_of_kind(ast, assign, Kind::ClassLiteral) {
            None => violations.push(self.violation(
                line,
                "logdeclaration.missingclass",
                "Class name passed to getLogger method does not end in .class.",
            )),
            Some(literal) => match ast.prev_sibling(literal) {
                None => violations.push(self.violation(
                    line,
                    "logdeclaration.missingclassname",
                    "Class name is missing in getLogger method call.",
                )),
                Some(name) => {
                    if ast.text(name) != Some(class_name) {
                        violations.push(self.violation(
                            line,
                            "logdeclaration.mismatchedclass",
                            "Class name passed to getLogger method does not match enclosing class name.",
                        ));
                    }
                }
            },
        }
    }
}

impl Rule for LogDeclaration {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks that an SLF4J log field is declared in the standard format"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn kinds(&self) -> &'static [Kind] {
        &[Kind::ClassDef]
    }

    fn visit(&self, ast: &Ast, class_def: NodeId) -> Vec<Violation> {
        let mut violations = Vec::new();

        let class_name = identifier_of(ast, class_def);
        if class_name.is_empty() {
            return violations;
        }
        let Some(block) = first_child_of_kind(ast, class_def, Kind::ObjBlock) else {
            return violations;
        };
        let Some(log_decl) = Self::find_log_decl(ast, block) else {
            return violations;
        };

        let line = ast.line(log_decl);

        let field_name = identifier_of(ast, log_decl);
        if !field_name.is_empty() && field_name != FIELD_NAME {
            violations.push(self.violation(
                line,
                "logdeclaration.badname",
                "Logger variable must be named LOG.",
            ));
        }

        let expected: ModifierSet = [Kind::Private, Kind::Static, Kind::Final].into();
        if modifiers_of(ast, log_decl) != expected {
            violations.push(self.violation(
                line,
                "logdeclaration.badmodifier",
                "Logger variable must be declared private static final.",
            ));
        }

        match first_child_of_kind(ast, log_decl, Kind::Assign) {
            None => violations.push(self.violation(
                line,
                "logdeclaration.assignment",
                "Logger must be assigned where declared.",
            )),
            Some(assign) => {
                self.check_initializer(ast, assign, class_name, line, &mut violations);
            }
        }

        violations
    }
}
