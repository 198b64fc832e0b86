//! Rule trait for defining convention checks.

use crate::ast::{Ast, Kind, NodeId};
use crate::types::{Severity, Violation};

/// A structural convention rule over an AST.
///
/// A rule declares the node kinds it wants to see via
/// [`kinds`](Rule::kinds); the walker guarantees [`visit`](Rule::visit) is
/// only invoked with nodes of a declared kind, in document order. Rules never
/// mutate the tree, hold no per-file state, and report findings as
/// [`Violation`] values rather than errors, so a visit over any well-formed
/// tree is total.
///
/// # Example
///
/// ```ignore
/// use conv_lint_core::{Ast, Kind, NodeId, Rule, Violation};
///
/// pub struct NoEmptyClasses;
///
/// impl Rule for NoEmptyClasses {
///     fn name(&self) -> &'static str { "no-empty-classes" }
///     fn code(&self) -> &'static str { "CV900" }
///     fn kinds(&self) -> &'static [Kind] { &[Kind::ClassDef] }
///
///     fn visit(&self, ast: &Ast, node: NodeId) -> Vec<Violation> {
///         // inspect the class declaration, return violations
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "log-declaration").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CV001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Returns the node kinds this rule wants to visit.
    fn kinds(&self) -> &'static [Kind];

    /// Visits a single node of a declared kind and returns any violations.
    ///
    /// # Arguments
    ///
    /// * `ast` - The tree being walked
    /// * `node` - A node whose kind is one of [`kinds`](Rule::kinds)
    fn visit(&self, ast: &Ast, node: NodeId) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
