//! Walker for dispatching rules over a tree.
//!
//! The walker is the host-facing driver: rules register the node kinds they
//! want, and one iterative pre-order pass per file invokes each rule only on
//! nodes of a declared kind, in document order. Because rules only read the
//! tree, a host may walk the same tree from several threads if it chooses to
//! parallelize across rules.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::ast::{Ast, Kind};
use crate::config::Config;
use crate::rule::{Rule, RuleBox};
use crate::types::{Severity, Violation};

/// Builder for configuring a [`Walker`].
#[derive(Default)]
pub struct WalkerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl WalkerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the walker.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the walker.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple boxed rules to the walker.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration used for rule enablement and severity
    /// overrides.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the walker, resolving the kind dispatch table.
    #[must_use]
    pub fn build(self) -> Walker {
        let config = self.config.unwrap_or_default();
        let mut dispatch: HashMap<Kind, Vec<usize>> = HashMap::new();
        let mut overrides = Vec::with_capacity(self.rules.len());

        for (index, rule) in self.rules.iter().enumerate() {
            if !config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                overrides.push(None);
                continue;
            }
            for &kind in rule.kinds() {
                dispatch.entry(kind).or_default().push(index);
            }
            overrides.push(config.rule_severity(rule.name()));
        }

        Walker {
            rules: self.rules,
            dispatch,
            overrides,
        }
    }
}

/// Dispatches registered rules over a tree in document order.
///
/// Use [`Walker::builder()`] to construct an instance.
pub struct Walker {
    rules: Vec<RuleBox>,
    dispatch: HashMap<Kind, Vec<usize>>,
    overrides: Vec<Option<Severity>>,
}

impl Walker {
    /// Creates a new builder for configuring a walker.
    #[must_use]
    pub fn builder() -> WalkerBuilder {
        WalkerBuilder::new()
    }

    /// Returns the number of registered rules, including disabled ones.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Walks one file's tree and returns all violations in ascending line
    /// order.
    ///
    /// Every node is visited exactly once, pre-order, first child before
    /// later siblings; a rule only sees nodes of the kinds it declared.
    /// A rule may report a line other than the visited node's (the log rule
    /// reports the field while visiting the class), so the collected
    /// violations are stable-sorted by line; visit order breaks ties.
    #[must_use]
    pub fn walk(&self, ast: &Ast) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut stack = vec![ast.root()];

        while let Some(node) = stack.pop() {
            if let Some(indices) = self.dispatch.get(&ast.kind(node)) {
                for &index in indices {
                    let rule = &self.rules[index];
                    trace!(rule = rule.name(), line = ast.line(node), "visiting");
                    let mut found = rule.visit(ast, node);
                    if let Some(severity) = self.overrides[index] {
                        for v in &mut found {
                            v.severity = severity;
                        }
                    }
                    violations.extend(found);
                }
            }
            stack.extend(ast.children(node).iter().rev());
        }

        violations.sort_by_key(|v| v.line);

        debug!(
            violations = violations.len(),
            nodes = ast.node_count(),
            "walk complete"
        );
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeId;

    #[derive(Debug)]
    struct LineReporter {
        kinds: &'static [Kind],
    }

    impl Rule for LineReporter {
        fn name(&self) -> &'static str {
            "line-reporter"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn kinds(&self) -> &'static [Kind] {
            self.kinds
        }
        fn visit(&self, ast: &Ast, node: NodeId) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ast.line(node),
                "test.visited",
                "visited",
            )]
        }
    }

    fn two_class_tree() -> Ast {
        let mut b = Ast::builder();
        b.start_node(Kind::CompilationUnit, 1);
        b.start_node(Kind::ClassDef, 2)
            .text_token(Kind::Ident, "First", 2)
            .start_node(Kind::ObjBlock, 2)
            .token(Kind::MethodDef, 3)
            .finish_node()
            .finish_node();
        b.start_node(Kind::ClassDef, 7)
            .text_token(Kind::Ident, "Second", 7)
            .start_node(Kind::ObjBlock, 7)
            .token(Kind::MethodDef, 8)
            .finish_node()
            .finish_node();
        b.finish_node();
        b.finish()
    }

    #[test]
    fn dispatches_only_declared_kinds() {
        let walker = Walker::builder()
            .rule(LineReporter {
                kinds: &[Kind::ClassDef],
            })
            .build();

        let violations = walker.walk(&two_class_tree());
        let lines: Vec<usize> = violations.iter().map(|v| v.line).collect();
        assert_eq!(lines, [2, 7]);
    }

    #[test]
    fn visits_in_document_order_across_kinds() {
        let walker = Walker::builder()
            .rule(LineReporter {
                kinds: &[Kind::ClassDef, Kind::MethodDef],
            })
            .build();

        let violations = walker.walk(&two_class_tree());
        let lines: Vec<usize> = violations.iter().map(|v| v.line).collect();
        assert_eq!(lines, [2, 3, 7, 8]);
    }

    #[test]
    fn walk_is_idempotent() {
        let walker = Walker::builder()
            .rule(LineReporter {
                kinds: &[Kind::MethodDef],
            })
            .build();

        let ast = two_class_tree();
        assert_eq!(walker.walk(&ast), walker.walk(&ast));
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let config = Config::parse("[rules.line-reporter]\nenabled = false\n")
            .expect("config should parse");
        let walker = Walker::builder()
            .rule(LineReporter {
                kinds: &[Kind::ClassDef],
            })
            .config(config)
            .build();

        assert_eq!(walker.rule_count(), 1);
        assert!(walker.walk(&two_class_tree()).is_empty());
    }

    #[test]
    fn severity_override_is_applied() {
        let config = Config::parse("[rules.line-reporter]\nseverity = \"warning\"\n")
            .expect("config should parse");
        let walker = Walker::builder()
            .rule(LineReporter {
                kinds: &[Kind::ClassDef],
            })
            .config(config)
            .build();

        let violations = walker.walk(&two_class_tree());
        assert!(violations.iter().all(|v| v.severity == Severity::Warning));
    }
}
