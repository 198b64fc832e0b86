//! # conv-lint-rules
//!
//! Built-in convention rules for conv-lint.
//!
//! Each rule is an independent pass over the same tree, built from the
//! query primitives in `conv-lint-core`; no rule depends on another.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CV001 | `log-declaration` | Checks the shape of an SLF4J log field declaration |
//! | CV002 | `dao-annotation` | Checks Spring annotations on DAO implementation classes |
//! | CV003 | `test-method-declaration` | Checks that `@Test` methods are public and return void |
//!
//! ## Usage
//!
//! ```ignore
//! use conv_lint_core::Walker;
//! use conv_lint_rules::{DaoAnnotation, LogDeclaration, TestMethodDeclaration};
//!
//! let walker = Walker::builder()
//!     .rule(LogDeclaration::new())
//!     .rule(DaoAnnotation::new())
//!     .rule(TestMethodDeclaration::new())
//!     .build();
//! let violations = walker.walk(&ast);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dao_annotation;
mod log_declaration;
mod presets;
mod test_method_declaration;

pub use dao_annotation::DaoAnnotation;
pub use log_declaration::LogDeclaration;
pub use presets::{all_rules, rules_from_config};
pub use test_method_declaration::TestMethodDeclaration;

/// Re-export core types for convenience.
pub use conv_lint_core::{Rule, Severity, Violation};
