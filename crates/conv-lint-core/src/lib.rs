//! # conv-lint-core
//!
//! Core framework for structural convention linting over a Java-style AST.
//!
//! The host parses source files and hands each fully built, read-only tree
//! to this crate. The crate provides:
//!
//! - [`Ast`]/[`AstBuilder`] - the arena-based tree model handed over by the host
//! - [`query`] - pure tree query primitives rules are built from
//! - [`Rule`] trait for kind-dispatched convention rules
//! - [`Walker`] for one document-order pass per file
//! - [`Violation`] for representing rule findings
//!
//! ## Example
//!
//! ```ignore
//! use conv_lint_core::{Ast, Walker};
//!
//! let ast = build_tree_from_parser_output();
//! let walker = Walker::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! for violation in walker.walk(&ast) {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ast;
mod config;
mod rule;
mod types;
mod walker;

/// Tree query primitives for rule implementations.
pub mod query;

pub use ast::{Ast, AstBuilder, Kind, NodeId};
pub use config::{Config, ConfigError, RuleConfig};
pub use query::{ArgValue, ModifierSet};
pub use rule::{Rule, RuleBox};
pub use types::{LintResult, Severity, Violation};
pub use walker::{Walker, WalkerBuilder};
