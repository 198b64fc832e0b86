//! Generic, side-effect-free queries over an [`Ast`].
//!
//! Every convention rule reduces to "does a required substructure exist under
//! this declaration, with required properties". These primitives keep the
//! rules declarative: all of them are total and return an empty or `None`
//! result for "not found" rather than signaling failure.
//!
//! Descendant searches are iterative depth-first pre-order walks over an
//! explicit stack, so "first match in document order" is a stated contract
//! and deep trees cannot overflow the call stack.

use std::collections::HashSet;

use crate::ast::{Ast, Kind, NodeId};

/// The set of non-annotation modifier kinds attached to a declaration.
pub type ModifierSet = HashSet<Kind>;

/// Collects the modifier keywords on a declaration.
///
/// Annotations in the modifier list are ignored. Returns the empty set when
/// the declaration has no modifier list.
#[must_use]
pub fn modifiers_of(ast: &Ast, decl: NodeId) -> ModifierSet {
    let mut modifiers = ModifierSet::new();
    if let Some(list) = first_child_of_kind(ast, decl, Kind::Modifiers) {
        for &child in ast.children(list) {
            if ast.kind(child) != Kind::Annotation {
                modifiers.insert(ast.kind(child));
            }
        }
    }
    modifiers
}

/// Returns the first direct child of `node` with the given kind.
#[must_use]
pub fn first_child_of_kind(ast: &Ast, node: NodeId, kind: Kind) -> Option<NodeId> {
    ast.children(node)
        .iter()
        .copied()
        .find(|&c| ast.kind(c) == kind)
}

/// Pre-order depth-first search for the first descendant of the given kind.
///
/// `start` itself is checked first; among descendants, earlier siblings win
/// over later ones and parents win over their own subtrees.
#[must_use]
pub fn find_descendant_of_kind(ast: &Ast, start: NodeId, kind: Kind) -> Option<NodeId> {
    find_descendant(ast, start, |id| ast.kind(id) == kind)
}

/// Pre-order depth-first search for the first descendant whose literal text
/// equals `text`. Comparison is exact and case-sensitive.
#[must_use]
pub fn find_descendant_with_text(ast: &Ast, start: NodeId, text: &str) -> Option<NodeId> {
    find_descendant(ast, start, |id| ast.text(id) == Some(text))
}

fn find_descendant(ast: &Ast, start: NodeId, matches: impl Fn(NodeId) -> bool) -> Option<NodeId> {
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if matches(node) {
            return Some(node);
        }
        // Reversed so the first child is popped first.
        stack.extend(ast.children(node).iter().rev());
    }
    None
}

/// Returns the identifier text of a declaration.
///
/// This is the text of the first direct `Ident` child, or the empty string
/// when the declaration has none, so callers stay total.
#[must_use]
pub fn identifier_of(ast: &Ast, decl: NodeId) -> &str {
    first_child_of_kind(ast, decl, Kind::Ident)
        .and_then(|id| ast.text(id))
        .unwrap_or("")
}

/// Walks parent references upward to the nearest enclosing type declaration.
///
/// A node that is itself a type declaration is its own enclosing type.
/// Returns `None` when the walk exhausts the tree without finding one.
#[must_use]
pub fn enclosing_type_of(ast: &Ast, node: NodeId) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(id) = current {
        if ast.kind(id).is_type_decl() {
            return Some(id);
        }
        current = ast.parent(id);
    }
    None
}

/// Iterates over the annotations in a declaration's modifier list.
pub fn annotations_of<'a>(ast: &'a Ast, decl: NodeId) -> impl Iterator<Item = NodeId> + 'a {
    first_child_of_kind(ast, decl, Kind::Modifiers)
        .map(|list| ast.children(list))
        .unwrap_or_default()
        .iter()
        .copied()
        .filter(|&c| ast.kind(c) == Kind::Annotation)
}

/// Returns true when a declaration carries an annotation with the given
/// simple name.
#[must_use]
pub fn has_annotation(ast: &Ast, decl: NodeId, name: &str) -> bool {
    annotations_of(ast, decl).any(|a| identifier_of(ast, a) == name)
}

/// Value of a named annotation argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgValue {
    /// Argument present with the literal `true`.
    True,
    /// Argument present with the literal `false`.
    False,
    /// Argument present with some other value.
    Other,
    /// No argument with the requested name.
    Absent,
}

/// Extracts the value of a named `key = value` argument on an annotation.
///
/// Only boolean literals are distinguished; any other value reports
/// [`ArgValue::Other`]. When the same name appears more than once the last
/// occurrence wins, matching document processing order.
#[must_use]
pub fn argument_value(ast: &Ast, annotation: NodeId, name: &str) -> ArgValue {
    let mut value = ArgValue::Absent;
    for &child in ast.children(annotation) {
        if ast.kind(child) == Kind::AnnotationValuePair && identifier_of(ast, child) == name {
            value = if find_descendant_of_kind(ast, child, Kind::TrueLiteral).is_some() {
                ArgValue::True
            } else if find_descendant_of_kind(ast, child, Kind::FalseLiteral).is_some() {
                ArgValue::False
            } else {
                ArgValue::Other
            };
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    // class Foo { @Deprecated private static final Logger LOG = ...; }
    fn field_tree() -> Ast {
        let mut b = Ast::builder();
        b.start_node(Kind::ClassDef, 1)
            .text_token(Kind::Ident, "Foo", 1)
            .start_node(Kind::ObjBlock, 1)
            .start_node(Kind::VariableDef, 2);
        b.start_node(Kind::Modifiers, 2)
            .start_node(Kind::Annotation, 2)
            .text_token(Kind::Ident, "Deprecated", 2)
            .finish_node()
            .token(Kind::Private, 2)
            .token(Kind::Static, 2)
            .token(Kind::Final, 2)
            .finish_node();
        b.start_node(Kind::Type, 2)
            .text_token(Kind::Ident, "Logger", 2)
            .finish_node()
            .text_token(Kind::Ident, "LOG", 2)
            .finish_node()
            .finish_node()
            .finish_node();
        b.finish()
    }

    fn field_of(ast: &Ast) -> NodeId {
        let block = first_child_of_kind(ast, ast.root(), Kind::ObjBlock).unwrap();
        ast.children(block)[0]
    }

    #[test]
    fn modifiers_exclude_annotations() {
        let ast = field_tree();
        let modifiers = modifiers_of(&ast, field_of(&ast));
        let expected: ModifierSet = [Kind::Private, Kind::Static, Kind::Final].into();
        assert_eq!(modifiers, expected);
    }

    #[test]
    fn modifiers_of_bare_decl_is_empty() {
        let mut b = Ast::builder();
        b.start_node(Kind::VariableDef, 1)
            .text_token(Kind::Ident, "x", 1)
            .finish_node();
        let ast = b.finish();
        assert!(modifiers_of(&ast, ast.root()).is_empty());
    }

    #[test]
    fn find_of_kind_checks_start_first() {
        let ast = field_tree();
        assert_eq!(
            find_descendant_of_kind(&ast, ast.root(), Kind::ClassDef),
            Some(ast.root())
        );
    }

    #[test]
    fn find_of_kind_prefers_document_order() {
        // Two Ident tokens at different depths; the shallower, earlier one
        // is under the first child and must win.
        let mut b = Ast::builder();
        b.start_node(Kind::Expr, 1)
            .start_node(Kind::Dot, 1)
            .text_token(Kind::Ident, "first", 1)
            .finish_node()
            .text_token(Kind::Ident, "second", 1)
            .finish_node();
        let ast = b.finish();
        let found = find_descendant_of_kind(&ast, ast.root(), Kind::Ident).unwrap();
        assert_eq!(ast.text(found), Some("first"));
    }

    #[test]
    fn find_of_kind_misses_gracefully() {
        let ast = field_tree();
        assert_eq!(
            find_descendant_of_kind(&ast, ast.root(), Kind::MethodCall),
            None
        );
    }

    #[test]
    fn find_text_is_case_sensitive() {
        let ast = field_tree();
        assert!(find_descendant_with_text(&ast, ast.root(), "Logger").is_some());
        assert!(find_descendant_with_text(&ast, ast.root(), "logger").is_none());
    }

    #[test]
    fn identifier_of_direct_child_only() {
        let ast = field_tree();
        // The class identifier is "Foo"; the nested field identifier must
        // not leak out of a direct-child lookup.
        assert_eq!(identifier_of(&ast, ast.root()), "Foo");
        assert_eq!(identifier_of(&ast, field_of(&ast)), "LOG");
    }

    #[test]
    fn identifier_of_missing_is_empty() {
        let mut b = Ast::builder();
        b.start_node(Kind::Modifiers, 1).finish_node();
        let ast = b.finish();
        assert_eq!(identifier_of(&ast, ast.root()), "");
    }

    #[test]
    fn enclosing_type_walks_upward() {
        let ast = field_tree();
        let field = field_of(&ast);
        let ident = first_child_of_kind(&ast, field, Kind::Ident).unwrap();
        assert_eq!(enclosing_type_of(&ast, ident), Some(ast.root()));
        assert_eq!(enclosing_type_of(&ast, ast.root()), Some(ast.root()));
    }

    #[test]
    fn enclosing_type_absent_outside_types() {
        let mut b = Ast::builder();
        b.start_node(Kind::CompilationUnit, 1)
            .token(Kind::MethodDef, 2)
            .finish_node();
        let ast = b.finish();
        let method = ast.children(ast.root())[0];
        assert_eq!(enclosing_type_of(&ast, method), None);
    }

    #[test]
    fn annotations_and_names() {
        let ast = field_tree();
        let field = field_of(&ast);
        let names: Vec<&str> = annotations_of(&ast, field)
            .map(|a| identifier_of(&ast, a))
            .collect();
        assert_eq!(names, ["Deprecated"]);
        assert!(has_annotation(&ast, field, "Deprecated"));
        assert!(!has_annotation(&ast, field, "Test"));
    }

    fn annotation_with_arg(kind: Option<Kind>) -> Ast {
        let mut b = Ast::builder();
        b.start_node(Kind::Annotation, 1)
            .text_token(Kind::Ident, "Transactional", 1)
            .start_node(Kind::AnnotationValuePair, 1)
            .text_token(Kind::Ident, "readOnly", 1);
        match kind {
            Some(k) => b.token(k, 1),
            None => b.text_token(Kind::Ident, "flag", 1),
        };
        b.finish_node().finish_node();
        b.finish()
    }

    #[test]
    fn argument_value_distinguishes_literals() {
        let ast = annotation_with_arg(Some(Kind::TrueLiteral));
        assert_eq!(argument_value(&ast, ast.root(), "readOnly"), ArgValue::True);

        let ast = annotation_with_arg(Some(Kind::FalseLiteral));
        assert_eq!(
            argument_value(&ast, ast.root(), "readOnly"),
            ArgValue::False
        );

        let ast = annotation_with_arg(None);
        assert_eq!(
            argument_value(&ast, ast.root(), "readOnly"),
            ArgValue::Other
        );
    }

    #[test]
    fn argument_value_absent_for_other_names() {
        let ast = annotation_with_arg(Some(Kind::TrueLiteral));
        assert_eq!(argument_value(&ast, ast.root(), "timeout"), ArgValue::Absent);
    }
}
