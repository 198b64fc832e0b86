//! Arena-based AST model for a single source file.
//!
//! The host parses a source file and hands the core a fully built, read-only
//! tree. Nodes live in a flat arena owned by [`Ast`] and are addressed by
//! [`NodeId`]; parent links are index back-references, never owned.

/// Syntactic category of an AST node.
///
/// This is the closed set of categories the convention rules dispatch on.
/// Keyword and literal tokens are distinct kinds so that a declaration's
/// modifier set can be collected without inspecting token text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Kind {
    CompilationUnit,
    ClassDef,
    InterfaceDef,
    EnumDef,
    /// Member block of a type declaration (fields, methods, initializers).
    ObjBlock,
    MethodDef,
    VariableDef,
    Parameters,
    Parameter,
    /// Modifier list of a declaration; children are modifier keyword tokens
    /// and annotations.
    Modifiers,
    Annotation,
    /// Named `key = value` argument inside an annotation.
    AnnotationValuePair,
    Type,
    Ident,
    Assign,
    Expr,
    MethodCall,
    Dot,
    ArgList,
    /// The `class` keyword token of a class literal such as `Foo.class`.
    ClassLiteral,
    TrueLiteral,
    FalseLiteral,
    VoidType,
    Public,
    Private,
    Protected,
    Static,
    Final,
    Abstract,
    Synchronized,
    StringLiteral,
    NumberLiteral,
}

impl Kind {
    /// Returns true for the type-declaration kinds (class, interface, enum).
    #[must_use]
    pub fn is_type_decl(self) -> bool {
        matches!(self, Self::ClassDef | Self::InterfaceDef | Self::EnumDef)
    }
}

/// Handle to a node within one [`Ast`].
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct NodeData {
    kind: Kind,
    text: Option<String>,
    line: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable syntax tree for one source file.
///
/// Built once by the host through [`AstBuilder`] and discarded after all
/// rules have visited it. Accessors never fail for ids issued by this tree.
#[derive(Debug)]
pub struct Ast {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Ast {
    /// Creates a builder for constructing a tree.
    #[must_use]
    pub fn builder() -> AstBuilder {
        AstBuilder::new()
    }

    /// Returns the root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the syntactic kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Kind {
        self.nodes[id.0].kind
    }

    /// Returns the literal text of a node, if any.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }

    /// Returns the 1-based source line of a node.
    #[must_use]
    pub fn line(&self, id: NodeId) -> usize {
        self.nodes[id.0].line
    }

    /// Returns the parent of a node, or `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns the children of a node in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Returns the sibling immediately preceding a node in its parent's
    /// child list, or `None` for a first child or the root.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        pos.checked_sub(1).map(|i| siblings[i])
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Cursor-style builder for [`Ast`].
///
/// Interior nodes are opened with [`start_node`](Self::start_node) and closed
/// with [`finish_node`](Self::finish_node); leaves are emitted with
/// [`token`](Self::token) or [`text_token`](Self::text_token). The first
/// opened node becomes the root.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    root: Option<NodeId>,
}

impl AstBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: Kind, text: Option<String>, line: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.stack.last().copied();
        self.nodes.push(NodeData {
            kind,
            text,
            line,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        } else {
            assert!(self.root.is_none(), "tree may only have one root node");
            self.root = Some(id);
        }
        id
    }

    /// Opens an interior node; subsequent nodes become its children until
    /// [`finish_node`](Self::finish_node) is called.
    pub fn start_node(&mut self, kind: Kind, line: usize) -> &mut Self {
        let id = self.push(kind, None, line);
        self.stack.push(id);
        self
    }

    /// Emits a leaf node without literal text.
    pub fn token(&mut self, kind: Kind, line: usize) -> &mut Self {
        self.push(kind, None, line);
        self
    }

    /// Emits a leaf node carrying literal text.
    pub fn text_token(&mut self, kind: Kind, text: impl Into<String>, line: usize) -> &mut Self {
        self.push(kind, Some(text.into()), line);
        self
    }

    /// Closes the most recently opened interior node.
    ///
    /// # Panics
    ///
    /// Panics if no node is open.
    pub fn finish_node(&mut self) -> &mut Self {
        assert!(self.stack.pop().is_some(), "finish_node without start_node");
        self
    }

    /// Finalizes the tree.
    ///
    /// # Panics
    ///
    /// Panics if no node was built or an interior node is still open.
    #[must_use]
    pub fn finish(self) -> Ast {
        assert!(
            self.stack.is_empty(),
            "unbalanced builder: {} node(s) still open",
            self.stack.len()
        );
        let Some(root) = self.root else {
            panic!("cannot build an empty tree");
        };
        Ast {
            nodes: self.nodes,
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> Ast {
        let mut b = Ast::builder();
        b.start_node(Kind::ClassDef, 1)
            .text_token(Kind::Ident, "Foo", 1)
            .start_node(Kind::ObjBlock, 1)
            .token(Kind::VariableDef, 2)
            .token(Kind::MethodDef, 3)
            .finish_node()
            .finish_node();
        b.finish()
    }

    #[test]
    fn builder_links_parents_and_children() {
        let ast = small_tree();
        let root = ast.root();
        assert_eq!(ast.kind(root), Kind::ClassDef);
        assert_eq!(ast.parent(root), None);
        assert_eq!(ast.children(root).len(), 2);

        let block = ast.children(root)[1];
        assert_eq!(ast.kind(block), Kind::ObjBlock);
        assert_eq!(ast.parent(block), Some(root));
        assert_eq!(ast.children(block).len(), 2);
    }

    #[test]
    fn text_and_lines_are_preserved() {
        let ast = small_tree();
        let ident = ast.children(ast.root())[0];
        assert_eq!(ast.text(ident), Some("Foo"));
        assert_eq!(ast.line(ident), 1);
        assert_eq!(ast.text(ast.root()), None);

        let block = ast.children(ast.root())[1];
        assert_eq!(ast.line(ast.children(block)[1]), 3);
    }

    #[test]
    fn prev_sibling_follows_child_order() {
        let ast = small_tree();
        let block = ast.children(ast.root())[1];
        let [field, method] = ast.children(block) else {
            panic!("expected two members");
        };
        assert_eq!(ast.prev_sibling(*method), Some(*field));
        assert_eq!(ast.prev_sibling(*field), None);
        assert_eq!(ast.prev_sibling(ast.root()), None);
    }

    #[test]
    fn type_decl_kinds() {
        assert!(Kind::ClassDef.is_type_decl());
        assert!(Kind::InterfaceDef.is_type_decl());
        assert!(Kind::EnumDef.is_type_decl());
        assert!(!Kind::MethodDef.is_type_decl());
    }

    #[test]
    #[should_panic(expected = "unbalanced builder")]
    fn unbalanced_builder_panics() {
        let mut b = Ast::builder();
        b.start_node(Kind::ClassDef, 1);
        let _ = b.finish();
    }
}
