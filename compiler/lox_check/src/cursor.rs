//! Ancestor-aware position in the syntax tree.
//!
//! The validator keeps one [`Cursor`] for the whole walk: entering a node
//! pushes it, leaving pops it. Checks query the path to answer questions
//! like "which function am I in" without the tree storing parent links.

use lox_ir::{ClassDecl, Expr, FunctionDecl, Program, Stmt};

/// A borrowed reference to any node the validator visits.
#[derive(Copy, Clone, Debug)]
pub enum Node<'ast> {
    Program(&'ast Program),
    Stmt(&'ast Stmt),
    /// A method declared directly inside a class body.
    Method(&'ast FunctionDecl),
    Expr(&'ast Expr),
}

/// The function or method body that encloses a node.
#[derive(Copy, Clone, Debug)]
pub struct FunctionScope<'ast> {
    pub decl: &'ast FunctionDecl,
    /// `true` if the declaration is a method of a class.
    pub is_method: bool,
}

impl FunctionScope<'_> {
    /// Returns `true` for a class's `init` method.
    pub fn is_initializer(&self) -> bool {
        self.is_method && self.decl.name == "init"
    }
}

/// Path from the program root to the node being checked.
#[derive(Clone, Debug)]
pub struct Cursor<'ast> {
    path: Vec<Node<'ast>>,
}

impl<'ast> Cursor<'ast> {
    /// Create a cursor positioned at the program root.
    pub fn new(program: &'ast Program) -> Self {
        Cursor {
            path: vec![Node::Program(program)],
        }
    }

    /// The node currently being checked.
    #[inline]
    pub fn node(&self) -> Node<'ast> {
        // The root is never popped.
        self.path[self.path.len() - 1]
    }

    /// The node directly enclosing the current one, if any.
    #[inline]
    pub fn parent(&self) -> Option<Node<'ast>> {
        self.ancestors().next()
    }

    /// Number of nodes on the path, including the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Enclosing nodes, innermost first, excluding the current node.
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'ast>> + '_ {
        self.path.iter().rev().skip(1).copied()
    }

    /// Returns `true` if the current node is a statement at the top level of
    /// the program.
    pub fn is_top_level(&self) -> bool {
        matches!(self.parent(), Some(Node::Program(_)))
    }

    /// The nearest function or method whose body contains the current node.
    pub fn enclosing_function(&self) -> Option<FunctionScope<'ast>> {
        self.ancestors().find_map(|node| match node {
            Node::Stmt(Stmt::Function(decl)) => Some(FunctionScope {
                decl: decl.as_ref(),
                is_method: false,
            }),
            Node::Method(decl) => Some(FunctionScope {
                decl,
                is_method: true,
            }),
            _ => None,
        })
    }

    /// The nearest class declaration containing the current node.
    pub fn enclosing_class(&self) -> Option<&'ast ClassDecl> {
        self.ancestors().find_map(|node| match node {
            Node::Stmt(Stmt::Class(decl)) => Some(decl),
            _ => None,
        })
    }

    pub(crate) fn push(&mut self, node: Node<'ast>) {
        self.path.push(node);
    }

    pub(crate) fn pop(&mut self) {
        debug_assert!(self.path.len() > 1, "Cursor::pop() would remove the root");
        if self.path.len() > 1 {
            self.path.pop();
        }
    }
}
