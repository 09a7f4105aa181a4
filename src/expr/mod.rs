//! Expression trees and constant traversal.
//!
//! Directive targets are not always plain literals: authors write ternaries
//! (`ajax ? "@Cascade/bare.html.twig" : "@Cascade/page.html.twig"`),
//! concatenations, or helper calls around an otherwise-literal template name.
//! The rewrite passes need to reach every literal inside such an expression
//! without enumerating the host engine's node vocabulary, so traversal is
//! generic: any node type that can expose "my literal value, if I am one" and
//! "visit my children" works.
//!
//! [`Expr`] is the concrete tree the engine-facing passes and tests use;
//! [`ExprNode`] is the seam a host engine's own AST can implement instead.

use crate::core::error::Result;

/// A node in an expression tree that the constant traversal can walk.
pub trait ExprNode: Sized {
    /// Mutable access to this node's literal string value, if it is one.
    ///
    /// Returning `Some` stops descent: a literal has no children worth
    /// visiting, and the caller may rewrite the value in place.
    fn constant_value_mut(&mut self) -> Option<&mut String>;

    /// Visit every direct child of this node.
    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut Self));
}

/// Applies `f` to every literal string sub-expression reachable from `node`.
///
/// Literal nodes are visited and not descended into; every other node kind is
/// recursed through generically. The first error aborts the walk.
pub fn try_visit_constants<N: ExprNode>(
    node: &mut N,
    f: &mut dyn FnMut(&mut String) -> Result<()>,
) -> Result<()> {
    if let Some(value) = node.constant_value_mut() {
        return f(value);
    }

    let mut outcome = Ok(());
    node.for_each_child_mut(&mut |child| {
        if outcome.is_ok() {
            outcome = try_visit_constants(child, f);
        }
    });
    outcome
}

/// Expression tree for directive targets.
///
/// A deliberately small vocabulary: enough to express the computed targets
/// that occur in real templates. Only [`Expr::Constant`] counts as a literal;
/// a [`Expr::Name`] is a runtime variable and is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal string, e.g. a directly-written template name.
    Constant(String),
    /// A variable reference.
    Name(String),
    /// String concatenation.
    Concat(Box<Expr>, Box<Expr>),
    /// Ternary selection between two sub-expressions.
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// A call to an engine function or filter.
    FunctionCall { name: String, arguments: Vec<Expr> },
    /// An inline array of expressions.
    Array(Vec<Expr>),
}

impl Expr {
    /// A literal string node.
    pub fn constant(value: impl Into<String>) -> Self {
        Self::Constant(value.into())
    }

    /// A variable-reference node.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl ExprNode for Expr {
    fn constant_value_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Constant(value) => Some(value),
            _ => None,
        }
    }

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut Self)) {
        match self {
            Self::Constant(_) | Self::Name(_) => {}
            Self::Concat(left, right) => {
                f(left);
                f(right);
            }
            Self::Conditional { condition, then, otherwise } => {
                f(condition);
                f(then);
                f(otherwise);
            }
            Self::FunctionCall { arguments, .. } => {
                for argument in arguments {
                    f(argument);
                }
            }
            Self::Array(items) => {
                for item in items {
                    f(item);
                }
            }
        }
    }
}
