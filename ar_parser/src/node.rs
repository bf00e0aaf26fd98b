/**
 * Borrowed handle of a single node and its navigation.
 */

use std::ptr;
use ar_token::{Token, TokenKind};
use crate::matcher::{MatcherKind, RuleId};
use crate::select::AstSelect;
use crate::tree::{NodeData, NodeId, NodeType, SyntaxTree};

/// Anything a node's type can be tested against: a single type, a rule, a
/// matcher kind, or any list of those.
pub trait TypeMatch<K> {
    fn matches(&self, ty: &NodeType<K>) -> bool;
}

impl <K> TypeMatch<K> for NodeType<K> where K : PartialEq {
    fn matches(&self, ty: &NodeType<K>) -> bool {
        self == ty
    }
}

impl <K> TypeMatch<K> for RuleId {
    fn matches(&self, ty: &NodeType<K>) -> bool {
        match ty {
            NodeType::Rule(r) => r == self,
            _ => false,
        }
    }
}

impl <K> TypeMatch<K> for MatcherKind {
    fn matches(&self, ty: &NodeType<K>) -> bool {
        match ty {
            NodeType::Matcher(m) => m == self,
            _ => false,
        }
    }
}

impl <K, T> TypeMatch<K> for [T] where T : TypeMatch<K> {
    fn matches(&self, ty: &NodeType<K>) -> bool {
        self.iter().any(|t| t.matches(ty))
    }
}

impl <K, T, const N: usize> TypeMatch<K> for [T; N] where T : TypeMatch<K> {
    fn matches(&self, ty: &NodeType<K>) -> bool {
        self[..].matches(ty)
    }
}

impl <K, T> TypeMatch<K> for Vec<T> where T : TypeMatch<K> {
    fn matches(&self, ty: &NodeType<K>) -> bool {
        self[..].matches(ty)
    }
}

impl <K, T> TypeMatch<K> for &T where T : TypeMatch<K> + ?Sized {
    fn matches(&self, ty: &NodeType<K>) -> bool {
        (**self).matches(ty)
    }
}

#[derive(Debug)]
pub struct AstNode<'t, K> {
    pub(crate) tree: &'t SyntaxTree<K>,
    pub(crate) id: NodeId,
}

impl <'t, K> Clone for AstNode<'t, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl <'t, K> Copy for AstNode<'t, K> {}

/// Two handles are equal if they point to the same node of the same tree.
impl <'t, K> PartialEq for AstNode<'t, K> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl <'t, K> Eq for AstNode<'t, K> {}

impl <'t, K> AstNode<'t, K> {
    pub(crate) fn new(tree: &'t SyntaxTree<K>, id: NodeId) -> Self {
        Self{ tree, id }
    }

    fn data(&self) -> &'t NodeData<K> {
        self.tree.data(self.id)
    }

    fn at(&self, id: NodeId) -> Self {
        Self::new(self.tree, id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree<K> {
        self.tree
    }

    pub fn is<T>(&self, filter: T) -> bool where T : TypeMatch<K> {
        filter.matches(&self.data().ty)
    }

    /// The token of a leaf.
    pub fn token(&self) -> Option<&'t Token<K>> {
        self.data().token.as_ref()
    }

    pub fn token_text(&self) -> Option<&'t str> {
        self.token().map(|t| t.text.as_str())
    }

    /// The first token of the subtree.
    pub fn first_token(&self) -> Option<&'t Token<K>> {
        self.tokens().next()
    }

    /// Tokens of every leaf in the subtree, in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &'t Token<K>> {
        let tree = self.tree;
        (self.id.0..self.data().end).filter_map(move |i| tree.data(NodeId(i)).token.as_ref())
    }

    /// The leaf texts of the subtree joined with single spaces.
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self.tokens().map(|t| t.text.as_str()).collect();
        texts.join(" ")
    }

    pub fn is_leaf(&self) -> bool {
        self.data().children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    pub fn rule(&self) -> Option<RuleId> {
        match self.data().ty {
            NodeType::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// The adapter tag of the rule that produced the node.
    pub fn adapter(&self) -> Option<&'t str> {
        let tree = self.tree;
        self.rule().and_then(|r| tree.rules.get(r).adapter.as_deref())
    }

    /**
     * Navigation.
     */

    pub(crate) fn child_ids(&self) -> &'t [NodeId] {
        &self.data().children
    }

    pub fn children(&self) -> impl Iterator<Item = AstNode<'t, K>> + ExactSizeIterator + DoubleEndedIterator {
        let tree = self.tree;
        self.child_ids().iter().map(move |id| AstNode::new(tree, *id))
    }

    pub fn num_children(&self) -> usize {
        self.data().children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.is_leaf()
    }

    pub fn child(&self, index: usize) -> Option<Self> {
        self.data().children.get(index).map(|id| self.at(*id))
    }

    pub fn first_child(&self) -> Option<Self> {
        self.data().children.first().map(|id| self.at(*id))
    }

    pub fn last_child(&self) -> Option<Self> {
        self.data().children.last().map(|id| self.at(*id))
    }

    pub fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.at(id))
    }

    pub fn next_sibling(&self) -> Option<Self> {
        let index = self.data().index;
        self.parent().and_then(|p| p.child(index + 1))
    }

    pub fn previous_sibling(&self) -> Option<Self> {
        let index = self.data().index;
        if index == 0 {
            return None;
        }
        self.parent().and_then(|p| p.child(index - 1))
    }

    /// Every node below this one, in document order.
    pub fn descendants(&self) -> impl Iterator<Item = AstNode<'t, K>> {
        let tree = self.tree;
        (self.id.0 + 1..self.data().end).map(move |i| AstNode::new(tree, NodeId(i)))
    }

    pub fn first_descendant<T>(&self, filter: T) -> Option<Self> where T : TypeMatch<K> {
        self.descendants().find(|n| n.is(&filter))
    }

    /// Parent, grandparent and so on up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = AstNode<'t, K>> {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    pub fn first_ancestor<T>(&self, filter: T) -> Option<Self> where T : TypeMatch<K> {
        self.ancestors().find(|n| n.is(&filter))
    }

    /// True if 'other' is in this node's subtree, including the node itself.
    pub fn contains(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id <= other.id && other.id.0 < self.data().end
    }

    pub fn select(&self) -> AstSelect<'t, K> {
        AstSelect::single(*self)
    }
}

impl <'t, K> AstNode<'t, K> where K : Copy {
    pub fn ty(&self) -> NodeType<K> {
        self.data().ty
    }
}

impl <'t, K> AstNode<'t, K> where K : TokenKind {
    /// Rule name for rule nodes, kind name for leaves.
    pub fn name(&self) -> &'t str {
        match self.data().ty {
            NodeType::Token(kind) => kind.name(),
            NodeType::Rule(rule) => self.tree.rules.name(rule),
            NodeType::Matcher(kind) => kind.name(),
        }
    }
}
