/**
 * The concrete syntax tree. Nodes live in an arena ordered by document order,
 * so every subtree is a contiguous range of identifiers.
 */

use std::sync::Arc;
use ar_token::Token;
use crate::grammar::RuleTable;
use crate::matcher::{MatcherKind, RuleId};
use crate::node::AstNode;
use crate::select::AstSelect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The type tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType<K> {
    /// A leaf holding a token of this kind
    Token(K),
    Rule(RuleId),
    /// An anonymous combinator matched at the root
    Matcher(MatcherKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData<K> {
    pub ty: NodeType<K>,
    pub token: Option<Token<K>>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    // Position among the parent's children
    pub index: usize,
    // One past the last identifier of the subtree
    pub end: usize,
}

impl <K> NodeData<K> {
    pub fn leaf(kind: K, token: Token<K>) -> Self {
        Self::new(NodeType::Token(kind), Some(token), Vec::new())
    }

    pub fn branch(ty: NodeType<K>, children: Vec<NodeId>) -> Self {
        Self::new(ty, None, children)
    }

    fn new(ty: NodeType<K>, token: Option<Token<K>>, children: Vec<NodeId>) -> Self {
        Self{ ty, token, children, parent: None, index: 0, end: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree<K> {
    pub(crate) nodes: Vec<NodeData<K>>,
    pub(crate) rules: Arc<RuleTable>,
}

impl <K> SyntaxTree<K> {
    /// Finalizes the nodes reachable from 'root', renumbering them in
    /// pre-order and linking parents.
    pub(crate) fn from_raw(mut raw: Vec<NodeData<K>>, root: NodeId, rules: Arc<RuleTable>) -> Self
        where K : Copy {
        let mut order = Vec::with_capacity(raw.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(raw[id.0].children.iter().rev());
        }

        let mut renumber = vec![0; raw.len()];
        for (new, old) in order.iter().enumerate() {
            renumber[old.0] = new;
        }

        let mut nodes: Vec<NodeData<K>> = order.iter()
            .map(|old| {
                let node = &mut raw[old.0];
                let children = node.children.iter().map(|c| NodeId(renumber[c.0])).collect();
                NodeData::new(node.ty, node.token.take(), children)
            })
            .collect();

        for i in 0..nodes.len() {
            for j in 0..nodes[i].children.len() {
                let child = nodes[i].children[j];
                nodes[child.0].parent = Some(NodeId(i));
                nodes[child.0].index = j;
            }
        }
        for i in (0..nodes.len()).rev() {
            nodes[i].end = match nodes[i].children.last() {
                Some(last) => nodes[last.0].end,
                None => i + 1,
            };
        }
        Self{ nodes, rules }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn root(&self) -> AstNode<'_, K> {
        AstNode::new(self, NodeId(0))
    }

    pub fn node(&self, id: NodeId) -> Option<AstNode<'_, K>> {
        if id.0 < self.nodes.len() {
            Some(AstNode::new(self, id))
        }
        else {
            None
        }
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = AstNode<'_, K>> + '_ {
        (0..self.nodes.len()).map(move |i| AstNode::new(self, NodeId(i)))
    }

    /// The tokens of the leaves, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token<K>> + '_ {
        self.nodes.iter().filter_map(|n| n.token.as_ref())
    }

    pub fn find_rule(&self, name: &str) -> Option<RuleId> {
        self.rules.find(name)
    }

    pub fn select(&self) -> AstSelect<'_, K> {
        AstSelect::single(self.root())
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData<K> {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_token::Position;

    fn leaf(text: &str) -> NodeData<()> {
        NodeData::leaf((), Token::new((), text, Position::new()))
    }

    #[test]
    fn renumbers_in_pre_order() {
        // Built bottom-up: leaves first, then inner node, then root
        let raw = vec![
            leaf("a"),                                                           // 0
            leaf("b"),                                                           // 1
            NodeData::branch(NodeType::Matcher(MatcherKind::Sequence), vec![NodeId(0), NodeId(1)]), // 2
            leaf("c"),                                                           // 3
            leaf("unused"),                                                      // 4
            NodeData::branch(NodeType::Matcher(MatcherKind::Sequence), vec![NodeId(2), NodeId(3)]), // 5
        ];
        let tree = SyntaxTree::from_raw(raw, NodeId(5), Arc::new(RuleTable::default()));
        assert_eq!(tree.len(), 5);
        let texts: Vec<_> = tree.tokens().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);

        let root = tree.data(NodeId(0));
        assert_eq!(root.children, vec![NodeId(1), NodeId(4)]);
        assert_eq!(root.end, 5);
        let inner = tree.data(NodeId(1));
        assert_eq!(inner.parent, Some(NodeId(0)));
        assert_eq!(inner.children, vec![NodeId(2), NodeId(3)]);
        assert_eq!(inner.end, 4);
        assert_eq!(tree.data(NodeId(4)).index, 1);
        assert_eq!(tree.data(NodeId(4)).end, 5);
    }
}
