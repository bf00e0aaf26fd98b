/**
 * Chainable queries over a syntax tree. A selection holds zero, one or many
 * nodes, and only allocates once a result has at least two of them.
 */

use std::borrow::Cow;
use std::slice;
use crate::error::IndexOutOfRange;
use crate::node::{AstNode, TypeMatch};
use crate::tree::{NodeId, SyntaxTree};

/// A set of nodes in document order.
#[derive(Debug)]
pub struct AstSelect<'t, K> {
    repr: Repr<'t, K>,
}

/// How many nodes a selection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Empty,
    Single,
    Many,
}

// 'Many' always holds at least two distinct identifiers in increasing order
#[derive(Debug)]
enum Repr<'t, K> {
    Empty,
    Single(AstNode<'t, K>),
    Many(&'t SyntaxTree<K>, Cow<'t, [NodeId]>),
}

impl <'t, K> Clone for AstSelect<'t, K> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Empty => Repr::Empty,
            Repr::Single(node) => Repr::Single(*node),
            Repr::Many(tree, ids) => Repr::Many(*tree, ids.clone()),
        };
        Self{ repr }
    }
}

// Accumulates a result without allocating for the first element.
enum Collector {
    Empty,
    Single(NodeId),
    Many(Vec<NodeId>),
}

impl Collector {
    fn push(&mut self, id: NodeId) {
        match self {
            Collector::Empty => *self = Collector::Single(id),
            Collector::Single(first) => {
                let first = *first;
                if first != id {
                    *self = Collector::Many(vec![first, id]);
                }
            },
            Collector::Many(ids) => ids.push(id),
        }
    }

    fn finish<'t, K>(self, tree: &'t SyntaxTree<K>) -> AstSelect<'t, K> {
        match self {
            Collector::Empty => AstSelect::empty(),
            Collector::Single(id) => AstSelect::single(AstNode::new(tree, id)),
            Collector::Many(mut ids) => {
                ids.sort_unstable();
                ids.dedup();
                if ids.len() == 1 {
                    AstSelect::single(AstNode::new(tree, ids[0]))
                }
                else {
                    AstSelect{ repr: Repr::Many(tree, Cow::Owned(ids)) }
                }
            },
        }
    }
}

impl <'t, K> AstSelect<'t, K> {
    pub fn empty() -> Self {
        Self{ repr: Repr::Empty }
    }

    pub fn single(node: AstNode<'t, K>) -> Self {
        Self{ repr: Repr::Single(node) }
    }

    // 'ids' has to be sorted and free of duplicates
    fn from_slice(tree: &'t SyntaxTree<K>, ids: &'t [NodeId]) -> Self {
        match ids {
            [] => Self::empty(),
            [id] => Self::single(AstNode::new(tree, *id)),
            _ => Self{ repr: Repr::Many(tree, Cow::Borrowed(ids)) },
        }
    }

    fn tree(&self) -> Option<&'t SyntaxTree<K>> {
        match &self.repr {
            Repr::Empty => None,
            Repr::Single(node) => Some(node.tree),
            Repr::Many(tree, _) => Some(*tree),
        }
    }

    fn ids(&self) -> &[NodeId] {
        match &self.repr {
            Repr::Empty => &[][..],
            Repr::Single(node) => slice::from_ref(&node.id),
            Repr::Many(_, ids) => &ids[..],
        }
    }

    /// Builds a new selection from what 'f' collects for every node.
    fn map_collect<F>(&self, mut f: F) -> Self
        where F : FnMut(AstNode<'t, K>, &mut Collector) {
        let tree = match self.tree() {
            Some(tree) => tree,
            None => return Self::empty(),
        };
        let mut collector = Collector::Empty;
        for id in self.ids() {
            f(AstNode::new(tree, *id), &mut collector);
        }
        collector.finish(tree)
    }

    pub fn size(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn is_single(&self) -> bool {
        self.size() == 1
    }

    pub fn cardinality(&self) -> Cardinality {
        match &self.repr {
            Repr::Empty => Cardinality::Empty,
            Repr::Single(_) => Cardinality::Single,
            Repr::Many(..) => Cardinality::Many,
        }
    }

    pub fn get(&self, index: usize) -> Result<AstNode<'t, K>, IndexOutOfRange> {
        let size = self.size();
        match (self.tree(), self.ids().get(index)) {
            (Some(tree), Some(id)) => Ok(AstNode::new(tree, *id)),
            _ => Err(IndexOutOfRange{ index, size }),
        }
    }

    pub fn first(&self) -> Option<AstNode<'t, K>> {
        self.get(0).ok()
    }

    pub fn iter(&self) -> Iter<'_, 't, K> {
        Iter{ tree: self.tree(), ids: self.ids().iter() }
    }

    /**
     * Downwards.
     */

    pub fn children(&self) -> Self {
        match &self.repr {
            Repr::Empty => Self::empty(),
            Repr::Single(node) => Self::from_slice(node.tree, node.child_ids()),
            Repr::Many(..) => self.map_collect(|node, out| {
                for child in node.child_ids() {
                    out.push(*child);
                }
            }),
        }
    }

    pub fn children_of<T>(&self, filter: T) -> Self where T : TypeMatch<K> {
        self.map_collect(|node, out| {
            for child in node.children() {
                if child.is(&filter) {
                    out.push(child.id);
                }
            }
        })
    }

    pub fn descendants(&self) -> Self {
        self.descendants_where(|_| true)
    }

    pub fn descendants_of<T>(&self, filter: T) -> Self where T : TypeMatch<K> {
        self.descendants_where(|node| node.is(&filter))
    }

    fn descendants_where<F>(&self, pred: F) -> Self where F : Fn(&AstNode<'t, K>) -> bool {
        // Subtrees are contiguous id ranges, members nested in an earlier
        // member's subtree are already covered
        let mut covered = 0;
        self.map_collect(|node, out| {
            if node.id.0 < covered {
                return;
            }
            for desc in node.descendants() {
                if pred(&desc) {
                    out.push(desc.id);
                }
            }
            covered = node.tree.data(node.id).end;
        })
    }

    /**
     * Upwards and sideways.
     */

    pub fn parent(&self) -> Self {
        self.map_collect(|node, out| {
            if let Some(parent) = node.parent() {
                out.push(parent.id);
            }
        })
    }

    pub fn ancestors(&self) -> Self {
        self.map_collect(|node, out| {
            for ancestor in node.ancestors() {
                out.push(ancestor.id);
            }
        })
    }

    pub fn first_ancestor<T>(&self, filter: T) -> Self where T : TypeMatch<K> {
        self.map_collect(|node, out| {
            if let Some(ancestor) = node.first_ancestor(&filter) {
                out.push(ancestor.id);
            }
        })
    }

    pub fn next_sibling(&self) -> Self {
        self.map_collect(|node, out| {
            if let Some(sibling) = node.next_sibling() {
                out.push(sibling.id);
            }
        })
    }

    pub fn previous_sibling(&self) -> Self {
        self.map_collect(|node, out| {
            if let Some(sibling) = node.previous_sibling() {
                out.push(sibling.id);
            }
        })
    }

    /**
     * Filtering.
     */

    pub fn filter<T>(&self, filter: T) -> Self where T : TypeMatch<K> {
        self.filter_by(|node| node.is(&filter))
    }

    pub fn filter_by<F>(&self, pred: F) -> Self where F : Fn(&AstNode<'t, K>) -> bool {
        match &self.repr {
            Repr::Single(node) if pred(node) => Self::single(*node),
            Repr::Single(_) | Repr::Empty => Self::empty(),
            Repr::Many(..) => self.map_collect(|node, out| {
                if pred(&node) {
                    out.push(node.id);
                }
            }),
        }
    }
}

pub struct Iter<'s, 't, K> {
    tree: Option<&'t SyntaxTree<K>>,
    ids: slice::Iter<'s, NodeId>,
}

impl <'s, 't, K> Iterator for Iter<'s, 't, K> {
    type Item = AstNode<'t, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree?;
        self.ids.next().map(|id| AstNode::new(tree, *id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl <'s, 't, K> DoubleEndedIterator for Iter<'s, 't, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let tree = self.tree?;
        self.ids.next_back().map(|id| AstNode::new(tree, *id))
    }
}

impl <'s, 't, K> ExactSizeIterator for Iter<'s, 't, K> {}

impl <'s, 't, K> IntoIterator for &'s AstSelect<'t, K> {
    type Item = AstNode<'t, K>;
    type IntoIter = Iter<'s, 't, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
