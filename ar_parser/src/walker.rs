/**
 * Depth-first traversal with visitor callbacks.
 */

use ar_token::Token;
use crate::node::AstNode;

/// Callbacks of a tree walk. Interior nodes get 'visit_node' before their
/// children and 'leave_node' after them, leaves get 'visit_token'.
pub trait AstVisitor<K> {
    fn visit_node(&mut self, _node: AstNode<'_, K>) { }

    fn leave_node(&mut self, _node: AstNode<'_, K>) { }

    fn visit_token(&mut self, _node: AstNode<'_, K>, _token: &Token<K>) { }
}

pub fn walk<K, V>(node: AstNode<'_, K>, visitor: &mut V) where V : AstVisitor<K> + ?Sized {
    match node.token() {
        Some(token) => visitor.visit_token(node, token),
        None => {
            visitor.visit_node(node);
            for child in node.children() {
                walk(child, visitor);
            }
            visitor.leave_node(node);
        },
    }
}
