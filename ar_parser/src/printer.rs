/**
 * Textual dumps of trees, for diagnostics and tests.
 */

use std::fmt;
use ar_token::{Token, TokenKind};
use crate::node::AstNode;
use crate::tree::SyntaxTree;
use crate::walker::{walk, AstVisitor};

/// Prints the subtree as an s-expression: `(name child "leaf")`.
impl <'t, K> fmt::Display for AstNode<'t, K> where K : TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.token_text() {
            return write!(f, "{:?}", text);
        }
        write!(f, "({}", self.name())?;
        for child in self.children() {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

impl <K> fmt::Display for SyntaxTree<K> where K : TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root())
    }
}

struct Indented {
    depth: usize,
    out: String,
}

impl Indented {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}

impl <K> AstVisitor<K> for Indented where K : TokenKind {
    fn visit_node(&mut self, node: AstNode<'_, K>) {
        match node.adapter() {
            Some(adapter) => self.line(&format!("{} [{}]", node.name(), adapter)),
            None => self.line(node.name()),
        }
        self.depth += 1;
    }

    fn leave_node(&mut self, _node: AstNode<'_, K>) {
        self.depth -= 1;
    }

    fn visit_token(&mut self, node: AstNode<'_, K>, token: &Token<K>) {
        self.line(&format!("{} {:?} @{}", node.name(), token.text, token.position));
    }
}

impl <'t, K> AstNode<'t, K> where K : TokenKind {
    /// One node per line, children indented below their parent.
    pub fn dump(&self) -> String {
        let mut printer = Indented{ depth: 0, out: String::new() };
        walk(*self, &mut printer);
        printer.out
    }
}
