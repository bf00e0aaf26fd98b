/**
 * Building, validating and holding a grammar.
 */

use std::collections::HashMap;
use std::sync::Arc;
use log::debug;
use ar_token::TokenKind;
use crate::analysis;
use crate::cursor::ParseCursor;
use crate::engine;
use crate::error::GrammarError;
use crate::expr::Expr;
use crate::failure::Failure;
use crate::matcher::{Matcher, MatcherId, MatcherKind, RuleId, RuleShape};
use crate::tree::SyntaxTree;

/// Everything known about a rule apart from its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub name: String,
    /// Opaque tag for downstream consumers
    pub adapter: Option<String>,
    pub shape: RuleShape,
}

/// Rule metadata, shared between a grammar and the trees it produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<RuleInfo>,
}

impl RuleTable {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, rule: RuleId) -> &RuleInfo {
        &self.rules[rule.0]
    }

    pub fn name(&self, rule: RuleId) -> &str {
        &self.rules[rule.0].name
    }

    pub fn find(&self, name: &str) -> Option<RuleId> {
        self.rules.iter().position(|r| r.name == name).map(RuleId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &RuleInfo)> + '_ {
        self.rules.iter().enumerate().map(|(i, r)| (RuleId(i), r))
    }
}

/// Where a match starts: a named rule or any interned matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    Rule(RuleId),
    Matcher(MatcherId),
}

impl From<RuleId> for Entry {
    fn from(rule: RuleId) -> Self {
        Entry::Rule(rule)
    }
}

impl From<MatcherId> for Entry {
    fn from(matcher: MatcherId) -> Self {
        Entry::Matcher(matcher)
    }
}

#[derive(Debug, Clone)]
pub struct GrammarBuilder<K> {
    matchers: Vec<Matcher<K>>,
    rules: Vec<RuleInfo>,
    bodies: Vec<Option<MatcherId>>,
    names: HashMap<String, RuleId>,
    // Problems found while interning, reported by 'build'
    errors: Vec<GrammarError>,
}

impl <K> Default for GrammarBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl <K> GrammarBuilder<K> {
    pub fn new() -> Self {
        Self{
            matchers: Vec::new(),
            rules: Vec::new(),
            bodies: Vec::new(),
            names: HashMap::new(),
            errors: Vec::new(),
        }
    }

    /// Declares the rule if it's not known yet and returns its identifier.
    pub fn rule(&mut self, name: &str) -> RuleId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }
        let id = RuleId(self.rules.len());
        self.rules.push(RuleInfo{ name: name.into(), adapter: None, shape: RuleShape::Keep });
        self.bodies.push(None);
        self.names.insert(name.into(), id);
        id
    }

    /// Sets the body of a rule. The returned handle sets the rule's options.
    pub fn define(&mut self, name: &str, body: impl Into<Expr<K>>) -> RuleDefinition<'_, K> {
        let rule = self.rule(name);
        let body = self.intern(body);
        if self.bodies[rule.0].is_some() {
            self.errors.push(GrammarError::DuplicateRule(name.into()));
        }
        else {
            self.bodies[rule.0] = Some(body);
        }
        RuleDefinition{ builder: self, rule }
    }

    /// Adds the expression to the arena. The identifier stays valid in the
    /// built grammar, so it can be used as an anonymous entry point.
    pub fn intern(&mut self, expr: impl Into<Expr<K>>) -> MatcherId {
        let matcher = match expr.into() {
            Expr::Token(kind) => Matcher::Token(kind),
            Expr::Literal(text) => Matcher::Literal(text),
            Expr::Any => Matcher::Any,
            Expr::Seq(items) => Matcher::Sequence(self.intern_all(items)),
            Expr::Choice(items) => {
                if items.is_empty() {
                    self.errors.push(GrammarError::EmptyCombinator{ kind: MatcherKind::Choice });
                }
                Matcher::Choice(self.intern_all(items))
            },
            Expr::And(items) => {
                if items.is_empty() {
                    self.errors.push(GrammarError::EmptyCombinator{ kind: MatcherKind::And });
                }
                Matcher::And(self.intern_all(items))
            },
            Expr::Till{ inner, inclusive } => Matcher::Till{ inner: self.intern(*inner), inclusive },
            Expr::Optional(inner) => Matcher::Optional(self.intern(*inner)),
            Expr::Repeat{ inner, min, max } => {
                if let Some(max) = max {
                    if max == 0 || max < min {
                        self.errors.push(GrammarError::InvalidRepetition{ min, max });
                    }
                }
                Matcher::Repeat{ inner: self.intern(*inner), min, max }
            },
            Expr::Next(inner) => Matcher::Next(self.intern(*inner)),
            Expr::Not(inner) => Matcher::Not(self.intern(*inner)),
            Expr::Rule(rule) => {
                // Identifiers only grow, one out of range came from another builder
                if rule.0 >= self.rules.len() {
                    self.errors.push(GrammarError::UnknownRule(rule.0));
                }
                Matcher::Rule(rule)
            },
            Expr::Named(name) => Matcher::Rule(self.rule(&name)),
        };
        let id = MatcherId(self.matchers.len());
        self.matchers.push(matcher);
        id
    }

    fn intern_all(&mut self, items: Vec<Expr<K>>) -> Vec<MatcherId> {
        items.into_iter().map(|e| self.intern(e)).collect()
    }

    /// Validates everything and freezes the grammar.
    pub fn build(self) -> Result<Grammar<K>, GrammarError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        let mut bodies = Vec::with_capacity(self.bodies.len());
        for (i, body) in self.bodies.iter().enumerate() {
            match body {
                Some(body) => bodies.push(*body),
                None => return Err(GrammarError::UndefinedRule(self.rules[i].name.clone())),
            }
        }
        let rules = RuleTable{ rules: self.rules };
        analysis::check_left_recursion(&self.matchers, &bodies, &rules)?;

        debug!("built grammar with {} rule(s) and {} matcher(s)", rules.len(), self.matchers.len());
        Ok(Grammar{ matchers: self.matchers, bodies, rules: Arc::new(rules) })
    }
}

/// Handle for setting the options of a freshly defined rule.
pub struct RuleDefinition<'a, K> {
    builder: &'a mut GrammarBuilder<K>,
    rule: RuleId,
}

impl <'a, K> RuleDefinition<'a, K> {
    pub fn id(&self) -> RuleId {
        self.rule
    }

    pub fn adapter(self, tag: impl Into<String>) -> Self {
        self.builder.rules[self.rule.0].adapter = Some(tag.into());
        self
    }

    pub fn skip(self) -> Self {
        self.shape(RuleShape::Skip)
    }

    pub fn skip_if_one_child(self) -> Self {
        self.shape(RuleShape::SkipIfOneChild)
    }

    pub fn shape(self, shape: RuleShape) -> Self {
        self.builder.rules[self.rule.0].shape = shape;
        self
    }
}

/// A validated, immutable grammar.
#[derive(Debug, Clone)]
pub struct Grammar<K> {
    pub(crate) matchers: Vec<Matcher<K>>,
    pub(crate) bodies: Vec<MatcherId>,
    pub(crate) rules: Arc<RuleTable>,
}

impl <K> Grammar<K> {
    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<RuleId> {
        self.rules.find(name)
    }

    pub fn matcher(&self, id: MatcherId) -> &Matcher<K> {
        &self.matchers[id.0]
    }

    pub fn body(&self, rule: RuleId) -> MatcherId {
        self.bodies[rule.0]
    }
}

impl <K> Grammar<K> where K : TokenKind {
    /// Matches the entry at the cursor. On success the cursor is after the
    /// consumed tokens, on failure it's where it was and the furthest failure
    /// of the attempt is returned.
    pub fn match_at(&self, entry: impl Into<Entry>, cursor: &mut ParseCursor<'_, K>) -> Result<SyntaxTree<K>, Failure> {
        let (result, furthest) = engine::run(self, entry.into(), cursor);
        result.map_err(|failure| Failure::unify_option(furthest.into_inner(), failure))
    }

    /// Human-readable description of what a matcher expects, for messages.
    pub(crate) fn describe(&self, id: MatcherId) -> String {
        match &self.matchers[id.0] {
            Matcher::Token(kind) => kind.name().into(),
            Matcher::Literal(text) => format!("'{}'", text),
            Matcher::Any => "any token".into(),
            Matcher::Rule(rule) => self.rules.name(*rule).into(),
            m => m.kind().name().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::*;

    #[test]
    fn rules_are_declared_once() {
        let mut b = GrammarBuilder::<()>::new();
        let a = b.rule("a");
        assert_eq!(b.rule("a"), a);
        assert_ne!(b.rule("b"), a);
    }

    #[test]
    fn options_are_stored() {
        let mut b = GrammarBuilder::<()>::new();
        b.define("item", "x").adapter("ItemAdapter").skip_if_one_child();
        let g = b.build().unwrap();
        let item = g.rule("item").unwrap();
        let info = g.rules().get(item);
        assert_eq!(info.adapter.as_deref(), Some("ItemAdapter"));
        assert_eq!(info.shape, RuleShape::SkipIfOneChild);
    }

    #[test]
    fn undefined_rule() {
        let mut b = GrammarBuilder::<()>::new();
        b.define("a", seq(vec![lit("x"), rule_ref("missing")]));
        assert_eq!(b.build().unwrap_err(), GrammarError::UndefinedRule("missing".into()));
    }

    #[test]
    fn duplicate_rule() {
        let mut b = GrammarBuilder::<()>::new();
        b.define("a", "x");
        b.define("a", "y");
        assert_eq!(b.build().unwrap_err(), GrammarError::DuplicateRule("a".into()));
    }

    #[test]
    fn empty_choice() {
        let mut b = GrammarBuilder::<()>::new();
        b.define("a", choice(Vec::<Expr<()>>::new()));
        assert_eq!(b.build().unwrap_err(), GrammarError::EmptyCombinator{ kind: MatcherKind::Choice });
    }

    #[test]
    fn invalid_repetition() {
        let mut b = GrammarBuilder::<()>::new();
        b.define("a", repeat("x", 3, Some(2)));
        assert_eq!(b.build().unwrap_err(), GrammarError::InvalidRepetition{ min: 3, max: 2 });
    }

    #[test]
    fn foreign_rule_ids_are_rejected() {
        let mut other = GrammarBuilder::<()>::new();
        other.rule("x");
        other.rule("y");
        let z = other.rule("z");

        let mut b = GrammarBuilder::<()>::new();
        b.define("start", seq(vec![lit("a"), Expr::from(z)]));
        assert_eq!(b.build().unwrap_err(), GrammarError::UnknownRule(2));
    }

    #[test]
    fn interned_ids_survive_build() {
        let mut b = GrammarBuilder::<()>::new();
        let m = b.intern(till("x"));
        let g = b.build().unwrap();
        assert_eq!(g.matcher(m).kind(), MatcherKind::Till);
    }
}
