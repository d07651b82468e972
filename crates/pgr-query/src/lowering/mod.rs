//! Lowering pass: rewrite recognized range and array operations into native
//! operator nodes
//!
//! The tree is rewritten bottom-up. At each node the rules run in priority
//! order and the first one that returns a replacement wins; a node no rule
//! recognizes is kept as-is. Subtrees with no rewritten descendant are
//! returned as the same `Arc` the caller passed in.

pub mod array;
pub mod comparison;
pub mod operation;

use crate::error::QueryResult;
use crate::expr::Expr;
use crate::registry::OperationRegistry;
use std::sync::Arc;

/// One recognition strategy
pub trait RewriteRule: Send + Sync {
    /// Rule name (used in logs)
    fn name(&self) -> &'static str;

    /// Return the replacement for `expr`, or `None` if this rule does not
    /// recognize it
    ///
    /// `expr`'s children have already been lowered.
    fn rewrite(&self, expr: &Expr, registry: &OperationRegistry) -> QueryResult<Option<Expr>>;
}

/// Runs the rewrite rules over expression trees
pub struct ExpressionMatcher<'r> {
    registry: &'r OperationRegistry,
    rules: Vec<Box<dyn RewriteRule>>,
}

impl ExpressionMatcher<'static> {
    /// Matcher over the built-in registry with all built-in rules
    pub fn with_defaults() -> Self {
        Self::new(OperationRegistry::builtin())
    }
}

impl<'r> ExpressionMatcher<'r> {
    /// Matcher over `registry` with all built-in rules
    pub fn new(registry: &'r OperationRegistry) -> Self {
        Self {
            registry,
            rules: vec![
                Box::new(operation::OperationCall),
                Box::new(comparison::RangeComparison),
                Box::new(array::ArrayOperation),
            ],
        }
    }

    /// Matcher with an explicit rule list, tried in the given order
    pub fn with_rules(registry: &'r OperationRegistry, rules: Vec<Box<dyn RewriteRule>>) -> Self {
        Self { registry, rules }
    }

    /// Rule names in priority order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Lower a whole tree
    pub fn lower(&self, root: &Arc<Expr>) -> QueryResult<Arc<Expr>> {
        let children = root
            .children()
            .into_iter()
            .map(|child| self.lower(child))
            .collect::<QueryResult<Vec<_>>>()?;

        let rebuilt = root.with_children(children);
        let node: &Expr = rebuilt.as_ref().unwrap_or(&**root);

        match self.apply_rules(node)? {
            Some(replacement) => Ok(Arc::new(replacement)),
            None => Ok(match rebuilt {
                Some(expr) => Arc::new(expr),
                None => Arc::clone(root),
            }),
        }
    }

    fn apply_rules(&self, expr: &Expr) -> QueryResult<Option<Expr>> {
        for rule in &self.rules {
            if let Some(replacement) = rule.rewrite(expr, self.registry)? {
                log::debug!("{} rewrote `{expr}` into `{replacement}`", rule.name());
                return Ok(Some(replacement));
            }
        }
        Ok(None)
    }
}

/// Lower a tree with the built-in registry and rules
pub fn lower(root: &Arc<Expr>) -> QueryResult<Arc<Expr>> {
    ExpressionMatcher::with_defaults().lower(root)
}

#[cfg(test)]
#[path = "lowering_test.rs"]
mod tests;
