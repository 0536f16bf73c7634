//! Base table extraction from SQL AST
//!
//! A relation reference counts as a base table unless it is a single-part
//! name that matches a CTE visible at that point. CTE aliases are scoped
//! lexically: the `WITH` clause of a query hides names only inside that
//! query, and a CTE body sees only the CTEs declared before it (and itself
//! under `WITH RECURSIVE`). A same-named table read anywhere else is still
//! reported.

use crate::error::SqlResult;
use crate::parser::SqlParser;
use sqlparser::ast::{ObjectName, Query, Statement, Visit, Visitor};
use std::collections::{BTreeSet, HashSet};
use std::ops::ControlFlow;

/// Parse `sql` with the named dialect (generic when `None`) and return its
/// base tables rendered as `catalog.schema.table` with absent parts elided.
pub fn extract_tables(sql: &str, dialect: Option<&str>) -> SqlResult<BTreeSet<String>> {
    let statements = SqlParser::for_dialect(dialect)?.parse(sql)?;
    Ok(extract_base_tables(&statements))
}

/// Collect base tables from already-parsed statements
pub fn extract_base_tables(statements: &[Statement]) -> BTreeSet<String> {
    let mut collector = BaseTableCollector::default();
    for stmt in statements {
        let _ = stmt.visit(&mut collector);
    }
    collector.tables
}

/// CTE names declared by one query's `WITH` clause and the subset visible
/// at the current point of the visit
struct CteScope {
    names: Vec<String>,
    recursive: bool,
    visible: HashSet<String>,
    bodies_done: usize,
}

impl CteScope {
    fn new(query: &Query) -> Self {
        let (names, recursive) = query
            .with
            .as_ref()
            .map(|with| {
                let names: Vec<String> = with
                    .cte_tables
                    .iter()
                    .map(|cte| cte.alias.name.value.to_lowercase())
                    .collect();
                (names, with.recursive)
            })
            .unwrap_or_default();
        let visible = names.iter().cloned().collect();
        Self {
            names,
            recursive,
            visible,
            bodies_done: 0,
        }
    }

    /// The first child queries of a query are its CTE bodies, in order.
    /// Body `i` sees CTEs `0..i`, plus itself under `WITH RECURSIVE`.
    fn enter_child(&mut self) {
        let i = self.bodies_done;
        if i < self.names.len() {
            let end = if self.recursive { i + 1 } else { i };
            self.visible = self.names[..end].iter().cloned().collect();
        }
    }

    fn leave_child(&mut self) {
        if self.bodies_done < self.names.len() {
            self.bodies_done += 1;
            if self.bodies_done == self.names.len() {
                self.visible = self.names.iter().cloned().collect();
            }
        }
    }
}

/// Visitor tracking the CTE names in scope while collecting relations
#[derive(Default)]
struct BaseTableCollector {
    /// One entry per query currently being visited (outermost first)
    cte_scopes: Vec<CteScope>,
    tables: BTreeSet<String>,
}

impl BaseTableCollector {
    fn is_cte_reference(&self, parts: &[&str]) -> bool {
        let [name] = parts else {
            return false;
        };
        let name = name.to_lowercase();
        self.cte_scopes
            .iter()
            .any(|scope| scope.visible.contains(&name))
    }
}

impl Visitor for BaseTableCollector {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        if let Some(parent) = self.cte_scopes.last_mut() {
            parent.enter_child();
        }
        self.cte_scopes.push(CteScope::new(query));
        ControlFlow::Continue(())
    }

    fn post_visit_query(&mut self, _query: &Query) -> ControlFlow<Self::Break> {
        self.cte_scopes.pop();
        if let Some(parent) = self.cte_scopes.last_mut() {
            parent.leave_child();
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_relation(&mut self, relation: &ObjectName) -> ControlFlow<Self::Break> {
        let parts: Vec<&str> = relation
            .0
            .iter()
            .filter_map(|part| part.as_ident())
            .map(|ident| ident.value.as_str())
            .filter(|value| !value.is_empty())
            .collect();

        if !parts.is_empty() && !self.is_cte_reference(&parts) {
            self.tables.insert(parts.join("."));
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
