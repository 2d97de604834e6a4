//! Grouping visitor
//!
//! Collects, for every identifier, the (operator, literal) pairs it is
//! compared against. Traversal is depth-first and left to right, so each
//! list is in source order.

use ohmage_core::{ConditionNode, ConditionValuePair, GroupingMap};
use std::collections::BTreeSet;

/// Build the grouping map of a parsed condition
pub fn group(tree: &ConditionNode) -> GroupingMap {
    let mut map = GroupingMap::new();
    visit(tree, &mut map);
    map
}

fn visit(node: &ConditionNode, map: &mut GroupingMap) {
    match node {
        ConditionNode::Comparison {
            identifier,
            operator,
            literal,
        } => {
            map.entry(identifier.clone())
                .or_default()
                .push(ConditionValuePair::new(*operator, literal.clone()));
        }
        ConditionNode::Logical { left, right, .. } => {
            visit(left, map);
            visit(right, map);
        }
    }
}

/// Distinct identifiers referenced by a condition
pub fn identifiers(tree: &ConditionNode) -> BTreeSet<String> {
    group(tree).into_keys().collect()
}
