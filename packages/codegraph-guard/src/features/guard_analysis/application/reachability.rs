//! Branch Reachability Resolver
//!
//! Branch nodes of each conditional construct:
//!
//! | Construct | Then | Else |
//! |-----------|------|------|
//! | `if (c) A else B` | `A` | `B` (none without `else`) |
//! | `c ? a : b` | `a` | `b` |
//! | `c && rhs` | `rhs` | none |
//! | `c \|\| rhs` | none | `rhs` |
//!
//! Code after an `if` block is never under either branch.

use crate::features::guard_analysis::domain::Branch;
use crate::shared::models::{BinaryOp, NodeId, NodeKind, SyntaxTree};

/// Condition whose facts scope the construct's branches
pub fn condition_of(tree: &SyntaxTree, conditional: NodeId) -> Option<NodeId> {
    match tree.kind(conditional) {
        NodeKind::If { condition, .. } | NodeKind::Conditional { condition, .. } => {
            Some(*condition)
        }
        NodeKind::Binary {
            op: BinaryOp::And | BinaryOp::Or,
            left,
            ..
        } => Some(*left),
        _ => None,
    }
}

/// Node executed only when the construct's condition took `branch`
pub fn branch_node(tree: &SyntaxTree, conditional: NodeId, branch: Branch) -> Option<NodeId> {
    match (tree.kind(conditional), branch) {
        (NodeKind::If { then_branch, .. }, Branch::Then) => Some(*then_branch),
        (NodeKind::If { else_branch, .. }, Branch::Else) => *else_branch,
        (NodeKind::Conditional { when_true, .. }, Branch::Then) => Some(*when_true),
        (NodeKind::Conditional { when_false, .. }, Branch::Else) => Some(*when_false),
        (
            NodeKind::Binary {
                op: BinaryOp::And,
                right,
                ..
            },
            Branch::Then,
        ) => Some(*right),
        (
            NodeKind::Binary {
                op: BinaryOp::Or,
                right,
                ..
            },
            Branch::Else,
        ) => Some(*right),
        _ => None,
    }
}

/// Whether `use_site` lies in `branch` of `conditional`
pub fn reachable_under(tree: &SyntaxTree, use_site: NodeId, conditional: NodeId, branch: Branch) -> bool {
    branch_node(tree, conditional, branch)
        .map(|node| tree.is_within(use_site, node))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::TreeBuilder;

    #[test]
    fn test_if_without_else() {
        let mut b = TreeBuilder::new("t.cs");
        let cond = b.ident("c");
        let inside = b.ident("x");
        let stmt = b.expr_stmt(inside);
        let then = b.block(vec![stmt]);
        let guard = b.if_stmt(cond, then, None);
        let after = b.ident("y");
        let after_stmt = b.expr_stmt(after);
        let body = b.block(vec![guard, after_stmt]);
        let tree = b.build(body).unwrap();

        assert_eq!(condition_of(&tree, guard), Some(cond));
        assert!(reachable_under(&tree, inside, guard, Branch::Then));
        assert!(!reachable_under(&tree, inside, guard, Branch::Else));
        assert!(!reachable_under(&tree, after, guard, Branch::Then));
        assert!(!reachable_under(&tree, after, guard, Branch::Else));
        assert_eq!(branch_node(&tree, guard, Branch::Else), None);
    }

    #[test]
    fn test_ternary_and_short_circuit() {
        let mut b = TreeBuilder::new("t.cs");
        let c = b.ident("c");
        let lhs = b.ident("a");
        let rhs = b.ident("b");
        let and = b.binary(BinaryOp::And, lhs, rhs);
        let other = b.int(0);
        let ternary = b.ternary(c, and, other);
        let tree = b.build(ternary).unwrap();

        assert!(reachable_under(&tree, rhs, ternary, Branch::Then));
        assert!(reachable_under(&tree, other, ternary, Branch::Else));
        assert!(reachable_under(&tree, rhs, and, Branch::Then));
        assert!(!reachable_under(&tree, lhs, and, Branch::Then));
        assert!(!reachable_under(&tree, rhs, and, Branch::Else));
        assert_eq!(condition_of(&tree, and), Some(lhs));
    }

    #[test]
    fn test_or_guards_right_operand_in_else() {
        let mut b = TreeBuilder::new("t.cs");
        let lhs = b.ident("a");
        let rhs = b.ident("b");
        let or = b.binary(BinaryOp::Or, lhs, rhs);
        let tree = b.build(or).unwrap();

        assert!(reachable_under(&tree, rhs, or, Branch::Else));
        assert!(!reachable_under(&tree, rhs, or, Branch::Then));
    }
}
