//! Symbol Oracle port
//!
//! Answers three questions about expressions of one syntax tree:
//! - what is its static type
//! - which declaration does it reference
//! - do two expressions denote the same storage location
//!
//! A missing answer is never an error: callers treat "no type" as an
//! unrelated type and "no symbol" as "not provably the same location".

use crate::shared::models::{NodeId, NodeKind, SyntaxTree, TypeRef};

/// Symbol/type resolution for one syntax tree
///
/// # Implementors
/// - `TableOracle` (explicit node tables, filled by the host or by `Binder`)
pub trait SymbolOracle: Send + Sync {
    /// Static type of an expression or declaration node
    fn type_of(&self, node: NodeId) -> Option<&TypeRef>;

    /// Declaration referenced (or introduced) by a node
    fn symbol_of(&self, node: NodeId) -> Option<&str>;

    /// Whether two expressions denote the same storage location
    ///
    /// Never textual: two `r` identifiers bound to different declarations
    /// are different locations.
    fn same_location(&self, tree: &SyntaxTree, a: NodeId, b: NodeId) -> bool {
        same_location_by_symbols(self, tree, a, b)
    }
}

/// Default same-location rule built on `symbol_of`
///
/// - identifiers: same declaration
/// - `this`: always the same
/// - member accesses: same member on the same location
/// - `field` vs `this.field`: same declaration
/// - anything else (calls, literals, awaits): never the same
pub fn same_location_by_symbols<O>(oracle: &O, tree: &SyntaxTree, a: NodeId, b: NodeId) -> bool
where
    O: SymbolOracle + ?Sized,
{
    let a = tree.strip_parens(a);
    let b = tree.strip_parens(b);

    let same_symbol = || match (oracle.symbol_of(a), oracle.symbol_of(b)) {
        (Some(sa), Some(sb)) => sa == sb,
        _ => false,
    };

    match (tree.kind(a), tree.kind(b)) {
        (NodeKind::Identifier { .. }, NodeKind::Identifier { .. }) => same_symbol(),
        (NodeKind::This, NodeKind::This) => true,
        (
            NodeKind::MemberAccess {
                receiver: ra,
                member: ma,
            },
            NodeKind::MemberAccess {
                receiver: rb,
                member: mb,
            },
        ) => ma == mb && same_location_by_symbols(oracle, tree, *ra, *rb),
        (NodeKind::Identifier { .. }, NodeKind::MemberAccess { receiver, .. })
        | (NodeKind::MemberAccess { receiver, .. }, NodeKind::Identifier { .. }) => {
            matches!(tree.kind(tree.strip_parens(*receiver)), NodeKind::This) && same_symbol()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::TreeBuilder;
    use rustc_hash::FxHashMap;

    struct Symbols(FxHashMap<NodeId, String>);

    impl SymbolOracle for Symbols {
        fn type_of(&self, _node: NodeId) -> Option<&TypeRef> {
            None
        }

        fn symbol_of(&self, node: NodeId) -> Option<&str> {
            self.0.get(&node).map(|s| s.as_str())
        }
    }

    #[test]
    fn test_identifiers_compare_by_declaration() {
        let mut b = TreeBuilder::new("a.cs");
        let r1 = b.ident("r");
        let r2 = b.ident("r");
        let shadow = b.ident("r");
        let root = b.block(vec![]);
        let mut parts = FxHashMap::default();
        parts.insert(r1, "local:r#1".to_string());
        parts.insert(r2, "local:r#1".to_string());
        parts.insert(shadow, "param:r#9".to_string());
        let oracle = Symbols(parts);
        let tree = b.build(root).unwrap();

        assert!(oracle.same_location(&tree, r1, r2));
        assert!(!oracle.same_location(&tree, r1, shadow));
    }

    #[test]
    fn test_member_chains_and_this() {
        let mut b = TreeBuilder::new("a.cs");
        let this1 = b.this();
        let field1 = b.member(this1, "result");
        let this2 = b.this();
        let field2 = b.member(this2, "result");
        let bare = b.ident("result");
        let root = b.block(vec![]);
        let mut parts = FxHashMap::default();
        parts.insert(field1, "field:result".to_string());
        parts.insert(bare, "field:result".to_string());
        let oracle = Symbols(parts);
        let tree = b.build(root).unwrap();

        assert!(oracle.same_location(&tree, field1, field2));
        assert!(oracle.same_location(&tree, bare, field1));
    }

    #[test]
    fn test_calls_are_never_the_same_location() {
        let mut b = TreeBuilder::new("a.cs");
        let c1 = b.free_call("Get", vec![]);
        let c2 = b.free_call("Get", vec![]);
        let root = b.block(vec![]);
        let oracle = Symbols(FxHashMap::default());
        let tree = b.build(root).unwrap();

        assert!(!oracle.same_location(&tree, c1, c2));
    }
}
