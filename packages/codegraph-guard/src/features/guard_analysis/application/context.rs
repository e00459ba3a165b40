//! Per-unit analysis context
//!
//! Borrowed view over everything one analysis of one tree needs. Cheap to
//! copy; holds no mutable state.

use crate::config::{GuardConfig, WrapperFamily};
use crate::features::type_classifier::{AccessorRole, Classification, FamilyId, TypeClassifier};
use crate::shared::models::{NodeId, NodeKind, SyntaxTree};
use crate::shared::ports::SymbolOracle;

use super::recognizer::GuardRecognizer;
use super::walker::GuardWalker;

#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub tree: &'a SyntaxTree,
    pub oracle: &'a dyn SymbolOracle,
    pub classifier: &'a TypeClassifier,
    pub config: &'a GuardConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        tree: &'a SyntaxTree,
        oracle: &'a dyn SymbolOracle,
        classifier: &'a TypeClassifier,
        config: &'a GuardConfig,
    ) -> Self {
        Self {
            tree,
            oracle,
            classifier,
            config,
        }
    }

    pub fn classify(&self, node: NodeId) -> Classification {
        self.classifier.classify(self.oracle.type_of(node))
    }

    /// Family of the wrapper value an expression evaluates to
    ///
    /// Either the expression's own type is a wrapper, or it is `await x`
    /// with `x` an asynchronous wrapper around one.
    pub fn wrapper_family(&self, node: NodeId) -> Option<FamilyId> {
        let node = self.tree.strip_parens(node);
        if let Some(family) = self.classify(node).wrapper_family() {
            return Some(family);
        }
        match self.tree.kind(node) {
            NodeKind::Await { operand } => self.classify(*operand).async_family(),
            _ => None,
        }
    }

    pub fn family(&self, id: FamilyId) -> Option<&'a WrapperFamily> {
        self.classifier.family(id)
    }

    pub fn accessor_role(&self, family: FamilyId, member: &str) -> Option<AccessorRole> {
        self.classifier.accessor_role(family, member)
    }

    pub fn same_location(&self, a: NodeId, b: NodeId) -> bool {
        self.oracle.same_location(self.tree, a, b)
    }

    /// Whether two nodes resolve to the same declaration
    pub fn same_symbol(&self, a: NodeId, b: NodeId) -> bool {
        match (self.oracle.symbol_of(a), self.oracle.symbol_of(b)) {
            (Some(sa), Some(sb)) => sa == sb,
            _ => false,
        }
    }

    pub fn recognizer(&self) -> GuardRecognizer<'a> {
        GuardRecognizer::new(*self)
    }

    pub fn walker(&self) -> GuardWalker<'a> {
        GuardWalker::new(*self)
    }

    /// `(receiver, method, args)` of `receiver.method(args)`
    pub fn member_call(&self, node: NodeId) -> Option<MemberCall<'a>> {
        let tree: &'a SyntaxTree = self.tree;
        match tree.kind(node) {
            NodeKind::Invocation { callee, args } => match tree.kind(tree.strip_parens(*callee)) {
                NodeKind::MemberAccess { receiver, member } => Some(MemberCall {
                    invocation: node,
                    receiver: *receiver,
                    method: member.as_str(),
                    args: args.as_slice(),
                }),
                _ => None,
            },
            _ => None,
        }
    }

    /// The member call taking `lambda` as an argument, with the argument
    /// position
    pub fn call_taking_lambda(&self, lambda: NodeId) -> Option<(MemberCall<'a>, usize)> {
        let invocation = self.tree.parent(lambda)?;
        let call = self.member_call(invocation)?;
        let position = call.args.iter().position(|a| a.value == lambda)?;
        Some((call, position))
    }
}

/// `receiver.method(args)`
#[derive(Debug, Clone, Copy)]
pub struct MemberCall<'a> {
    pub invocation: NodeId,
    pub receiver: NodeId,
    pub method: &'a str,
    pub args: &'a [crate::shared::models::Argument],
}
