//! Tree builder
//!
//! Nodes are pushed bottom-up (children before parents); `build` validates
//! the arena and computes parent links. Used by the snippet front end and by
//! tests that assemble trees directly.

use super::error::Result;
use super::span::Span;
use super::syntax::{Argument, BinaryOp, Literal, NodeId, NodeKind, Pattern, SyntaxTree, UnaryOp};
use super::types::TypeRef;

#[derive(Debug)]
pub struct TreeBuilder {
    file_path: String,
    parts: Vec<(NodeKind, Span)>,
    line: u32,
}

impl TreeBuilder {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            parts: Vec::new(),
            line: 1,
        }
    }

    /// Line used for the spans of subsequently pushed convenience nodes
    pub fn at_line(&mut self, line: u32) -> &mut Self {
        self.line = line;
        self
    }

    /// Push a node with an explicit span
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.parts.push((kind, span));
        self.parts.len() - 1
    }

    /// Push a node spanning the current line; the column is the node index
    /// so sibling spans stay distinct
    fn add(&mut self, kind: NodeKind) -> NodeId {
        let col = self.parts.len() as u32;
        let span = Span::new(self.line, col, self.line, col + 1);
        self.push(kind, span)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.parts.get(id).map(|(kind, _)| kind)
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.parts.get(id).map(|(_, span)| *span)
    }

    pub fn build(self, root: NodeId) -> Result<SyntaxTree> {
        SyntaxTree::from_parts(self.file_path, self.parts, root)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    pub fn ident(&mut self, name: &str) -> NodeId {
        self.add(NodeKind::Identifier {
            name: name.to_string(),
        })
    }

    pub fn this(&mut self) -> NodeId {
        self.add(NodeKind::This)
    }

    pub fn bool_lit(&mut self, value: bool) -> NodeId {
        self.add(NodeKind::Literal {
            value: Literal::Bool(value),
        })
    }

    pub fn null(&mut self) -> NodeId {
        self.add(NodeKind::Literal {
            value: Literal::Null,
        })
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.add(NodeKind::Literal {
            value: Literal::Int(value),
        })
    }

    pub fn member(&mut self, receiver: NodeId, member: &str) -> NodeId {
        self.add(NodeKind::MemberAccess {
            receiver,
            member: member.to_string(),
        })
    }

    /// `receiver?.member`
    pub fn conditional_member(&mut self, receiver: NodeId, member: &str) -> NodeId {
        let binding = self.add(NodeKind::MemberBinding {
            member: member.to_string(),
        });
        self.add(NodeKind::ConditionalAccess {
            receiver,
            when_not_null: binding,
        })
    }

    pub fn call(&mut self, callee: NodeId, args: Vec<NodeId>) -> NodeId {
        let args = args.into_iter().map(Argument::positional).collect();
        self.add(NodeKind::Invocation { callee, args })
    }

    pub fn call_with(&mut self, callee: NodeId, args: Vec<Argument>) -> NodeId {
        self.add(NodeKind::Invocation { callee, args })
    }

    /// `receiver.method(args)`
    pub fn method_call(&mut self, receiver: NodeId, method: &str, args: Vec<NodeId>) -> NodeId {
        let callee = self.member(receiver, method);
        self.call(callee, args)
    }

    /// `name(args)`
    pub fn free_call(&mut self, name: &str, args: Vec<NodeId>) -> NodeId {
        let callee = self.ident(name);
        self.call(callee, args)
    }

    pub fn out_var(&mut self, name: &str) -> NodeId {
        self.add(NodeKind::OutVariable {
            name: name.to_string(),
            ty: None,
        })
    }

    pub fn not(&mut self, operand: NodeId) -> NodeId {
        self.add(NodeKind::Unary {
            op: UnaryOp::Not,
            operand,
        })
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.add(NodeKind::Binary { op, left, right })
    }

    pub fn is_pattern(&mut self, operand: NodeId, pattern: Pattern) -> NodeId {
        self.add(NodeKind::IsPattern { operand, pattern })
    }

    pub fn ternary(&mut self, condition: NodeId, when_true: NodeId, when_false: NodeId) -> NodeId {
        self.add(NodeKind::Conditional {
            condition,
            when_true,
            when_false,
        })
    }

    pub fn param(&mut self, name: &str, ty: Option<TypeRef>) -> NodeId {
        self.add(NodeKind::Parameter {
            name: name.to_string(),
            ty,
        })
    }

    /// `name => body` with an untyped parameter
    pub fn lambda(&mut self, param: &str, body: NodeId) -> NodeId {
        let param = self.param(param, None);
        self.add(NodeKind::Lambda {
            params: vec![param],
            body,
            is_async: false,
        })
    }

    pub fn await_expr(&mut self, operand: NodeId) -> NodeId {
        self.add(NodeKind::Await { operand })
    }

    pub fn parens(&mut self, inner: NodeId) -> NodeId {
        self.add(NodeKind::Parenthesized { inner })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.add(NodeKind::ExpressionStatement { expr })
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.add(NodeKind::Block { statements })
    }

    pub fn if_stmt(&mut self, condition: NodeId, then_branch: NodeId, else_branch: Option<NodeId>) -> NodeId {
        self.add(NodeKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub fn local(&mut self, name: &str, ty: Option<TypeRef>, init: Option<NodeId>) -> NodeId {
        self.add(NodeKind::LocalDeclaration {
            name: name.to_string(),
            ty,
            init,
        })
    }

    pub fn ret(&mut self, value: Option<NodeId>) -> NodeId {
        self.add(NodeKind::Return { value })
    }

    pub fn method(&mut self, name: &str, params: Vec<NodeId>, body: NodeId) -> NodeId {
        self.add(NodeKind::Method {
            name: name.to_string(),
            return_type: None,
            params,
            body,
            is_async: false,
        })
    }

    pub fn unit(&mut self, members: Vec<NodeId>) -> NodeId {
        self.add(NodeKind::CompilationUnit { members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_guarded_access() {
        let mut b = TreeBuilder::new("a.cs");
        let r1 = b.ident("r");
        let cond = b.member(r1, "IsSuccess");
        let r2 = b.ident("r");
        let value = b.member(r2, "Value");
        let call = b.free_call("use", vec![value]);
        let stmt = b.expr_stmt(call);
        let then = b.block(vec![stmt]);
        let guard = b.if_stmt(cond, then, None);
        let body = b.block(vec![guard]);
        let method = b.method("M", vec![], body);
        let root = b.unit(vec![method]);

        let tree = b.build(root).unwrap();
        assert_eq!(tree.len(), 12);
        assert!(tree.is_within(value, then));
        assert_eq!(tree.parent(then), Some(guard));
    }

    #[test]
    fn test_conditional_member_shape() {
        let mut b = TreeBuilder::new("a.cs");
        let r = b.ident("r");
        let access = b.conditional_member(r, "Value");
        let tree = b.build(access).unwrap();
        match tree.kind(access) {
            NodeKind::ConditionalAccess { receiver, when_not_null } => {
                assert_eq!(*receiver, r);
                assert!(matches!(tree.kind(*when_not_null), NodeKind::MemberBinding { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
