//! Binder
//!
//! Computes a `TableOracle` for a tree by lexical scoping. Declarations
//! (top-level fields and methods, parameters, locals, `out` variables,
//! lambda parameters) get a symbol `name@node`; references resolve through
//! a scope stack.
//!
//! Types are propagated only as far as guard analysis needs them:
//! - untyped lambda parameters of `x.M(p => …)` take the single type
//!   argument of `x`'s type (element of a sequence, payload of a wrapper)
//! - a member call on a typed receiver has the receiver's type, except
//!   projections (`IEnumerable<body>`) and try accessors (`bool`)
//! - `Result.Success(e)` on an imported wrapper name is `Result<type of e>`
//! - discriminants are `bool`, the ok payload is the type argument
//! - `await e` on an async wrapper (`Task<Result<int>>`) has the wrapped type

use rustc_hash::FxHashMap;

use super::imports::ImportTable;
use super::table::TableOracle;
use crate::config::{GuardConfig, WrapperFamily};
use crate::features::type_classifier::{AccessorRole, WrapperState};
use crate::shared::models::{
    Argument, BinaryOp, Literal, NodeId, NodeKind, SyntaxTree, TypeRef, UnaryOp,
};
use crate::shared::ports::SymbolOracle;
use crate::shared::utils::ScopeStack;

const SEQUENCE: &str = "System.Collections.Generic.IEnumerable";

#[derive(Debug, Clone)]
struct Binding {
    symbol: String,
    ty: Option<TypeRef>,
}

pub struct Binder<'a> {
    tree: &'a SyntaxTree,
    config: &'a GuardConfig,
    imports: &'a ImportTable,
    scopes: ScopeStack<Binding>,
    fields: FxHashMap<String, Binding>,
    /// Receiver types of enclosing `?.` accesses, innermost last
    binding_receivers: Vec<Option<TypeRef>>,
    oracle: TableOracle,
}

impl<'a> Binder<'a> {
    pub fn new(tree: &'a SyntaxTree, config: &'a GuardConfig, imports: &'a ImportTable) -> Self {
        Self {
            tree,
            config,
            imports,
            scopes: ScopeStack::new(),
            fields: FxHashMap::default(),
            binding_receivers: Vec::new(),
            oracle: TableOracle::new(),
        }
    }

    /// Bind with imports derived from `config`
    pub fn bind_tree(tree: &SyntaxTree, config: &GuardConfig) -> TableOracle {
        let imports = ImportTable::from_config(config);
        Binder::new(tree, config, &imports).bind()
    }

    pub fn bind(mut self) -> TableOracle {
        let root = self.tree.root();
        self.visit(root);
        self.oracle
    }

    fn family_of(&self, ty: Option<&TypeRef>) -> Option<&'a WrapperFamily> {
        let ty = ty?;
        ty.single_type_arg()?;
        let config: &'a GuardConfig = self.config;
        config.families.iter().find(|f| f.matches_type_name(&ty.name))
    }

    fn declare(&mut self, node: NodeId, name: &str, ty: Option<TypeRef>) -> Binding {
        let binding = Binding {
            symbol: format!("{}@{}", name, node),
            ty,
        };
        self.oracle.set_symbol(node, binding.symbol.clone());
        if let Some(ty) = &binding.ty {
            self.oracle.set_type(node, ty.clone());
        }
        self.scopes.declare(name, binding.clone());
        binding
    }

    fn declare_parameter(&mut self, param: NodeId, inferred: Option<TypeRef>) {
        if let NodeKind::Parameter { name, ty } = self.tree.kind(param) {
            let ty = ty.clone().or(inferred);
            self.declare(param, name, ty);
        }
    }

    /// Fields and methods are visible throughout the unit
    fn declare_members(&mut self, members: &[NodeId]) {
        let tree = self.tree;
        for &member in members {
            match tree.kind(member) {
                NodeKind::Method {
                    name, return_type, ..
                } => {
                    self.declare(member, name, return_type.clone());
                }
                NodeKind::LocalDeclaration { name, ty, .. } => {
                    let binding = self.declare(member, name, ty.clone());
                    self.fields.insert(name.clone(), binding);
                }
                _ => {}
            }
        }
    }

    /// Visit `node`, record and return its type
    fn visit(&mut self, node: NodeId) -> Option<TypeRef> {
        let ty = self.compute(node);
        if let Some(ty) = &ty {
            self.oracle.set_type(node, ty.clone());
        }
        ty
    }

    fn compute(&mut self, node: NodeId) -> Option<TypeRef> {
        let tree = self.tree;
        match tree.kind(node) {
            NodeKind::CompilationUnit { members } => {
                self.declare_members(members);
                for &member in members {
                    self.visit(member);
                }
                None
            }
            NodeKind::Method { params, body, .. } => {
                self.scopes.push();
                for &param in params {
                    self.declare_parameter(param, None);
                }
                self.visit(*body);
                self.scopes.pop();
                None
            }
            // Declared by the owning method or lambda
            NodeKind::Parameter { ty, .. } => ty.clone(),
            NodeKind::Block { statements } => {
                self.scopes.push();
                for &statement in statements {
                    self.visit(statement);
                }
                self.scopes.pop();
                None
            }
            NodeKind::ExpressionStatement { expr } => {
                self.visit(*expr);
                None
            }
            NodeKind::Return { value } => {
                if let Some(value) = value {
                    self.visit(*value);
                }
                None
            }
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.visit(*condition);
                self.visit(*then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit(*else_branch);
                }
                None
            }
            NodeKind::LocalDeclaration { name, ty, init } => {
                let init_ty = init.and_then(|init| self.visit(init));
                let ty = ty.clone().or(init_ty);
                self.declare(node, name, ty.clone());
                ty
            }
            NodeKind::OutVariable { name, ty } => {
                let ty = ty.clone().or_else(|| self.out_variable_type(node));
                self.declare(node, name, ty.clone());
                ty
            }
            NodeKind::Identifier { name } => {
                let binding = self.scopes.lookup(name).cloned()?;
                self.oracle.set_symbol(node, binding.symbol);
                binding.ty
            }
            NodeKind::This => None,
            NodeKind::Literal { value } => match value {
                Literal::Bool(_) => Some(TypeRef::boolean()),
                Literal::Int(_) => Some(TypeRef::named("int")),
                Literal::Str(_) => Some(TypeRef::named("string")),
                Literal::Null => None,
            },
            NodeKind::MemberAccess { receiver, member } => {
                let receiver_ty = self.visit(*receiver);
                if matches!(tree.kind(tree.strip_parens(*receiver)), NodeKind::This) {
                    let field = self.fields.get(member).cloned()?;
                    self.oracle.set_symbol(node, field.symbol);
                    return field.ty;
                }
                self.member_type(receiver_ty.as_ref(), member)
            }
            NodeKind::ConditionalAccess {
                receiver,
                when_not_null,
            } => {
                let receiver_ty = self.visit(*receiver);
                self.binding_receivers.push(receiver_ty);
                let ty = self.visit(*when_not_null);
                self.binding_receivers.pop();
                ty
            }
            NodeKind::MemberBinding { member } => {
                let receiver_ty = self.binding_receivers.last().cloned().flatten();
                self.member_type(receiver_ty.as_ref(), member)
            }
            NodeKind::Invocation { callee, args } => self.invocation(*callee, args),
            NodeKind::Unary { op, operand } => {
                let ty = self.visit(*operand);
                match op {
                    UnaryOp::Not => Some(TypeRef::boolean()),
                    UnaryOp::Negate => ty,
                }
            }
            NodeKind::Binary { op, left, right } => {
                let left_ty = self.visit(*left);
                self.visit(*right);
                match op {
                    BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => left_ty,
                    _ => Some(TypeRef::boolean()),
                }
            }
            NodeKind::IsPattern { operand, .. } => {
                self.visit(*operand);
                Some(TypeRef::boolean())
            }
            NodeKind::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.visit(*condition);
                let t = self.visit(*when_true);
                let f = self.visit(*when_false);
                t.or(f)
            }
            NodeKind::Lambda { .. } => {
                self.lambda(node, None);
                None
            }
            NodeKind::Await { operand } => {
                let ty = self.visit(*operand)?;
                if self.config.is_async_wrapper(&ty.name) {
                    ty.single_type_arg().cloned()
                } else {
                    None
                }
            }
            NodeKind::Parenthesized { inner } => self.visit(*inner),
        }
    }

    /// Type of `receiver.member` for wrapper receivers
    fn member_type(&self, receiver_ty: Option<&TypeRef>, member: &str) -> Option<TypeRef> {
        let family = self.family_of(receiver_ty)?;
        match family.accessor_role(member)? {
            AccessorRole::Discriminant(_) => Some(TypeRef::boolean()),
            AccessorRole::Payload(WrapperState::Ok) => receiver_ty?.single_type_arg().cloned(),
            AccessorRole::Payload(WrapperState::NotOk) | AccessorRole::TryAccessor(_) => None,
        }
    }

    /// Lambda scope; returns the body type
    fn lambda(&mut self, lambda: NodeId, element: Option<&TypeRef>) -> Option<TypeRef> {
        let tree = self.tree;
        let NodeKind::Lambda { params, body, .. } = tree.kind(lambda) else {
            return self.visit(lambda);
        };
        self.scopes.push();
        for (index, &param) in params.iter().enumerate() {
            let inferred = if index == 0 { element.cloned() } else { None };
            self.declare_parameter(param, inferred);
        }
        let body_ty = self.visit(*body);
        self.scopes.pop();
        body_ty
    }

    fn invocation(&mut self, callee: NodeId, args: &[Argument]) -> Option<TypeRef> {
        let tree = self.tree;
        let callee = tree.strip_parens(callee);
        match tree.kind(callee) {
            NodeKind::MemberAccess { receiver, member } => {
                if let Some(full_name) = self.static_wrapper_receiver(*receiver) {
                    let arg_types = self.arguments(args, member, None);
                    let payload = arg_types
                        .into_iter()
                        .next()
                        .flatten()
                        .unwrap_or_else(|| TypeRef::named("object"));
                    return Some(TypeRef::generic(full_name, vec![payload]));
                }

                let receiver_ty = self.visit(*receiver);
                let element = receiver_ty.as_ref().and_then(|t| t.single_type_arg()).cloned();
                let arg_types = self.arguments(args, member, element.as_ref());
                self.call_type(receiver_ty, member, &arg_types)
            }
            NodeKind::Identifier { name } => {
                let binding = self.scopes.lookup(name).cloned();
                if let Some(binding) = &binding {
                    self.oracle.set_symbol(callee, binding.symbol.clone());
                }
                self.arguments(args, name, None);
                binding.and_then(|b| b.ty)
            }
            _ => {
                self.visit(callee);
                self.arguments(args, "", None);
                None
            }
        }
    }

    /// Visit arguments; lambda arguments yield their body type
    fn arguments(
        &mut self,
        args: &[Argument],
        method: &str,
        element: Option<&TypeRef>,
    ) -> Vec<Option<TypeRef>> {
        let config: &'a GuardConfig = self.config;
        let dispatch = config.call_contexts.is_dispatch(method);
        let mut types = Vec::with_capacity(args.len());
        for (position, arg) in args.iter().enumerate() {
            if !matches!(self.tree.kind(arg.value), NodeKind::Lambda { .. }) {
                types.push(self.visit(arg.value));
                continue;
            }
            // The not-ok callback of a dispatch call never sees the payload
            let sees_payload = !dispatch
                || config.call_contexts.dispatch_state(arg.name.as_deref(), position)
                    == Some(WrapperState::Ok);
            let element = if sees_payload { element } else { None };
            types.push(self.lambda(arg.value, element));
        }
        types
    }

    fn call_type(
        &self,
        receiver_ty: Option<TypeRef>,
        method: &str,
        arg_types: &[Option<TypeRef>],
    ) -> Option<TypeRef> {
        if let Some(family) = self.family_of(receiver_ty.as_ref()) {
            if let Some(AccessorRole::TryAccessor(_)) = family.accessor_role(method) {
                return Some(TypeRef::boolean());
            }
        }

        let pipeline = &self.config.pipeline;
        if pipeline.is_projection(method) {
            let body = arg_types.iter().flatten().next()?;
            let element = if method == "SelectMany" {
                body.single_type_arg()?.clone()
            } else {
                body.clone()
            };
            return Some(TypeRef::generic(SEQUENCE, vec![element]));
        }

        receiver_ty
    }

    /// Full wrapper name when `receiver` is an unbound simple name of an
    /// imported wrapper type (`Result` in `Result.Success(1)`)
    fn static_wrapper_receiver(&self, receiver: NodeId) -> Option<String> {
        let NodeKind::Identifier { name } = self.tree.kind(self.tree.strip_parens(receiver)) else {
            return None;
        };
        if self.scopes.lookup(name).is_some() {
            return None;
        }
        let full_name = self.imports.lookup(name)?;
        self.config
            .families
            .iter()
            .any(|f| f.matches_type_name(full_name))
            .then(|| full_name.to_string())
    }

    /// `r.TryGetValue(out var v)`: `v` has the payload type
    fn out_variable_type(&self, out_var: NodeId) -> Option<TypeRef> {
        let tree = self.tree;
        let invocation = tree.parent(out_var)?;
        let NodeKind::Invocation { callee, .. } = tree.kind(invocation) else {
            return None;
        };
        let NodeKind::MemberAccess { receiver, member } = tree.kind(tree.strip_parens(*callee)) else {
            return None;
        };
        let receiver_ty = self.oracle_type(*receiver)?;
        let family = self.family_of(Some(&receiver_ty))?;
        match family.accessor_role(member)? {
            AccessorRole::TryAccessor(WrapperState::Ok) => receiver_ty.single_type_arg().cloned(),
            _ => None,
        }
    }

    fn oracle_type(&self, node: NodeId) -> Option<TypeRef> {
        self.oracle.type_of(node).cloned()
    }
}
