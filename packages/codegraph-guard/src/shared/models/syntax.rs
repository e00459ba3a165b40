//! Syntax Tree - immutable node arena consumed from the host front end
//!
//! Design:
//! - **Arena**: nodes live in one `Vec`, addressed by `NodeId`
//! - **Immutable**: parents are computed once in `SyntaxTree::from_parts`
//! - **Local traversal state**: `ancestors()` builds a fresh list per call,
//!   nothing about a walk is stored in the tree
//!
//! Node kinds cover exactly what guard analysis needs from a C#-like host:
//! statements that scope guards (`if`, blocks, lambdas), expressions that
//! form guards (member reads, negation, comparisons, invocations with `out`
//! arguments, `is` patterns) and the accessor reads being checked.

use serde::{Deserialize, Serialize};

use super::error::{GuardError, Result};
use super::span::Span;
use super::types::TypeRef;

/// Node identifier (index into the arena)
pub type NodeId = usize;

/// Fieldless node discriminant, used for driver registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    CompilationUnit,
    Method,
    Parameter,
    Block,
    ExpressionStatement,
    LocalDeclaration,
    Return,
    If,
    Identifier,
    This,
    Literal,
    MemberAccess,
    ConditionalAccess,
    MemberBinding,
    Invocation,
    OutVariable,
    Unary,
    Binary,
    IsPattern,
    Conditional,
    Lambda,
    Await,
    Parenthesized,
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Bool(bool),
    Null,
    Int(i64),
    Str(String),
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Negate,
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    // Equality
    Eq,
    NotEq,

    // Logical (short-circuit)
    And,
    Or,

    // Relational
    Lt,
    LtE,
    Gt,
    GtE,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Lt => "<",
            BinaryOp::LtE => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtE => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// Pattern of an `is` expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// `x is null`
    Null,
    /// `x is not null`
    NotNull,
    /// `x is true`, `x is 3`
    Literal(Literal),
}

/// Invocation argument, optionally named (`onSuccess: v => ...`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: NodeId,
}

impl Argument {
    pub fn positional(value: NodeId) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: NodeId) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

/// Node payload; child references are `NodeId`s into the same arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    CompilationUnit {
        members: Vec<NodeId>,
    },
    Method {
        name: String,
        #[serde(default)]
        return_type: Option<TypeRef>,
        params: Vec<NodeId>,
        body: NodeId,
        #[serde(default)]
        is_async: bool,
    },
    Parameter {
        name: String,
        #[serde(default)]
        ty: Option<TypeRef>,
    },
    Block {
        statements: Vec<NodeId>,
    },
    ExpressionStatement {
        expr: NodeId,
    },
    LocalDeclaration {
        name: String,
        #[serde(default)]
        ty: Option<TypeRef>,
        #[serde(default)]
        init: Option<NodeId>,
    },
    Return {
        #[serde(default)]
        value: Option<NodeId>,
    },
    If {
        condition: NodeId,
        then_branch: NodeId,
        #[serde(default)]
        else_branch: Option<NodeId>,
    },
    Identifier {
        name: String,
    },
    This,
    Literal {
        value: Literal,
    },
    MemberAccess {
        receiver: NodeId,
        member: String,
    },
    /// `receiver?.<when_not_null>`; member bindings inside `when_not_null`
    /// read from `receiver`
    ConditionalAccess {
        receiver: NodeId,
        when_not_null: NodeId,
    },
    /// `.member` bound to the nearest enclosing conditional access
    MemberBinding {
        member: String,
    },
    Invocation {
        callee: NodeId,
        args: Vec<Argument>,
    },
    /// `out var x` / `out T x`
    OutVariable {
        name: String,
        #[serde(default)]
        ty: Option<TypeRef>,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    IsPattern {
        operand: NodeId,
        pattern: Pattern,
    },
    Conditional {
        condition: NodeId,
        when_true: NodeId,
        when_false: NodeId,
    },
    Lambda {
        params: Vec<NodeId>,
        body: NodeId,
        #[serde(default)]
        is_async: bool,
    },
    Await {
        operand: NodeId,
    },
    Parenthesized {
        inner: NodeId,
    },
}

impl NodeKind {
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            NodeKind::CompilationUnit { .. } => SyntaxKind::CompilationUnit,
            NodeKind::Method { .. } => SyntaxKind::Method,
            NodeKind::Parameter { .. } => SyntaxKind::Parameter,
            NodeKind::Block { .. } => SyntaxKind::Block,
            NodeKind::ExpressionStatement { .. } => SyntaxKind::ExpressionStatement,
            NodeKind::LocalDeclaration { .. } => SyntaxKind::LocalDeclaration,
            NodeKind::Return { .. } => SyntaxKind::Return,
            NodeKind::If { .. } => SyntaxKind::If,
            NodeKind::Identifier { .. } => SyntaxKind::Identifier,
            NodeKind::This => SyntaxKind::This,
            NodeKind::Literal { .. } => SyntaxKind::Literal,
            NodeKind::MemberAccess { .. } => SyntaxKind::MemberAccess,
            NodeKind::ConditionalAccess { .. } => SyntaxKind::ConditionalAccess,
            NodeKind::MemberBinding { .. } => SyntaxKind::MemberBinding,
            NodeKind::Invocation { .. } => SyntaxKind::Invocation,
            NodeKind::OutVariable { .. } => SyntaxKind::OutVariable,
            NodeKind::Unary { .. } => SyntaxKind::Unary,
            NodeKind::Binary { .. } => SyntaxKind::Binary,
            NodeKind::IsPattern { .. } => SyntaxKind::IsPattern,
            NodeKind::Conditional { .. } => SyntaxKind::Conditional,
            NodeKind::Lambda { .. } => SyntaxKind::Lambda,
            NodeKind::Await { .. } => SyntaxKind::Await,
            NodeKind::Parenthesized { .. } => SyntaxKind::Parenthesized,
        }
    }

    /// Children in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::CompilationUnit { members } => members.clone(),
            NodeKind::Method { params, body, .. } => {
                let mut children = params.clone();
                children.push(*body);
                children
            }
            NodeKind::Block { statements } => statements.clone(),
            NodeKind::ExpressionStatement { expr } => vec![*expr],
            NodeKind::LocalDeclaration { init, .. } => init.iter().copied().collect(),
            NodeKind::Return { value } => value.iter().copied().collect(),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![*condition, *then_branch];
                children.extend(else_branch.iter().copied());
                children
            }
            NodeKind::MemberAccess { receiver, .. } => vec![*receiver],
            NodeKind::ConditionalAccess {
                receiver,
                when_not_null,
            } => vec![*receiver, *when_not_null],
            NodeKind::Invocation { callee, args } => {
                let mut children = vec![*callee];
                children.extend(args.iter().map(|a| a.value));
                children
            }
            NodeKind::Unary { operand, .. } => vec![*operand],
            NodeKind::Binary { left, right, .. } => vec![*left, *right],
            NodeKind::IsPattern { operand, .. } => vec![*operand],
            NodeKind::Conditional {
                condition,
                when_true,
                when_false,
            } => vec![*condition, *when_true, *when_false],
            NodeKind::Lambda { params, body, .. } => {
                let mut children = params.clone();
                children.push(*body);
                children
            }
            NodeKind::Await { operand } => vec![*operand],
            NodeKind::Parenthesized { inner } => vec![*inner],
            NodeKind::Parameter { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::This
            | NodeKind::Literal { .. }
            | NodeKind::MemberBinding { .. }
            | NodeKind::OutVariable { .. } => Vec::new(),
        }
    }

    /// Statement-level node (the unit a guard or a rewrite targets)
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::Block { .. }
                | NodeKind::ExpressionStatement { .. }
                | NodeKind::LocalDeclaration { .. }
                | NodeKind::Return { .. }
                | NodeKind::If { .. }
        )
    }

    /// Boundary of an executable body: guard ascent never continues past it
    pub fn is_body_owner(&self) -> bool {
        matches!(
            self,
            NodeKind::Method { .. } | NodeKind::Lambda { .. } | NodeKind::CompilationUnit { .. }
        )
    }
}

/// One node of the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
}

/// Immutable syntax tree for one analysis unit (file)
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxTree {
    file_path: String,
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    /// Build a tree from node payloads, computing parents
    ///
    /// Fails when a child id is out of range, a node is claimed by two
    /// parents, the root has a parent, or parent links form a cycle.
    pub fn from_parts(
        file_path: impl Into<String>,
        parts: Vec<(NodeKind, Span)>,
        root: NodeId,
    ) -> Result<Self> {
        let file_path = file_path.into();
        let len = parts.len();
        if root >= len {
            return Err(GuardError::tree(format!(
                "root {} out of range ({} nodes)",
                root, len
            ))
            .with_file(file_path));
        }

        let mut parents: Vec<Option<NodeId>> = vec![None; len];
        for (id, (kind, _)) in parts.iter().enumerate() {
            for child in kind.children() {
                if child >= len {
                    return Err(GuardError::tree(format!(
                        "node {} references missing child {}",
                        id, child
                    ))
                    .with_file(file_path));
                }
                if child == id || child == root {
                    return Err(GuardError::tree(format!(
                        "node {} cannot have node {} as a child",
                        id, child
                    ))
                    .with_file(file_path));
                }
                if let Some(existing) = parents[child] {
                    return Err(GuardError::tree(format!(
                        "node {} has two parents ({} and {})",
                        child, existing, id
                    ))
                    .with_file(file_path));
                }
                parents[child] = Some(id);
            }
        }

        // Every parent chain must terminate within `len` steps
        for start in 0..len {
            let mut current = start;
            let mut steps = 0;
            while let Some(parent) = parents[current] {
                steps += 1;
                if steps > len {
                    return Err(GuardError::tree(format!(
                        "parent cycle through node {}",
                        start
                    ))
                    .with_file(file_path));
                }
                current = parent;
            }
        }

        let nodes = parts
            .into_iter()
            .zip(parents)
            .enumerate()
            .map(|(id, ((kind, span), parent))| SyntaxNode {
                id,
                kind,
                span,
                parent,
            })
            .collect();

        Ok(Self {
            file_path,
            nodes,
            root,
        })
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id)
    }

    /// Node by id; ids handed out by this tree are always valid
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id].span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.nodes.iter()
    }

    /// Ancestors of `id`, nearest first (excluding `id` itself)
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node);
        }
        chain
    }

    /// Whether `node` is `ancestor` or lies beneath it
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Skip any parentheses around an expression
    pub fn strip_parens(&self, mut id: NodeId) -> NodeId {
        while let NodeKind::Parenthesized { inner } = self.kind(id) {
            id = *inner;
        }
        id
    }

    /// Reachable nodes in source (pre-)order starting from the root
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            let children = self.kind(id).children();
            stack.extend(children.into_iter().rev());
        }
        order
    }
}

/// Serialized form, validated through `from_parts` on the way in
#[derive(Deserialize)]
struct RawTree {
    file_path: String,
    nodes: Vec<RawNode>,
    root: NodeId,
}

#[derive(Deserialize)]
struct RawNode {
    #[serde(flatten)]
    kind: NodeKind,
    #[serde(default)]
    span: Span,
}

impl<'de> Deserialize<'de> for SyntaxTree {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawTree::deserialize(deserializer)?;
        let parts = raw.nodes.into_iter().map(|n| (n.kind, n.span)).collect();
        SyntaxTree::from_parts(raw.file_path, parts, raw.root).map_err(serde::de::Error::custom)
    }
}
