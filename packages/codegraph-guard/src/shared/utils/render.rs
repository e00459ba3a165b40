//! Expression rendering for diagnostic messages
//!
//! Produces C#-like source text from tree nodes. Only expressions are
//! rendered faithfully; statements collapse to `{ ... }`.

use crate::shared::models::{Literal, NodeId, NodeKind, Pattern, SyntaxTree, UnaryOp};

pub fn render_expression(tree: &SyntaxTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_literal(value: &Literal, out: &mut String) {
    match value {
        Literal::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Literal::Null => out.push_str("null"),
        Literal::Int(i) => out.push_str(&i.to_string()),
        Literal::Str(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
    }
}

fn write_node(tree: &SyntaxTree, id: NodeId, out: &mut String) {
    match tree.kind(id) {
        NodeKind::Identifier { name } => out.push_str(name),
        NodeKind::This => out.push_str("this"),
        NodeKind::Literal { value } => write_literal(value, out),
        NodeKind::MemberAccess { receiver, member } => {
            write_node(tree, *receiver, out);
            out.push('.');
            out.push_str(member);
        }
        NodeKind::ConditionalAccess {
            receiver,
            when_not_null,
        } => {
            write_node(tree, *receiver, out);
            out.push('?');
            write_node(tree, *when_not_null, out);
        }
        NodeKind::MemberBinding { member } => {
            out.push('.');
            out.push_str(member);
        }
        NodeKind::Invocation { callee, args } => {
            write_node(tree, *callee, out);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Some(name) = &arg.name {
                    out.push_str(name);
                    out.push_str(": ");
                }
                write_node(tree, arg.value, out);
            }
            out.push(')');
        }
        NodeKind::OutVariable { name, ty } => {
            out.push_str("out ");
            match ty {
                Some(ty) => out.push_str(&ty.short_display()),
                None => out.push_str("var"),
            }
            out.push(' ');
            out.push_str(name);
        }
        NodeKind::Unary { op, operand } => {
            out.push(match op {
                UnaryOp::Not => '!',
                UnaryOp::Negate => '-',
            });
            write_node(tree, *operand, out);
        }
        NodeKind::Binary { op, left, right } => {
            write_node(tree, *left, out);
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            write_node(tree, *right, out);
        }
        NodeKind::IsPattern { operand, pattern } => {
            write_node(tree, *operand, out);
            match pattern {
                Pattern::Null => out.push_str(" is null"),
                Pattern::NotNull => out.push_str(" is not null"),
                Pattern::Literal(value) => {
                    out.push_str(" is ");
                    write_literal(value, out);
                }
            }
        }
        NodeKind::Conditional {
            condition,
            when_true,
            when_false,
        } => {
            write_node(tree, *condition, out);
            out.push_str(" ? ");
            write_node(tree, *when_true, out);
            out.push_str(" : ");
            write_node(tree, *when_false, out);
        }
        NodeKind::Lambda {
            params,
            body,
            is_async,
        } => {
            if *is_async {
                out.push_str("async ");
            }
            let names: Vec<&str> = params
                .iter()
                .filter_map(|p| match tree.kind(*p) {
                    NodeKind::Parameter { name, .. } => Some(name.as_str()),
                    _ => None,
                })
                .collect();
            if names.len() == 1 {
                out.push_str(names[0]);
            } else {
                out.push('(');
                out.push_str(&names.join(", "));
                out.push(')');
            }
            out.push_str(" => ");
            write_node(tree, *body, out);
        }
        NodeKind::Await { operand } => {
            out.push_str("await ");
            write_node(tree, *operand, out);
        }
        NodeKind::Parenthesized { inner } => {
            out.push('(');
            write_node(tree, *inner, out);
            out.push(')');
        }
        NodeKind::Parameter { name, .. } => out.push_str(name),
        _ => out.push_str("{ ... }"),
    }
}
