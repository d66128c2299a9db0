//! Evaluates a parsed [`Template`] against a [`RenderContext`].
//!
//! Evaluation cannot fail: helper names and arities were settled by the
//! parser, and a missing member is simply `null`.

use serde_json::Value;

use kiln_core::domain::RenderContext;

use super::ast::{Expr, Node, Template};

pub(crate) fn render(template: &Template, context: &RenderContext) -> String {
    let mut out = String::new();
    render_nodes(&template.nodes, context, &mut out);
    out
}

fn render_nodes(nodes: &[Node], context: &RenderContext, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Output(expr) => write_value(&evaluate(expr, context), out),
            Node::If {
                branches,
                otherwise,
            } => {
                let chosen = branches
                    .iter()
                    .find(|branch| is_truthy(&evaluate(&branch.condition, context)))
                    .map_or(otherwise.as_slice(), |branch| branch.body.as_slice());
                render_nodes(chosen, context, out);
            }
            Node::Unless {
                condition,
                body,
                otherwise,
            } => {
                if is_truthy(&evaluate(condition, context)) {
                    render_nodes(otherwise, context, out);
                } else {
                    render_nodes(body, context, out);
                }
            }
        }
    }
}

fn evaluate(expr: &Expr, context: &RenderContext) -> Value {
    match expr {
        Expr::Path(segments) => context.lookup(segments.as_slice()).cloned().unwrap_or(Value::Null),
        Expr::Literal(value) => value.clone(),
        Expr::Call { helper, args } => {
            let values: Vec<Value> = args.iter().map(|arg| evaluate(arg, context)).collect();
            helper.apply(&values)
        }
    }
}

/// `false`, `null`, `""`, `0` and `[]` are falsy; everything else is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Strings verbatim, scalars via display, arrays comma-joined, objects as
/// compact JSON, `null` as nothing.
fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
        }
        Value::Object(_) => out.push_str(&value.to_string()),
    }
}
