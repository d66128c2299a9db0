//! Parsed template representation.

use serde_json::Value;

use super::helpers::Helper;

/// A parsed template, ready to evaluate any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub(crate) nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    /// Literal output.
    Text(String),
    /// `{{expr}}` / `{{{expr}}}`.
    Output(Expr),
    /// `{{#if}} … {{else if}} … {{else}} … {{/if}}`; the first truthy branch wins.
    If {
        branches: Vec<Branch>,
        otherwise: Vec<Node>,
    },
    /// `{{#unless}} … {{else}} … {{/unless}}`.
    Unless {
        condition: Expr,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Branch {
    pub condition: Expr,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// Member path relative to the root context; empty for `this`.
    Path(Vec<String>),
    Literal(Value),
    Call { helper: Helper, args: Vec<Expr> },
}
