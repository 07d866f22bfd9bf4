/*
 * expr.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    String(StringExpr),
    /// Bare token such as `True`, `False`, `42` or `1.5`.
    Literal(LiteralExpr),
    Ident(Ident),
    List(ListExpr),
    Dict(DictExpr),
    Call(CallExpr),
    /// Keyword argument (`name = value`) or assignment statement.
    Assign(AssignExpr),
    /// Binary operation, most commonly list concatenation with `+`.
    Binary(BinaryExpr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringExpr {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralExpr {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListExpr {
    pub list: Vec<Expr>,
    /// Ask the printer to put each element on its own line.
    pub force_multiline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueExpr {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DictExpr {
    pub list: Vec<KeyValueExpr>,
    pub force_multiline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    /// Positional arguments and keyword arguments (`Expr::Assign`), in source order.
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignExpr {
    pub lhs: Box<Expr>,
    pub op: String,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub lhs: Box<Expr>,
    pub op: String,
    pub rhs: Box<Expr>,
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(StringExpr {
            value: value.into(),
        })
    }

    pub fn literal(token: impl Into<String>) -> Self {
        Expr::Literal(LiteralExpr {
            token: token.into(),
        })
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(Ident { name: name.into() })
    }

    /// Single-line list literal.
    pub fn list(items: Vec<Expr>) -> Self {
        Expr::List(ListExpr {
            list: items,
            force_multiline: false,
        })
    }

    /// Call of a bare function name, e.g. `glob([...])`.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            callee: Box::new(Expr::ident(name)),
            args,
        })
    }

    /// Keyword argument `name = value`.
    pub fn keyword(name: impl Into<String>, value: Expr) -> Self {
        Expr::Assign(AssignExpr {
            lhs: Box::new(Expr::ident(name)),
            op: "=".to_string(),
            rhs: Box::new(value),
        })
    }

    pub fn binary(lhs: Expr, op: impl Into<String>, rhs: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            lhs: Box::new(lhs),
            op: op.into(),
            rhs: Box::new(rhs),
        })
    }

    /// The value of a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::String(s) => Some(&s.value),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(id) => Some(&id.name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListExpr> {
        match self {
            Expr::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListExpr> {
        match self {
            Expr::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&CallExpr> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Split a keyword argument into its name and value.
    ///
    /// Returns `None` for anything that is not `ident = value`.
    pub fn as_keyword(&self) -> Option<(&str, &Expr)> {
        match self {
            Expr::Assign(assign) if assign.op == "=" => {
                let name = assign.lhs.as_ident()?;
                Some((name, &assign.rhs))
            }
            _ => None,
        }
    }
}

impl ListExpr {
    pub fn new(list: Vec<Expr>) -> Self {
        ListExpr {
            list,
            force_multiline: false,
        }
    }

    /// Element values when every element is a string literal.
    pub fn string_values(&self) -> Option<Vec<&str>> {
        self.list.iter().map(Expr::as_str).collect()
    }
}

impl CallExpr {
    /// Name of the callee when it is a bare identifier.
    pub fn callee_name(&self) -> Option<&str> {
        self.callee.as_ident()
    }

    /// Value of the keyword argument `name`, if present.
    pub fn keyword_arg(&self, name: &str) -> Option<&Expr> {
        self.args
            .iter()
            .filter_map(Expr::as_keyword)
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

impl From<ListExpr> for Expr {
    fn from(list: ListExpr) -> Self {
        Expr::List(list)
    }
}

impl From<CallExpr> for Expr {
    fn from(call: CallExpr) -> Self {
        Expr::Call(call)
    }
}

impl From<DictExpr> for Expr {
    fn from(dict: DictExpr) -> Self {
        Expr::Dict(dict)
    }
}
