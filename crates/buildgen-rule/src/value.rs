//! Native attribute values and their conversion to expressions.
//!
//! Generators describe attribute values with [`Value`], a closed set of
//! shapes: scalars, lists, string-keyed maps, a pass-through [`Expr`], and
//! domain kinds such as [`GlobValue`]. [`expr_from_value`] turns any of
//! them into the expression written into the build file.
//!
//! Data whose shape is only known at runtime enters through
//! [`Value::from_json`], which maps it onto the same closed set and rejects
//! what cannot be rendered.

use crate::error::{Result, ValueError};
use crate::kinds::{
    GlobValue, SelectStringListValue, SortedStrings, UnsortedStrings, select_expr,
};
use crate::literal::{bool_literal, float_literal, int_literal, uint_literal};
use buildgen_syntax::{Expr, ListExpr};
use std::collections::BTreeMap;

/// Types with a custom rendering as a build expression.
pub trait ToExpr {
    fn to_expr(&self) -> Expr;
}

/// A language-agnostic attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Already an expression; rendered unchanged.
    Expr(Expr),
    Str(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// List of strings. Renders exactly like a `List` of `Str`.
    Strings(Vec<String>),
    List(Vec<Value>),
    /// Map rendered as a `select`. Keys must be `Value::Str`; a repeated key
    /// keeps its last value.
    Map(Vec<(Value, Value)>),
    Glob(GlobValue),
    Select(SelectStringListValue),
    Sorted(SortedStrings),
    Unsorted(UnsortedStrings),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Expr(_) => "expr",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Strings(_) => "string list",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Glob(_) => "glob",
            Value::Select(_) => "select",
            Value::Sorted(_) => "sorted strings",
            Value::Unsorted(_) => "unsorted strings",
        }
    }

    /// Convert dynamically shaped JSON data into a `Value`.
    ///
    /// Objects become maps with string keys; their order does not matter since
    /// `select` keys are sorted on output. `null` has no rendering and is
    /// rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Value> {
        match json {
            serde_json::Value::Null => Err(ValueError::UnsupportedType { type_name: "null" }),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Value::UInt(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(ValueError::UnsupportedType { type_name: "number" })
                }
            }
            serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((Value::Str(k.clone()), Value::from_json(v)?)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Map),
        }
    }
}

/// Convert a value into the expression written into a build file.
///
/// - strings, bools, integers and floats become literals
/// - lists become list expressions, element by element
/// - maps become `select({...})` calls with `//conditions:default` last
/// - domain kinds render through their [`ToExpr`] implementation
/// - expressions are returned unchanged
pub fn expr_from_value(value: &Value) -> Result<Expr> {
    Ok(match value {
        Value::Expr(e) => e.clone(),
        Value::Str(s) => Expr::string(s.as_str()),
        Value::Bool(b) => bool_literal(*b),
        Value::Int(i) => int_literal(*i),
        Value::UInt(u) => uint_literal(*u),
        Value::Float(f) => float_literal(*f),
        Value::Strings(strs) => string_list_expr(strs).into(),
        Value::List(items) => {
            let list = items.iter().map(expr_from_value).collect::<Result<Vec<_>>>()?;
            Expr::list(list)
        }
        Value::Map(entries) => map_expr(entries)?,
        Value::Glob(g) => g.to_expr(),
        Value::Select(s) => s.to_expr(),
        Value::Sorted(s) => s.to_expr(),
        Value::Unsorted(s) => s.to_expr(),
    })
}

/// Convert JSON data straight into an expression.
pub fn expr_from_json(json: &serde_json::Value) -> Result<Expr> {
    expr_from_value(&Value::from_json(json)?)
}

pub(crate) fn string_list_expr(strs: &[String]) -> ListExpr {
    ListExpr::new(strs.iter().map(|s| Expr::string(s.as_str())).collect())
}

fn map_expr(entries: &[(Value, Value)]) -> Result<Expr> {
    let mut by_key: BTreeMap<&str, &Value> = BTreeMap::new();
    for (key, value) in entries {
        match key {
            Value::Str(k) => {
                by_key.insert(k.as_str(), value);
            }
            other => {
                return Err(ValueError::UnsupportedMapKey {
                    key_type: other.type_name(),
                });
            }
        }
    }
    let rendered = by_key
        .into_iter()
        .map(|(k, v)| Ok((k, expr_from_value(v)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(select_expr(rendered, true))
}

impl From<Expr> for Value {
    fn from(e: Expr) -> Self {
        Value::Expr(e)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! value_from_int {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(<$wide>::from(v))
                }
            }
        )*
    };
}

value_from_int!(Int, i64: i8, i16, i32, i64);
value_from_int!(UInt, u64: u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Strings(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::Strings(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<GlobValue> for Value {
    fn from(g: GlobValue) -> Self {
        Value::Glob(g)
    }
}

impl From<SelectStringListValue> for Value {
    fn from(s: SelectStringListValue) -> Self {
        Value::Select(s)
    }
}

impl From<SortedStrings> for Value {
    fn from(s: SortedStrings) -> Self {
        Value::Sorted(s)
    }
}

impl From<UnsortedStrings> for Value {
    fn from(s: UnsortedStrings) -> Self {
        Value::Unsorted(s)
    }
}
