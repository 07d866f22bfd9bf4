/*
 * display.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Single-line rendering of expressions for logs and test assertions.
 * Multi-line hints are ignored; build files are written by the printer.
 */

use crate::expr::{CallExpr, DictExpr, Expr, ListExpr};
use std::fmt::{self, Display, Formatter, Write};

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::String(s) => write_quoted(f, &s.value),
            Expr::Literal(lit) => f.write_str(&lit.token),
            Expr::Ident(id) => f.write_str(&id.name),
            Expr::List(list) => list.fmt(f),
            Expr::Dict(dict) => dict.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Assign(assign) => write!(f, "{} {} {}", assign.lhs, assign.op, assign.rhs),
            Expr::Binary(bin) => write!(f, "{} {} {}", bin.lhs, bin.op, bin.rhs),
        }
    }
}

impl Display for ListExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        write_separated(f, &self.list)?;
        f.write_char(']')
    }
}

impl Display for DictExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, kv) in self.list.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", kv.key, kv.value)?;
        }
        f.write_char('}')
    }
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.callee)?;
        write_separated(f, &self.args)?;
        f.write_char(')')
    }
}

fn write_separated(f: &mut Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_quoted(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            _ => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}
