/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Starlark expression nodes for generated build files.
 *
 * This crate provides pure data type definitions for the subset of the
 * build-description language that generated attribute values are made of:
 * literals, identifiers, lists, dictionaries, calls and keyword arguments.
 * Reading and writing whole build files happens elsewhere; the only textual
 * form offered here is the single-line `Display` used in logs and tests.
 */

pub mod display;
pub mod expr;

pub use expr::{
    AssignExpr, BinaryExpr, CallExpr, DictExpr, Expr, Ident, KeyValueExpr, ListExpr, LiteralExpr,
    StringExpr,
};
