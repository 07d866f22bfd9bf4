//! Applying generated rules to an existing build file.
//!
//! For each generated rule the matching existing rule (same kind, and same
//! name unless the kind matches any) receives the generated attributes:
//! mergeable attributes go through [`merge`], all others are replaced. A
//! generated rule with no match is spliced into the file at its requested
//! insertion index.

use crate::error::Result;
use crate::merge::merge;
use crate::rule::{File, KindInfo, Rule};
use crate::value::{Value, expr_from_value};
use std::collections::BTreeMap;

/// Copy the attributes of `generated` into `existing`, attribute by attribute
/// in generated order.
pub fn merge_attrs(generated: &Rule, existing: &mut Rule, info: &KindInfo) -> Result<()> {
    for (key, value) in generated.attrs() {
        let expr = if info.is_mergeable(key) {
            let old = existing.attr(key).map(expr_from_value).transpose()?;
            merge(value, old.as_ref())?
        } else {
            expr_from_value(value)?
        };
        tracing::trace!(
            kind = generated.kind(),
            attr = key,
            mergeable = info.is_mergeable(key),
            "merged attribute"
        );
        existing.set_attr(key, Value::Expr(expr));
    }
    Ok(())
}

/// Merge every generated rule into `file`, rewriting or inserting statements.
///
/// Insert indexes refer to the statements of the file as it was before this
/// call; each is shifted past the rules inserted earlier at or before it, so
/// rules requesting the same index keep their generated order.
pub fn merge_file(
    file: &mut File,
    generated: &[Rule],
    kinds: &BTreeMap<String, KindInfo>,
) -> Result<()> {
    let no_info = KindInfo::default();
    let original_len = file.stmts.len();
    let mut requested: Vec<usize> = Vec::new();
    for rule in generated {
        let info = kinds.get(rule.kind()).unwrap_or(&no_info);
        match find_match(file, rule, info) {
            Some(pos) => {
                let existing = &mut file.rules[pos];
                merge_attrs(rule, existing, info)?;
                if let Some(index) = existing.index() {
                    file.stmts[index] = existing.to_expr()?;
                }
            }
            None => {
                let index = rule
                    .insert_index()
                    .map_or(original_len, |i| i.min(original_len));
                let at = index + requested.iter().filter(|&&r| r <= index).count();
                requested.push(index);
                tracing::debug!(kind = rule.kind(), name = rule.name(), at, "inserting rule");
                file.stmts.insert(at, rule.to_expr()?);
                file.reindex();
            }
        }
    }
    Ok(())
}

fn find_match(file: &File, rule: &Rule, info: &KindInfo) -> Option<usize> {
    file.rules
        .iter()
        .position(|r| r.kind() == rule.kind() && (info.match_any || r.name() == rule.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{SortedStrings, UnsortedStrings};
    use crate::rule::UNSTABLE_INSERT_INDEX_KEY;
    use buildgen_syntax::Expr;
    use pretty_assertions::assert_eq;

    fn strs(values: &[&str]) -> Expr {
        Expr::list(values.iter().map(|v| Expr::string(*v)).collect())
    }

    fn package_info() -> KindInfo {
        KindInfo {
            match_any: true,
            mergeable_attrs: ["default_visibility", "features"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    #[test]
    fn test_merge_attrs_mergeable_and_replaced() {
        let mut existing = Rule::from_call(
            &Expr::call(
                "package",
                vec![
                    Expr::keyword("default_visibility", strs(&["//b:__pkg__"])),
                    Expr::keyword("features", strs(&["-foo"])),
                    Expr::keyword("licenses", strs(&["notice"])),
                ],
            ),
            0,
        )
        .unwrap();

        let mut generated = Rule::new("package", "");
        generated.set_attr(
            "default_visibility",
            SortedStrings(vec!["//a:__pkg__".to_string()]),
        );
        generated.set_attr("features", UnsortedStrings(vec!["bar".to_string()]));
        generated.set_attr("licenses", vec!["reciprocal"]);

        merge_attrs(&generated, &mut existing, &package_info()).unwrap();
        insta::assert_snapshot!(
            existing.to_expr().unwrap().to_string(),
            @r#"package(default_visibility = ["//a:__pkg__", "//b:__pkg__"], features = ["-foo", "bar"], licenses = ["reciprocal"])"#
        );
    }

    #[test]
    fn test_merge_file_rewrites_matching_rule() {
        let mut file = File::from_stmts(
            "",
            vec![Expr::call(
                "package",
                vec![Expr::keyword("default_visibility", strs(&[":x"]))],
            )],
        );
        let mut generated = Rule::new("package", "");
        generated.set_attr(
            "default_visibility",
            SortedStrings(vec!["//visibility:public".to_string()]),
        );
        let kinds = BTreeMap::from([("package".to_string(), package_info())]);

        merge_file(&mut file, &[generated], &kinds).unwrap();
        assert_eq!(file.stmts.len(), 1);
        assert_eq!(
            file.rules[0].attr_expr("default_visibility"),
            Some(&strs(&[":x", "//visibility:public"]))
        );
        assert_eq!(
            file.stmts[0].to_string(),
            r#"package(default_visibility = [":x", "//visibility:public"])"#
        );
    }

    #[test]
    fn test_merge_file_inserts_at_requested_index() {
        let mut file = File::from_stmts(
            "",
            vec![
                Expr::call("load", vec![Expr::string("//:defs.bzl"), Expr::string("lib")]),
                Expr::call("lib", vec![Expr::keyword("name", Expr::string("a"))]),
            ],
        );
        let mut generated = Rule::new("package", "");
        generated.set_attr("features", UnsortedStrings(vec!["x".to_string()]));
        generated.set_private_attr(UNSTABLE_INSERT_INDEX_KEY, 1u64);

        merge_file(&mut file, &[generated], &BTreeMap::new()).unwrap();
        assert_eq!(file.stmts[1].to_string(), r#"package(features = ["x"])"#);
        let kinds: Vec<(&str, Option<usize>)> =
            file.rules.iter().map(|r| (r.kind(), r.index())).collect();
        assert_eq!(kinds, vec![("package", Some(1)), ("lib", Some(2))]);
    }

    #[test]
    fn test_merge_file_shifts_later_insert_indexes() {
        let mut file = File::from_stmts(
            "",
            vec![
                Expr::call("lib", vec![Expr::keyword("name", Expr::string("a"))]),
                Expr::call("lib", vec![Expr::keyword("name", Expr::string("b"))]),
            ],
        );
        let new_rule = |name: &str, index: Option<u64>| {
            let mut rule = Rule::new("bin", name);
            if let Some(index) = index {
                rule.set_private_attr(UNSTABLE_INSERT_INDEX_KEY, index);
            }
            rule
        };
        let generated = [
            new_rule("x", Some(1)),
            new_rule("y", Some(2)),
            new_rule("z", Some(1)),
            new_rule("w", None),
        ];

        merge_file(&mut file, &generated, &BTreeMap::new()).unwrap();
        let names: Vec<&str> = file.rules.iter().map(Rule::name).collect();
        assert_eq!(names, vec!["a", "x", "z", "b", "y", "w"]);
    }

    #[test]
    fn test_merge_file_appends_without_index() {
        let mut file = File::from_stmts("", vec![]);
        let generated = Rule::new("go_library", "lib");
        merge_file(&mut file, &[generated], &BTreeMap::new()).unwrap();
        assert_eq!(file.stmts[0].to_string(), r#"go_library(name = "lib")"#);
    }

    #[test]
    fn test_named_kinds_match_by_name() {
        let mut file = File::from_stmts(
            "",
            vec![Expr::call(
                "go_library",
                vec![
                    Expr::keyword("name", Expr::string("a")),
                    Expr::keyword("srcs", strs(&["a.go"])),
                ],
            )],
        );
        let mut generated = Rule::new("go_library", "b");
        generated.set_attr("srcs", vec!["b.go"]);
        merge_file(&mut file, &[generated], &BTreeMap::new()).unwrap();
        assert_eq!(file.rules.len(), 2);
        assert_eq!(file.rules[0].attr_expr("srcs"), Some(&strs(&["a.go"])));
    }
}
