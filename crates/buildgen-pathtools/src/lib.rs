//! Component-aware matching on slash-separated paths.
//!
//! Package paths and label packages are compared component by component:
//! `"aa/bb"` contains `"bb"` but not `"b"`. None of these functions clean
//! their inputs, so `".."` and doubled slashes are matched literally.

/// Byte offset of the first occurrence of `sub` in `p` that starts and ends
/// on component boundaries.
///
/// An empty `sub` matches at offset 0.
pub fn index(p: &str, sub: &str) -> Option<usize> {
    if sub.is_empty() {
        return Some(0);
    }
    candidate_starts(p, sub).find(|&start| is_component_match(p, sub, start))
}

/// Byte offset of the last occurrence of `sub` in `p` that starts and ends
/// on component boundaries.
///
/// An empty `sub` matches at `p.len()`.
pub fn last_index(p: &str, sub: &str) -> Option<usize> {
    if sub.is_empty() {
        return Some(p.len());
    }
    candidate_starts(p, sub)
        .rev()
        .find(|&start| is_component_match(p, sub, start))
}

/// Whether `prefix` names `p` itself or one of its ancestor directories.
///
/// A trailing slash on either argument is ignored.
pub fn has_prefix(p: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    let prefix = trim_trailing_slash(prefix);
    let p = trim_trailing_slash(p);
    match p.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

/// Remove `prefix` from `p` when it is a component prefix.
///
/// Returns `p` unchanged when `prefix` does not match on a component boundary.
pub fn trim_prefix<'a>(p: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return p;
    }
    if !has_prefix(p, prefix) {
        return p;
    }
    let prefix = trim_trailing_slash(prefix);
    let rest = &trim_trailing_slash(p)[prefix.len()..];
    rest.strip_prefix('/').unwrap_or(rest)
}

/// Every ancestor of `p`, shortest first, ending with `p` itself.
///
/// Relative paths start at `""`, absolute paths at `"/"`. Empty components
/// produced by doubled slashes are not yielded separately, and a trailing
/// slash does not produce an extra entry.
pub fn prefixes(p: &str) -> impl Iterator<Item = &str> + '_ {
    let bytes = p.as_bytes();
    let root = if p.starts_with('/') { "/" } else { "" };

    let mut ends = Vec::new();
    for i in 1..bytes.len() {
        if bytes[i] == b'/' && bytes[i - 1] != b'/' {
            ends.push(i);
        }
    }
    let trimmed = p.trim_end_matches('/');
    if !trimmed.is_empty() && ends.last() != Some(&trimmed.len()) {
        ends.push(trimmed.len());
    }

    std::iter::once(root).chain(ends.into_iter().map(move |end| &p[..end]))
}

fn trim_trailing_slash(p: &str) -> &str {
    if p.len() > 1 {
        p.strip_suffix('/').unwrap_or(p)
    } else {
        p
    }
}

fn candidate_starts<'a>(p: &'a str, sub: &'a str) -> impl DoubleEndedIterator<Item = usize> + 'a {
    let (pb, sb) = (p.as_bytes(), sub.as_bytes());
    let last = pb.len().checked_sub(sb.len());
    (0..last.map_or(0, |l| l + 1)).filter(move |&i| &pb[i..i + sb.len()] == sb)
}

fn is_component_match(p: &str, sub: &str, start: usize) -> bool {
    let (pb, sb) = (p.as_bytes(), sub.as_bytes());
    let end = start + sb.len();
    let starts_on_boundary = start == 0 || pb[start - 1] == b'/' || sb[0] == b'/';
    let ends_on_boundary = end == pb.len() || pb[end] == b'/' || sb[sb.len() - 1] == b'/';
    starts_on_boundary && ends_on_boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_index() {
        let cases: &[(&str, &str, &str, Option<usize>)] = &[
            ("empty", "", "", Some(0)),
            ("empty_p", "", "a", None),
            ("empty_sub", "a", "", Some(0)),
            ("match_start_1", "a/b/c", "a", Some(0)),
            ("match_start_2", "aa/bb/cc", "aa/bb", Some(0)),
            ("match_first", "aa/aa", "aa", Some(0)),
            ("match_full", "aaa/bbb/ccc", "aaa/bbb/ccc", Some(0)),
            ("match_middle_2", "a/b/c/d", "b/c", Some(2)),
            ("match_end_2", "aa/bb/cc", "bb/cc", Some(3)),
            ("match_end_1", "a/b/c", "c", Some(4)),
            ("partial_match_start", "aa/bb", "aa/b", None),
            ("partial_match_end", "aa/bb", "a/bb", None),
            ("match_abs_both_start", "/a/b", "/a", Some(0)),
            ("match_abs_p_start", "/a/b", "a", Some(1)),
            ("match_abs_sub_start", "a/b", "/a", None),
            ("partial_match_abs", "/aa/bb", "/aa/b", None),
            ("match_unclean_dots", "a/b/../c", "b/..", Some(2)),
            ("match_unclean_slashes", "a/b//c", "b//c", Some(2)),
            ("match_unclean_slashes_no", "a/b//c", "b/c", None),
        ];
        for (desc, p, sub, want) in cases {
            assert_eq!(index(p, sub), *want, "{}", desc);
        }
    }

    #[test]
    fn test_last_index() {
        let cases: &[(&str, &str, &str, Option<usize>)] = &[
            ("empty", "", "", Some(0)),
            ("empty_p", "", "a", None),
            ("empty_sub", "a", "", Some(1)),
            ("match_start_1", "a/b/c", "a", Some(0)),
            ("match_start_2", "aa/bb/cc", "aa/bb", Some(0)),
            ("match_last", "aa/aa", "aa", Some(3)),
            ("match_full", "aaa/bbb/ccc", "aaa/bbb/ccc", Some(0)),
            ("match_middle_2", "a/b/c/d", "b/c", Some(2)),
            ("match_end_2", "aa/bb/cc", "bb/cc", Some(3)),
            ("match_end_1", "a/b/c", "c", Some(4)),
            ("partial_match_start", "aa/bb", "aa/b", None),
            ("partial_match_end", "aa/bb", "a/bb", None),
            ("match_abs_both_start", "/a/b", "/a", Some(0)),
            ("match_abs_p_start", "/a/b", "a", Some(1)),
            ("match_abs_sub_start", "a/b", "/a", None),
            ("partial_match_abs", "/aa/bb", "/aa/b", None),
            ("match_unclean_dots", "a/b/../c", "b/..", Some(2)),
            ("match_unclean_slashes", "a/b//c", "b//c", Some(2)),
            ("match_unclean_slashes_no", "a/b//c", "b/c", None),
        ];
        for (desc, p, sub, want) in cases {
            assert_eq!(last_index(p, sub), *want, "{}", desc);
        }
    }

    #[test]
    fn test_has_prefix() {
        let cases = [
            ("empty_prefix", "home/jr_hacker", "", true),
            ("partial_prefix", "home/jr_hacker", "home", true),
            ("full_prefix", "home/jr_hacker", "home/jr_hacker", true),
            ("too_long", "home", "home/jr_hacker", false),
            ("partial_component", "home/jr_hacker", "home/jr_", false),
            ("trailing_slash_prefix", "home/jr_hacker", "home/", true),
            ("trailing_slash_path", "home/jr_hacker/", "home", true),
        ];
        for (desc, path, prefix, want) in cases {
            assert_eq!(has_prefix(path, prefix), want, "{}", desc);
        }
    }

    #[test]
    fn test_trim_prefix() {
        let cases = [
            ("empty_prefix", "home/jr_hacker", "", "home/jr_hacker"),
            ("partial_prefix", "home/jr_hacker", "home", "jr_hacker"),
            ("full_prefix", "home/jr_hacker", "home/jr_hacker", ""),
            ("partial_component", "home/jr_hacker", "home/jr_", "home/jr_hacker"),
            ("trailing_slash_prefix", "home/jr_hacker", "home/", "jr_hacker"),
            ("trailing_slash_path", "home/jr_hacker/", "home", "jr_hacker"),
        ];
        for (desc, path, prefix, want) in cases {
            assert_eq!(trim_prefix(path, prefix), want, "{}", desc);
        }
    }

    #[test]
    fn test_prefixes() {
        let cases: &[(&str, &str, &[&str])] = &[
            ("empty", "", &[""]),
            ("slash", "/", &["/"]),
            ("simple_rel", "a", &["", "a"]),
            ("simple_abs", "/a", &["/", "/a"]),
            ("multiple_rel", "aa/bb/cc", &["", "aa", "aa/bb", "aa/bb/cc"]),
            ("multiple_abs", "/aa/bb/cc", &["/", "/aa", "/aa/bb", "/aa/bb/cc"]),
            ("unclean", "a/../b//c/", &["", "a", "a/..", "a/../b", "a/../b//c"]),
        ];
        for (name, path, want) in cases {
            let got: Vec<&str> = prefixes(path).collect();
            assert_eq!(got, want.to_vec(), "{}", name);
        }
    }
}
