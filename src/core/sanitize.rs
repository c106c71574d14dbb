//! Branch-name sanitization
//!
//! Git reference names cannot contain whitespace and a number of punctuation
//! characters, and consecutive separators produce references that are awkward
//! to type and easy to mistype. This module turns free-form user input into
//! a name that is safe for the ref namespace.

use crate::constants::{ALLOWED_PUNCTUATION, SEPARATOR_CHARS};
use crate::error::{Error, Result};

/// Sanitizes a user-supplied branch name.
///
/// # Rules
///
/// 1. Leading and trailing whitespace is trimmed
/// 2. Uppercase ASCII is lowered for a consistent ref namespace
/// 3. Each whitespace run becomes a single hyphen
/// 4. Characters outside `[a-z0-9._/-]` are stripped
/// 5. Runs of the same separator (`-`, `/`, `.`) collapse to one
/// 6. Leading and trailing separators are removed
///
/// The transformation is deterministic and idempotent: sanitizing an already
/// sanitized name returns it unchanged.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] when nothing usable remains, e.g. for an
/// empty string or input made entirely of stripped characters.
///
/// # Examples
///
/// ```
/// use rulesync::core::sanitize_branch_name;
///
/// assert_eq!(sanitize_branch_name("My Feature").unwrap(), "my-feature");
/// assert_eq!(sanitize_branch_name("fix//login").unwrap(), "fix/login");
/// assert!(sanitize_branch_name("???").is_err());
/// ```
pub fn sanitize_branch_name(input: &str) -> Result<String> {
    let mut collected = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            pending_hyphen = true;
            continue;
        }

        let ch = ch.to_ascii_lowercase();
        if !ch.is_ascii_alphanumeric() && !ALLOWED_PUNCTUATION.contains(&ch) {
            continue;
        }

        if pending_hyphen {
            collected.push('-');
            pending_hyphen = false;
        }
        collected.push(ch);
    }

    let collapsed = collapse_separator_runs(&collected);
    let trimmed = collapsed.trim_matches(|c| SEPARATOR_CHARS.contains(&c));

    if trimmed.is_empty() {
        return Err(Error::InvalidName {
            input: input.to_string(),
        });
    }

    Ok(trimmed.to_string())
}

/// Collapses runs of the same separator character into a single occurrence.
///
/// Only identical neighbors collapse, so `a-/b` survives while `a//b` and
/// `a..b` do not. Keeping `.` in the set also rules out `..`, which git
/// rejects inside ref names.
fn collapse_separator_runs(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut previous: Option<char> = None;

    for ch in name.chars() {
        if SEPARATOR_CHARS.contains(&ch) && previous == Some(ch) {
            continue;
        }
        out.push(ch);
        previous = Some(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_names_pass_through() {
        let names = vec!["feature", "bugfix-123", "release/1.2", "snake_case"];

        for name in names {
            assert_eq!(sanitize_branch_name(name).unwrap(), name);
        }
    }

    #[test]
    fn test_sanitize_whitespace_becomes_hyphen() {
        assert_eq!(sanitize_branch_name("My Feature").unwrap(), "my-feature");
        assert_eq!(sanitize_branch_name("a\tb  c").unwrap(), "a-b-c");
        assert_eq!(sanitize_branch_name("  padded  ").unwrap(), "padded");
    }

    #[test]
    fn test_sanitize_strips_disallowed_characters() {
        assert_eq!(sanitize_branch_name("fix?:login*").unwrap(), "fixlogin");
        assert_eq!(sanitize_branch_name("a~^b[c]d").unwrap(), "abcd");
        assert_eq!(sanitize_branch_name("wip\\branch").unwrap(), "wipbranch");
    }

    #[test]
    fn test_sanitize_collapses_separator_runs() {
        assert_eq!(sanitize_branch_name("a//b").unwrap(), "a/b");
        assert_eq!(sanitize_branch_name("a--b").unwrap(), "a-b");
        assert_eq!(sanitize_branch_name("a..b").unwrap(), "a.b");
        assert_eq!(sanitize_branch_name("a - b").unwrap(), "a-b");
    }

    #[test]
    fn test_sanitize_trims_edge_separators() {
        assert_eq!(sanitize_branch_name("/feature/").unwrap(), "feature");
        assert_eq!(sanitize_branch_name("-feature-").unwrap(), "feature");
        assert_eq!(sanitize_branch_name(".feature.").unwrap(), "feature");
    }

    #[test]
    fn test_sanitize_rejects_unusable_input() {
        let unusable = vec!["", "   ", "???", "~^:", "---", "///"];

        for input in unusable {
            let result = sanitize_branch_name(input);
            assert!(
                matches!(result, Err(Error::InvalidName { .. })),
                "expected '{input}' to be rejected"
            );
        }
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = vec![
            "My Feature",
            "a//b..c--d",
            "  UPPER case  ",
            "release/2.0",
            "weird?*[]name",
        ];

        for input in inputs {
            let once = sanitize_branch_name(input).unwrap();
            let twice = sanitize_branch_name(&once).unwrap();
            assert_eq!(once, twice, "sanitize not idempotent for '{input}'");
        }
    }
}
