//! Composition and decomposition of node paths under the root prefix

/// Join `names` with `/` under `root_prefix`.
///
/// Trailing slashes on the prefix are dropped first, so exactly one separator
/// sits between the prefix and the first name.
#[must_use]
pub fn compose<S: AsRef<str>>(root_prefix: &str, names: &[S]) -> String {
    let mut path = root_prefix.trim_end_matches('/').to_string();
    for name in names {
        path.push('/');
        path.push_str(name.as_ref());
    }
    path
}

/// Split `path` back into node names, the inverse of [`compose`].
///
/// Returns `None` when `path` does not live under `root_prefix` or contains an
/// empty segment. A single trailing `/` is tolerated.
#[must_use]
pub fn segments<'p>(root_prefix: &str, path: &'p str) -> Option<Vec<&'p str>> {
    let rest = path.strip_prefix(root_prefix.trim_end_matches('/'))?;
    let rest = rest.strip_prefix('/')?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    let names: Vec<&str> = rest.split('/').collect();
    if names.iter().any(|name| name.is_empty()) {
        return None;
    }
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose() {
        assert_eq!(compose("/app", &["g", "a"]), "/app/g/a");
        assert_eq!(compose("/app/", &["g"]), "/app/g");
        assert_eq!(compose("/app//", &["g"]), "/app/g");
        assert_eq!(compose("/", &["cli"]), "/cli");
        assert_eq!(compose("", &["cli", "sub"]), "/cli/sub");
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("/app", "/app/g/a"), Some(vec!["g", "a"]));
        assert_eq!(segments("/app/", "/app/g/"), Some(vec!["g"]));
        assert_eq!(segments("/", "/cli/sub"), Some(vec!["cli", "sub"]));
    }

    #[test]
    fn test_segments_rejects_foreign_paths() {
        assert_eq!(segments("/app", "/application/g"), None);
        assert_eq!(segments("/app", "/other/g"), None);
        assert_eq!(segments("/app", "/app"), None);
        assert_eq!(segments("/app", "/app/g//a"), None);
    }

    #[test]
    fn test_segments_inverts_compose() {
        let path = compose("/web/", &["cli", "file-handling", "process-input-file"]);
        assert_eq!(
            segments("/web/", &path),
            Some(vec!["cli", "file-handling", "process-input-file"])
        );
    }
}
