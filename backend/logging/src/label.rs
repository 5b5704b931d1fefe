//! Labels derived from a caller's source path.
//!
//! `".../<parent>/<file>"` becomes `"<parent>/<file>"`. No filesystem access.

/// Last two path segments joined by `/`.
///
/// Both `/` and `\` separate segments and empty segments are skipped. A bare
/// file name comes back unchanged and an empty path gives an empty label.
pub fn derive_label(source_location: &str) -> String {
    let mut segments = source_location
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .rev();
    match (segments.next(), segments.next()) {
        (Some(file), Some(parent)) => format!("{parent}/{file}"),
        (Some(file), None) => file.to_string(),
        _ => String::new(),
    }
}

/// Label with the method appended as `" ~ <method>"` when one is given.
pub fn compose_label(source_location: &str, method: Option<&str>) -> String {
    let label = derive_label(source_location);
    match method.filter(|m| !m.is_empty()) {
        Some(method) if label.is_empty() => format!("~ {method}"),
        Some(method) => format!("{label} ~ {method}"),
        None => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_two_segments() {
        assert_eq!(derive_label("/srv/app/src/api/users.rs"), "api/users.rs");
        assert_eq!(derive_label("api/users.rs"), "api/users.rs");
    }

    #[test]
    fn test_single_segment_is_returned_as_is() {
        assert_eq!(derive_label("main.rs"), "main.rs");
        assert_eq!(derive_label("/main.rs"), "main.rs");
    }

    #[test]
    fn test_empty_and_separator_only_paths() {
        assert_eq!(derive_label(""), "");
        assert_eq!(derive_label("///"), "");
    }

    #[test]
    fn test_trailing_and_repeated_separators_are_ignored() {
        assert_eq!(derive_label("a//b.rs"), "a/b.rs");
        assert_eq!(derive_label("x/a/b/"), "a/b");
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(derive_label(r"C:\srv\api\users.rs"), "api/users.rs");
    }

    #[test]
    fn test_no_filesystem_check() {
        assert_eq!(
            derive_label("/definitely/not/here/ghost.rs"),
            "here/ghost.rs"
        );
    }

    #[test]
    fn test_method_suffix() {
        assert_eq!(
            compose_label("src/api/users.rs", Some("create")),
            "api/users.rs ~ create"
        );
        assert_eq!(compose_label("src/api/users.rs", Some("")), "api/users.rs");
        assert_eq!(compose_label("src/api/users.rs", None), "api/users.rs");
        assert_eq!(compose_label("", Some("boot")), "~ boot");
    }
}
