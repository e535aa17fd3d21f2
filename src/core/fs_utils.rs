//! File system helpers (BOM-aware reader, lexical path normalization)
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Read a source file as UTF-8 text, stripping the UTF-8 BOM if present.
pub fn read_source_file(path: &Path) -> std::io::Result<String> {
    let mut content = fs::read_to_string(path)?;
    if content.starts_with('\u{FEFF}') {
        content = content.trim_start_matches('\u{FEFF}').to_string();
    }
    Ok(content)
}

/// Normalize a path lexically: drop `.` segments and resolve `..` against
/// preceding components without touching the file system.
///
/// The compiler and the syntax engine may report the same file with
/// different `./` prefixes or embedded `..` hops; comparisons must go
/// through this normalization on both sides.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.cpp");
        fs::write(&path, "\u{FEFF}int x;\n").unwrap();
        assert_eq!(read_source_file(&path).unwrap(), "int x;\n");
    }

    #[test]
    fn test_normalize_drops_current_dir() {
        assert_eq!(normalize_path(Path::new("./a/b")), PathBuf::from("a/b"));
        assert_eq!(normalize_path(Path::new("a/./b")), PathBuf::from("a/b"));
    }

    #[test]
    fn test_normalize_resolves_parent_hops() {
        assert_eq!(normalize_path(Path::new("a/b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_normalize_keeps_root_anchored() {
        assert_eq!(normalize_path(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn test_normalize_empty_is_current_dir() {
        assert_eq!(normalize_path(Path::new("")), PathBuf::from("."));
    }
}
