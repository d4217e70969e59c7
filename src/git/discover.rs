use crate::error::{ReportError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// `root` itself when it is a repository, otherwise its immediate subdirectories
/// in file-name order. Candidates are not validated here.
pub fn discover_repositories(root: &Path) -> Result<Vec<PathBuf>> {
    if root.join(".git").is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        return Err(ReportError::NotARepository(root.display().to_string()));
    }

    let walker = WalkBuilder::new(root)
        .max_depth(Some(1))
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| ReportError::GitRepo(e.to_string()))?;
        if entry.depth() == 1 && entry.file_type().is_some_and(|t| t.is_dir()) {
            candidates.push(entry.into_path());
        }
    }
    Ok(candidates)
}

pub fn repo_name(path: &Path) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| resolved.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn repository_root_is_returned_alone() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();

        assert_eq!(discover_repositories(dir.path()).unwrap(), vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn parent_directory_lists_subdirectories_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "not a repo").unwrap();

        let found: Vec<String> = discover_repositories(dir.path())
            .unwrap()
            .iter()
            .map(|p| repo_name(p))
            .collect();
        assert_eq!(found, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_repositories(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn repo_name_resolves_dot() {
        let name = repo_name(Path::new("."));
        assert!(!name.is_empty() && name != ".");
    }
}
