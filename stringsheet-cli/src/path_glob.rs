use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::{debug, warn};

/// Find every file called `file_name` below `root`.
/// Uses ignore + globset for .gitignore-aware traversal. Results are sorted by path.
pub fn find_resource_documents(root: &Path, file_name: &str) -> Result<Vec<PathBuf>, String> {
    if !root.is_dir() {
        return Err(format!("Input directory {} does not exist", root.display()));
    }

    let pattern = format!("**/{}", file_name);
    let glob = GlobBuilder::new(&pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| format!("Invalid file name '{}': {}", file_name, e))?;
    let mut builder = GlobSetBuilder::new();
    builder.add(glob);
    let set = builder
        .build()
        .map_err(|e| format!("Failed to build glob set: {}", e))?;

    let walker = WalkBuilder::new(root)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .hidden(false)
        .ignore(true)
        .parents(true)
        .build();

    let mut found: Vec<PathBuf> = Vec::new();
    for dent in walker {
        let dent = match dent {
            Ok(d) => d,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let relative = dent.path().strip_prefix(root).unwrap_or(dent.path());
        if set.is_match(relative) {
            found.push(dent.path().to_path_buf());
        }
    }

    found.sort();
    found.dedup();
    if found.is_empty() {
        warn!("No {} files found below {}", file_name, root.display());
    } else {
        debug!("Found {} {} files below {}", found.len(), file_name, root.display());
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<resources/>").unwrap();
    }

    #[test]
    fn test_finds_sorted_documents() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root.join("values-fr/strings.xml"));
        touch(root.join("values/strings.xml"));
        touch(root.join("values/colors.xml"));
        touch(root.join("strings.xml"));

        let found = find_resource_documents(root, "strings.xml").unwrap();
        assert_eq!(
            found,
            vec![
                root.join("strings.xml"),
                root.join("values/strings.xml"),
                root.join("values-fr/strings.xml"),
            ]
        );
    }

    #[test]
    fn test_custom_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root.join("values/strings.xml"));
        touch(root.join("values/app_strings.xml"));

        let found = find_resource_documents(root, "app_strings.xml").unwrap();
        assert_eq!(found, vec![root.join("values/app_strings.xml")]);
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_resource_documents(temp_dir.path(), "strings.xml").unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_resource_documents(&temp_dir.path().join("nope"), "strings.xml").is_err());
    }
}
