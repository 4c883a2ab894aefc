//! Inventory file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use ss_core::Result;

/// All `.csv` files under `root`, recursively, sorted. Symlinks are skipped.
pub fn discover_csv_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_dir_for_csv(root, &mut out)?;
    out.sort();
    Ok(out)
}

fn walk_dir_for_csv(root: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let ft = entry.file_type()?;

        // Avoid symlink loops when scanning arbitrary export trees.
        if ft.is_symlink() {
            continue;
        }

        let path = entry.path();
        if ft.is_dir() {
            walk_dir_for_csv(&path, out)?;
            continue;
        }

        if ft.is_file()
            && let Some(ext) = path.extension().and_then(|s| s.to_str())
            && ext.eq_ignore_ascii_case("csv")
        {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        p.push(format!("ss-ingest-{}-{}-{}", name, std::process::id(), nanos));
        p
    }

    fn rm_rf(path: &Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    #[test]
    fn finds_nested_csv_sorted() {
        let root = tmp_dir("walk");
        rm_rf(&root);
        std::fs::create_dir_all(root.join("b/c")).unwrap();
        std::fs::create_dir_all(root.join("a")).unwrap();
        std::fs::write(root.join("b/c/ptegu.csv"), "x\n").unwrap();
        std::fs::write(root.join("a/ptnonipm.CSV"), "x\n").unwrap();
        std::fs::write(root.join("a/readme.txt"), "x\n").unwrap();

        let found = discover_csv_files(&root).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("a/ptnonipm.CSV"));
        assert!(found[1].ends_with("b/c/ptegu.csv"));

        rm_rf(&root);
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = tmp_dir("missing");
        assert!(discover_csv_files(&root).is_err());
    }
}
