//! Source scanning helpers for layering tests.

use std::fs;
use std::path::{Path, PathBuf};

/// A line of source that matched: `(path relative to the crate, 1-based line, text)`.
pub type Hit = (String, usize, String);

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn rust_sources(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        panic!("cannot list {}", dir.display());
    };

    let mut out = Vec::new();
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            out.extend(rust_sources(&path));
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
    out.sort();
    out
}

/// Lines under `dir` (relative to the crate root) containing any of `needles`.
pub fn find_lines_containing(dir: &str, needles: &[&str]) -> Vec<Hit> {
    let root = crate_root();
    rust_sources(&root.join(dir))
        .into_iter()
        .flat_map(|file| {
            let source = fs::read_to_string(&file)
                .unwrap_or_else(|e| panic!("cannot read {}: {e}", file.display()));
            let shown = file
                .strip_prefix(&root)
                .unwrap_or(&file)
                .to_string_lossy()
                .replace('\\', "/");
            source
                .lines()
                .enumerate()
                .filter(|(_, line)| needles.iter().any(|n| line.contains(n)))
                .map(|(i, line)| (shown.clone(), i + 1, line.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}
