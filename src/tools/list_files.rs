use std::fs;
use std::path::Path;

fn is_excluded_dir(name: &str) -> bool {
    matches!(name, ".git" | ".github" | "target" | "node_modules")
}

fn walk(cur: &Path, base: &Path, out: &mut Vec<String>) -> std::io::Result<()> {
    for entry in fs::read_dir(cur)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let name = entry.file_name();
            if is_excluded_dir(&name.to_string_lossy()) {
                continue;
            }
            walk(&path, base, out)?;
            continue;
        }
        let rel = path.strip_prefix(base).unwrap_or(&path);
        out.push(format!("./{}", rel.display()));
    }
    Ok(())
}

/// Every file in the checkout as `./relative/path`, sorted.
/// Directories are not listed themselves; symlinked directories are not followed.
pub fn call(root: &Path) -> std::io::Result<Vec<String>> {
    let mut out = Vec::new();
    walk(root, root, &mut out)?;
    out.sort();
    tracing::debug!(count = out.len(), "list_files: walked checkout");
    Ok(out)
}
