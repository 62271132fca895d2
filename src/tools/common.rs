use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve a model-supplied file name to a real path confined to the checkout `root`.
///
/// - Accepts relative names (e.g., `./src/../lib.rs`) and collapses `.` / `..` without
///   allowing traversal above the root.
/// - Accepts absolute paths **only if** they resolve (after following symlinks) under
///   the root.
/// - Follows symlinks for the deepest existing ancestor; non-existent trailing segments
///   are preserved (the leaf need not exist).
///
/// `root` must already be canonical. Returns an absolute path under it.
///
/// # Errors
/// - `PermissionDenied` if the path escapes the checkout via `..`, absolute
///   components, or symlinks.
/// - Propagates I/O errors (e.g., from canonicalization of existing ancestors).
pub fn resolve_path_within(root: &Path, path: &str) -> io::Result<PathBuf> {
    let path = path.trim();
    let input = Path::new(path);

    if path.is_empty() || input == Path::new(".") {
        return Ok(root.to_path_buf());
    }

    let candidate = if input.is_absolute() {
        input.to_path_buf()
    } else {
        let mut rel = PathBuf::new();
        for c in input.components() {
            match c {
                Component::CurDir => {}
                Component::Normal(part) => rel.push(part),
                Component::ParentDir => {
                    if !rel.pop() {
                        return Err(io::Error::new(
                            io::ErrorKind::PermissionDenied,
                            format!("{path} points outside the checkout"),
                        ));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        "rooted paths are not allowed",
                    ));
                }
            }
        }
        root.join(rel)
    };

    // Resolve the existing ancestor to handle symlinks, then re-verify containment.
    let real = soft_canonicalize(&candidate)?;
    if !real.starts_with(root) {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{path} resolves outside the checkout"),
        ));
    }
    Ok(real)
}

/// Canonicalize the deepest existing ancestor of `p`, then append the missing tail.
/// This follows symlinks in the existing prefix but does not require the leaf to exist.
pub fn soft_canonicalize<P: AsRef<Path>>(p: P) -> io::Result<PathBuf> {
    let mut probe = p.as_ref();

    // Peel off non-existent tail components.
    let mut tail = Vec::new();
    while fs::symlink_metadata(probe).is_err() {
        match probe.parent() {
            Some(parent) => {
                if let Some(name) = probe.file_name() {
                    tail.push(name.to_os_string());
                }
                probe = parent;
            }
            None => break,
        }
    }

    let mut base = if fs::symlink_metadata(probe).is_ok() {
        probe.canonicalize()?
    } else {
        PathBuf::new()
    };
    for seg in tail.into_iter().rev() {
        base.push(seg);
    }
    Ok(base)
}

/// Prefix each line with its right-aligned 1-based number, as shown to the model.
pub fn number_lines(code: &str) -> String {
    let count = code.lines().count();
    let width = count.to_string().len();
    code.lines()
        .enumerate()
        .map(|(i, line)| format!("{:>width$} | {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip a Markdown fence around model output: an opening ```` ```lang ```` line
/// and, if there was one, the matching closing ```` ``` ```` line.
pub fn trim_code_blocks(text: &str) -> String {
    let body = text.trim_start_matches(['\n', '\r']);
    let Some(after_fence) = body.trim_start().strip_prefix("```") else {
        return text.to_string();
    };
    let inner = match after_fence.find('\n') {
        Some(newline) => &after_fence[newline + 1..],
        None => "",
    };
    let end = inner.trim_end();
    match end.strip_suffix("```") {
        Some(before) if before.is_empty() || before.ends_with('\n') => before.to_string(),
        _ => inner.to_string(),
    }
}

/// Replace every mention of the checkout root so messages only show relative paths.
pub fn scrub_root(message: &str, root: &Path) -> String {
    let root = root.display().to_string();
    if root.is_empty() {
        return message.to_string();
    }
    message.replace(&root, ".")
}
