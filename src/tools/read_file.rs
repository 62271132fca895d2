use eyre::{Result, eyre};
use futures_util::future::try_join_all;
use tokio::io::AsyncReadExt;

use super::Workspace;
use super::common::number_lines;

/// Files larger than this are shown only up to the limit.
const MAX_BYTES: u64 = 512 * 1024;

async fn read_limited(workspace: &Workspace, name: &str) -> Result<String> {
    let path = workspace.resolve(name)?;
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| eyre!("cannot read {}: {e}", path.display()))?;
    let mut buf = Vec::new();
    file.take(MAX_BYTES + 1)
        .read_to_end(&mut buf)
        .await
        .map_err(|e| eyre!("cannot read {}: {e}", path.display()))?;

    let truncated = buf.len() as u64 > MAX_BYTES;
    buf.truncate(MAX_BYTES as usize);
    let mut code = number_lines(&String::from_utf8_lossy(&buf));
    if truncated {
        code.push_str(&format!("\n(truncated after {MAX_BYTES} bytes)"));
    }
    Ok(format!("{name}\n{code}\n"))
}

/// Read several files at once; any failure fails the whole command.
pub async fn call(workspace: &Workspace, names: &[String]) -> Result<String> {
    let reads = names.iter().map(|name| read_limited(workspace, name));
    let contents = try_join_all(reads).await?;
    Ok(contents.concat())
}
