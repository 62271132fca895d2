use eyre::{Result, eyre};

use super::Workspace;
use super::common::number_lines;

/// Write `contents` verbatim, creating parent directories; overwrites an existing file.
pub async fn call(workspace: &Workspace, name: &str, contents: &str) -> Result<String> {
    let path = workspace.resolve(name)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| eyre!("cannot create {}: {e}", parent.display()))?;
    }
    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| eyre!("cannot write {}: {e}", path.display()))?;
    tracing::info!(%name, bytes = contents.len(), "create_file: written");
    workspace.format().await;

    let after = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| eyre!("cannot read {}: {e}", path.display()))?;
    Ok(format!("created {name}. Result: {}", number_lines(&after)))
}
