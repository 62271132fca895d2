use eyre::{Result, eyre};

use super::Workspace;
use super::apply_patch::apply_with;
use super::common::number_lines;

/// Read, patch in memory, and only touch the disk when the text really changed.
pub async fn call(workspace: &Workspace, name: &str, body: &str) -> Result<String> {
    let path = workspace.resolve(name)?;
    let before = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| eyre!("cannot read {}: {e}", path.display()))?;

    let applied = apply_with(&before, body, workspace.patch_options())?;
    if !applied.changed {
        tracing::info!(%name, "patch_file: no changes");
        return Ok(format!("no changes to {name}"));
    }

    tokio::fs::write(&path, &applied.text)
        .await
        .map_err(|e| eyre!("cannot write {}: {e}", path.display()))?;
    tracing::info!(%name, "patch_file: written");
    workspace.format().await;

    let after = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| eyre!("cannot read {}: {e}", path.display()))?;
    Ok(format!("patched {name}. Result: {}", number_lines(&after)))
}
