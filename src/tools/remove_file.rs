use eyre::{Result, eyre};
use std::io::ErrorKind;

use super::Workspace;

/// A missing file is reported back, not treated as a failure.
pub async fn call(workspace: &Workspace, name: &str) -> Result<String> {
    let path = workspace.resolve(name)?;
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            tracing::info!(%name, "remove_file: removed");
            Ok(format!("removed {name}"))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(format!("{name} does not exist")),
        Err(e) => Err(eyre!("cannot remove {}: {e}", path.display())),
    }
}
