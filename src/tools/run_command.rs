use eyre::{Result, eyre};
use std::path::Path;
use std::process::Stdio;

#[derive(Debug)]
pub struct Finished {
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run `argv` inside `dir` to completion, capturing both streams.
pub async fn call(argv: &[String], dir: &Path) -> Result<Finished> {
    let Some((program, args)) = argv.split_first() else {
        return Err(eyre!("argv must be non-empty"));
    };

    let output = tokio::process::Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| eyre!("cannot run {program}: {e}"))?;

    Ok(Finished {
        code: output.status.code(),
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
