//! GitHub Actions step outputs.
use eyre::{Result, eyre};
use std::io::Write;
use std::path::PathBuf;

/// Sink for named step outputs: the `GITHUB_OUTPUT` file when present,
/// otherwise workflow commands on stdout.
#[derive(Debug, Clone, Default)]
pub struct StepOutputs {
    path: Option<PathBuf>,
}

impl StepOutputs {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        tracing::info!(%name, "outputs: set");
        let Some(path) = &self.path else {
            println!("::set-output name={name}::{}", escape_command_value(value));
            return Ok(());
        };
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eyre!("cannot open step output file {}: {e}", path.display()))?;
        file.write_all(render_output(name, value).as_bytes())?;
        Ok(())
    }
}

/// `name<<DELIM\nvalue\nDELIM\n`, with a delimiter the value does not contain.
fn render_output(name: &str, value: &str) -> String {
    let mut delimiter = String::from("MEND_EOF");
    let mut n = 0;
    while value.contains(&delimiter) {
        n += 1;
        delimiter = format!("MEND_EOF_{n}");
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

fn escape_command_value(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
