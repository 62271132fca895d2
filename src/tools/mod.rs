//! File commands the model can issue, all confined to one checkout.
use eyre::{Result, eyre};
use std::path::{Path, PathBuf};

pub mod apply_patch;
pub mod common;

mod create_file;
mod list_files;
mod patch_file;
mod read_file;
mod remove_file;
mod run_command;

use self::apply_patch::PatchOptions;
use self::common::resolve_path_within;

/// The checkout the model works on, plus how edits are applied and formatted.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    formatter: Option<Vec<String>>,
    patch_options: PatchOptions,
}

impl Workspace {
    pub fn new(
        root: &Path,
        formatter: Option<Vec<String>>,
        patch_options: PatchOptions,
    ) -> Result<Self> {
        let root = root
            .canonicalize()
            .map_err(|e| eyre!("checkout {} is not usable: {e}", root.display()))?;
        if !root.is_dir() {
            return Err(eyre!("checkout {} is not a directory", root.display()));
        }
        Ok(Self {
            root,
            formatter: formatter.filter(|argv| !argv.is_empty()),
            patch_options,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patch_options(&self) -> &PatchOptions {
        &self.patch_options
    }

    pub fn resolve(&self, name: &str) -> std::io::Result<PathBuf> {
        resolve_path_within(&self.root, name)
    }

    pub fn list_files(&self) -> Result<Vec<String>> {
        list_files::call(&self.root).map_err(|e| eyre!("cannot list checkout files: {e}"))
    }

    pub async fn read_files(&self, names: &[String]) -> Result<String> {
        read_file::call(self, names).await
    }

    pub async fn patch_file(&self, name: &str, body: &str) -> Result<String> {
        patch_file::call(self, name, body).await
    }

    pub async fn create_file(&self, name: &str, contents: &str) -> Result<String> {
        create_file::call(self, name, contents).await
    }

    pub async fn remove_file(&self, name: &str) -> Result<String> {
        remove_file::call(self, name).await
    }

    /// Run the configured formatter over the whole checkout.
    /// A formatter that fails or is missing is logged and otherwise ignored.
    pub async fn format(&self) {
        let Some(argv) = &self.formatter else {
            return;
        };
        match run_command::call(argv, &self.root).await {
            Ok(done) if done.success => {
                tracing::debug!(formatter = %argv.join(" "), "format: done");
            }
            Ok(done) => {
                tracing::warn!(
                    formatter = %argv.join(" "),
                    code = ?done.code,
                    stderr = %done.stderr.trim_end(),
                    "format: formatter failed"
                );
            }
            Err(e) => {
                tracing::warn!(formatter = %argv.join(" "), error = %e, "format: cannot run formatter");
            }
        }
    }
}
