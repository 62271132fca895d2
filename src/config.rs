//! Run configuration from positional arguments and `MEND_*` environment variables.
use eyre::{Result, eyre};
use std::path::PathBuf;

use crate::tools::apply_patch::DEFAULT_SEARCH_WINDOW;

pub const USAGE: &str = "usage: mend <issue number> <issue text> [checkout path]";

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_MAX_TURNS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub issue_number: String,
    pub issue_text: String,
    pub checkout: PathBuf,
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    /// Argv run in the checkout after every write, if any.
    pub formatter: Option<Vec<String>>,
    pub max_turns: usize,
    pub search_window: usize,
    /// Where GitHub Actions collects step outputs.
    pub github_output: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_parts(&args, |key| std::env::var(key).ok())
    }

    /// Build from explicit arguments (binary name excluded) and an environment lookup.
    pub fn from_parts(args: &[String], var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let [issue_number, issue_text, rest @ ..] = args else {
            return Err(eyre!("{USAGE}"));
        };
        let checkout = match rest {
            [] => PathBuf::from("."),
            [path] => PathBuf::from(path),
            _ => return Err(eyre!("too many arguments\n{USAGE}")),
        };

        let api_key = var("MEND_API_KEY")
            .or_else(|| var("OPENAI_API_KEY"))
            .ok_or_else(|| eyre!("set MEND_API_KEY or OPENAI_API_KEY"))?;

        let number = |key: &str, default: usize| -> Result<usize> {
            match var(key) {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| eyre!("{key} must be a non-negative integer, got {v:?}")),
                None => Ok(default),
            }
        };

        Ok(Config {
            issue_number: issue_number.trim().trim_start_matches('#').to_string(),
            issue_text: issue_text.clone(),
            checkout,
            api_key,
            api_base: var("MEND_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: var("MEND_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            formatter: var("MEND_FORMATTER")
                .map(|f| f.split_whitespace().map(str::to_string).collect()),
            max_turns: number("MEND_MAX_TURNS", DEFAULT_MAX_TURNS)?,
            search_window: number("MEND_SEARCH_WINDOW", DEFAULT_SEARCH_WINDOW)?,
            github_output: var("GITHUB_OUTPUT").map(PathBuf::from),
        })
    }
}
