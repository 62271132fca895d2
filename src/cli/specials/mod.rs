use crate::config::USAGE;

/// Handle one-shot CLI commands like `--help` or `--version`.
/// Returns true if a special action was handled and the program should exit.
pub fn handle_specials_if_needed() -> bool {
    let arg = std::env::args().nth(1).unwrap_or_default();

    if matches!(arg.as_str(), "help" | "--help" | "-H" | "-h" | "-?") {
        println!(
            "{}",
            concat!(
                "mend: let a chat model resolve a GitHub issue in a checkout\n\n",
                "  $ mend 42 \"The README says 2021\" ./repo\n\n",
                "environment: MEND_API_KEY (or OPENAI_API_KEY), MEND_MODEL, MEND_API_BASE,\n",
                "  MEND_FORMATTER, MEND_MAX_TURNS, MEND_SEARCH_WINDOW, MEND_LOG\n",
            )
        );
        println!("{USAGE}");
        return true;
    }

    if matches!(arg.as_str(), "version" | "--version" | "-V" | "-v") {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return true;
    }

    false
}
