use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "yutu-manager", about = "Interactive YouTube channel manager built on the yutu CLI", version)]
pub struct Cli {
    /// Path to the yutu executable (overrides YUTU_CLI_PATH).
    #[arg(long = "cli-path", global = true)]
    pub cli_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report configuration problems (missing executable or credentials).
    Check,

    /// Run a single yutu invocation and print the result as JSON.
    ///
    /// Example: yutu-manager call search list -p q=rust -p type=video --max-results 5
    Call {
        /// Resource name (playlist, playlistItem, video, search, comment, caption, ...).
        resource: String,

        /// Action name (list, insert, update, delete, setModerationStatus, ...).
        action: String,

        /// Parameter as key=value; true/false become flags, integers stay numeric.
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
        params: Vec<String>,

        /// Override the configured page size (0 = all results).
        #[arg(long = "max-results")]
        max_results: Option<u32>,

        /// Output format requested from yutu.
        #[arg(long, default_value = "json")]
        output: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_collects_params_in_order() {
        let cli = Cli::try_parse_from([
            "yutu-manager", "call", "search", "list", "-p", "q=rust", "--param", "type=video",
            "--max-results", "5",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Call { resource, action, params, max_results, output }) => {
                assert_eq!((resource.as_str(), action.as_str()), ("search", "list"));
                assert_eq!(params, ["q=rust", "type=video"]);
                assert_eq!(max_results, Some(5));
                assert_eq!(output, "json");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["yutu-manager", "--cli-path", "/opt/yutu"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.cli_path, Some(PathBuf::from("/opt/yutu")));
    }
}
