mod cli;

use std::io;

use anyhow::{anyhow, bail, Result};
use is_terminal::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Command;
use yutu_manager::{
    command::{Invocation, ParamValue, Params},
    menu::{run_interactive, show_banner, Prompter},
    printer::display_warning,
    Config, YutuCli,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with tables on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yutu_manager=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = cli::Cli::parse();

    let mut cfg = Config::load();
    if let Some(path) = args.cli_path {
        cfg.cli_path = path;
    }
    tracing::debug!(cli_path = %cfg.cli_path.display(), root = %cfg.root.display(), "configuration loaded");

    match args.command {
        Some(Command::Check) => {
            let problems = cfg.validate_paths();
            if problems.is_empty() {
                println!("configuration OK ({})", cfg.cli_path.display());
                return Ok(());
            }
            for p in &problems {
                eprintln!("{}", p);
            }
            bail!("{} configuration problem(s)", problems.len());
        }
        Some(Command::Call { resource, action, params, max_results, output }) => {
            let params = parse_params(&params)?;
            let inv = Invocation::new(&resource, &action)
                .output(&output)
                .max_results(max_results)
                .params(params);
            let result = YutuCli::new(cfg).run(inv).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            if !io::stdin().is_terminal() {
                bail!("interactive mode needs a terminal; use `call` for scripting");
            }
            show_banner(env!("CARGO_PKG_VERSION"));
            let problems = cfg.validate_paths();
            for p in &problems {
                display_warning(p);
            }
            if !problems.is_empty() {
                println!("Set YUTU_CLI_PATH, YUTU_ROOT and YUTU_CREDENTIAL (env or .env) to fix this.\n");
            }
            let yutu = YutuCli::new(cfg);
            let mut prompter = Prompter::stdio();
            run_interactive(&yutu, &mut prompter).await
        }
    }
}

fn parse_params(raw: &[String]) -> Result<Params> {
    let mut params = Params::new();
    for entry in raw {
        let (k, v) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("parameter must be key=value: {}", entry))?;
        params.set(k.trim(), ParamValue::parse_literal(v.trim()));
    }
    Ok(params)
}
