use anyhow::Result;
use clap::Parser;
use statematch::cli::{Cli, Commands};
use statematch::commands::{self, results::ResultsOptions, AppContext};
use statematch::observability::{init_logging, install_panic_hook, set_current_command};
use std::io::{self, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbosity);
    install_panic_hook();
    set_current_command(cli.command.name());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Commands that work without a dataset or session.
    match &cli.command {
        Commands::Init { force } => {
            return commands::init::init_config(&std::env::current_dir()?, *force, &mut out);
        }
        Commands::CheckData { dir } => {
            let dir = match dir {
                Some(dir) => Some(dir.clone()),
                None => {
                    let config = commands::resolve_config(&cli.global)?;
                    cli.global.data_dir.clone().or(config.data.dir)
                }
            };
            return commands::check_data::run(dir.as_deref(), &mut out);
        }
        _ => {}
    }

    let ctx = AppContext::from_args(&cli.global)?;
    ctx.formatting.apply();

    match cli.command {
        Commands::Quiz { answers } => {
            commands::quiz::run(&ctx, answers.as_deref(), &mut input, &mut out)?
        }
        Commands::Results {
            full,
            explain,
            format,
            output,
            top,
        } => {
            let options = ResultsOptions {
                full,
                explain,
                format,
                output,
                top,
            };
            commands::results::run(&ctx, &options, &mut input, &mut out)?
        }
        Commands::Checkout { email } => commands::checkout::run(&ctx, &email, &mut out)?,
        Commands::SendReport { email } => {
            commands::send_report::run(&ctx, email.as_deref(), &mut out)?
        }
        Commands::Share { copy } => commands::share::run(&ctx, copy, &mut out)?,
        Commands::Support { message } => {
            commands::support::run(&ctx, message.as_deref(), &mut input, &mut out)?
        }
        Commands::Reset => commands::reset::run(&ctx, &mut out)?,
        Commands::Init { .. } | Commands::CheckData { .. } => {}
    }

    out.flush()?;
    Ok(())
}
