use clap::{Parser, Subcommand};

use commands::{GlobalArgs, PlanArgs};

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw(RawOutputMode),
}

#[derive(Debug, Clone, Copy)]
enum RawOutputMode {
    Text,
}

mod commands;
mod output;
mod tty;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "doc-rewriter")]
#[command(version = VERSION)]
#[command(about = "Rewrite documentation in place with an ordered list of literal replacements")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    plan: PlanArgs,

    /// Print a JSON envelope instead of text lines
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every rule to every target, in order (default)
    Migrate,
    /// Show the effective rules and targets without touching any file
    Rules,
}

fn response_mode(command: &Commands, json: bool) -> ResponseMode {
    match command {
        Commands::Migrate if !json => ResponseMode::Raw(RawOutputMode::Text),
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Migrate);
    let mode = response_mode(&command, cli.json);
    let global = GlobalArgs { plan: cli.plan };

    if let ResponseMode::Raw(RawOutputMode::Text) = mode {
        return match commands::run_text(command, &global) {
            Ok(exit_code) => std::process::ExitCode::from(exit_code_to_u8(exit_code)),
            Err(err) => {
                output::print_error_text(&err);
                let exit_code = output::exit_code_for_error(err.code);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        };
    }

    let (json_result, exit_code) = commands::run_json(command, &global);

    if let Err(err) = output::print_json_result(json_result) {
        output::print_error_text(&err);
        return std::process::ExitCode::from(exit_code_to_u8(1));
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
