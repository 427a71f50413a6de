use colored::Colorize;
use page_loader::{command_argument_builder, handle_load, init_logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = command_argument_builder().get_matches();

    if let Err(e) = init_logging(matches.get_count("verbose")) {
        eprintln!("{} {}", "⚠".yellow().bold(), e);
    }

    match handle_load(&matches).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
