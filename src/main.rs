use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;

use pmdgate::cli::{Args, RootCommand};

fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match RootCommand::execute(&args) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::from(2)
        }
    }
}
