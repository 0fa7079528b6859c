use std::process::ExitCode;

use clap::Parser;
use lazycron_cli::{load_config, Args, Handler};
use lazycron_console::HttpGateway;
use log::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    pretty_env_logger::init();
    let Args {
        config,
        server,
        command,
    } = Args::parse();
    let config = match load_config(config.as_deref(), server.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("Config error: {}", err);
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let handler = Handler::new(HttpGateway::new(&config), config.log_page);
    match handler.handle(command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
