//! Send one JSON command to a running watchman server over BSER and print
//! the response as JSON.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example watchman_query --features watchman -- \
//!     --command '["query", "/path/to/project", {"expression": ["type", "f"], "fields": ["name"]}]'
//! ```

use std::process::ExitCode;

use bser::client::Client;
use bser::Value;
use clap::{Arg, ArgAction, Command};
use tracing::{error, info};

fn main() -> ExitCode {
    let matches = Command::new("watchman-query")
        .about("send a command to watchman using the BSER protocol")
        .arg(
            Arg::new("watchman")
                .long("watchman")
                .default_value("watchman")
                .help("watchman binary used to locate the socket"),
        )
        .arg(
            Arg::new("command")
                .long("command")
                .default_value(r#"["watch-list"]"#)
                .help("command to send, as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    // Create logger
    let level = if matches.get_flag("verbose") {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let watchman = matches
        .get_one::<String>("watchman")
        .expect("watchman has a default");
    let command = matches
        .get_one::<String>("command")
        .expect("command has a default");

    let command: serde_json::Value = match serde_json::from_str(command) {
        Ok(json) => json,
        Err(err) => {
            error!(?err, "command is not valid JSON");
            return ExitCode::FAILURE;
        }
    };
    let command = match Value::try_from(&command) {
        Ok(value) => value,
        Err(err) => {
            error!(?err, "command cannot be encoded");
            return ExitCode::FAILURE;
        }
    };

    let mut client = match Client::discover(watchman) {
        Ok(client) => client,
        Err(err) => {
            error!(%err, "failed to connect");
            return ExitCode::FAILURE;
        }
    };
    info!("connected");

    match client.command(&command) {
        Ok(response) => {
            let json = serde_json::Value::from(&response);
            match serde_json::to_string_pretty(&json) {
                Ok(text) => println!("{}", text),
                Err(err) => {
                    error!(?err, "failed to format response");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "command failed");
            ExitCode::FAILURE
        }
    }
}
