#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! tagctl — look up tag metadata on a vCenter tagging service.

mod cli;
mod commands;
mod rest;
mod tags;
mod types;

use std::cell::OnceCell;
use std::time::Duration;

use clap::{CommandFactory, Parser};

use cli::{Cli, ConnectionArgs, OutputCtx, write_error};
use rest::{ClientConfig, RestClient, RestError};
use tags::TagError;
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    let ctx = OutputCtx::new(cli.output, cli.json, cli.no_header, cli.debug);

    match run(&cli, &ctx) {
        Ok(()) => {}
        Err(err) => {
            let usage = matches!(err, TagError::Usage { .. }).then(info_usage);
            let error_output = ErrorOutput::from_tag_error(&err, usage);
            write_error(&error_output, &ctx);
            std::process::exit(err.exit_code());
        }
    }
}

/// Run the selected command against stdout.
///
/// The client is built only after the command's arguments check out, and is
/// owned here: it is dropped (and its session closed) before this returns.
fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), TagError> {
    let client = OnceCell::new();
    let connect = || {
        let config = client_config(&cli.connection)?;
        let built = RestClient::new(&config)?;
        Ok::<_, TagError>(client.get_or_init(|| built))
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(&cli.command, connect, ctx, &mut out)
}

fn client_config(args: &ConnectionArgs) -> Result<ClientConfig, RestError> {
    let url = args.url.as_deref().ok_or(RestError::MissingUrl)?;
    ClientConfig::from_url(
        url,
        args.username.as_deref(),
        args.password.as_deref(),
        args.insecure,
        Duration::from_secs(args.timeout),
    )
}

/// Usage text for `tagctl info`, shown alongside usage errors.
fn info_usage() -> String {
    let mut command = Cli::command();
    command
        .find_subcommand_mut("info")
        .map(|info| info.render_usage().to_string())
        .unwrap_or_default()
}
