/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod info;

use std::io::Write;

use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::tags::{TagError, TagService};

/// Dispatch a parsed `Command` to its handler, writing results to `out`.
///
/// `connect` is called only once the command's arguments are valid.
///
/// # Errors
///
/// Returns `TagError` on any command failure.
pub fn dispatch<S, F, W>(
    command: &Command,
    connect: F,
    ctx: &OutputCtx,
    out: &mut W,
) -> Result<(), TagError>
where
    S: TagService,
    F: FnOnce() -> Result<S, TagError>,
    W: Write,
{
    match command {
        Command::Info(args) => info::run(args, connect, ctx, out),
    }
}
