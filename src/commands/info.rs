/// `info` command: look up tags by ID, or by name within a category.
use std::io::Write;

use crate::cli::OutputCtx;
use crate::cli::args::InfoArgs;
use crate::cli::output::write_tags;
use crate::tags::{LookupRequest, TagError, TagService, fetch};

/// Run `tagctl info`.
///
/// The argument count is checked before `connect` is called, so a usage
/// error wins over any connection or config problem. Nothing is written
/// unless the lookup succeeds. A name lookup with no match prints nothing and
/// succeeds.
///
/// # Errors
///
/// Returns `TagError::Usage` on a wrong argument count, the connection or
/// service error unchanged if the lookup fails, or `TagError::Output` if
/// writing fails.
pub fn run<S, F, W>(args: &InfoArgs, connect: F, ctx: &OutputCtx, out: &mut W) -> Result<(), TagError>
where
    S: TagService,
    F: FnOnce() -> Result<S, TagError>,
    W: Write,
{
    let request = LookupRequest::from_args(args.by_id, &args.args)?;
    let service = connect()?;

    let tags = {
        let _timer = ctx.timer("fetch");
        fetch(&service, &request)?
    };

    let _timer = ctx.timer("render");
    write_tags(&tags, ctx, out)
}
