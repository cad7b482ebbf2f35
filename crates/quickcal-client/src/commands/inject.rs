//! `quickcal inject`: write the page back with the overlay in place.

use quickcal_core::Overlay;
use tracing::info;

use crate::cli::InjectArgs;
use crate::error::ClientResult;
use crate::input::read_document;

/// Runs the command.
pub fn run(args: &InjectArgs) -> ClientResult<()> {
    let mut document = read_document(args.page.file.as_deref(), &args.page.url)?;
    let report = Overlay::default().activate(&mut document)?;
    if report.is_noop() {
        info!(url = document.url(), "overlay already present");
    }

    let markup = document.into_markup();
    match args.output {
        Some(ref path) => std::fs::write(path, markup)?,
        None => print!("{}", markup),
    }
    Ok(())
}
