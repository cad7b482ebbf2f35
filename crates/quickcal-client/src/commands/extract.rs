//! `quickcal extract`: show which date the button would use.

use quickcal_core::{ClockZone, DateTimeExtractor, Document, compact_date};

use crate::cli::ExtractArgs;
use crate::error::ClientResult;
use crate::input::read_markup;

/// Printed when the page has no recognizable date.
pub const NOT_FOUND: &str = "no date found";

/// Returns the date found in `document`, optionally in calendar form.
pub fn find(document: &Document, zone: ClockZone, compact: bool) -> Option<String> {
    let found = DateTimeExtractor::new().extract(document)?;
    if compact {
        compact_date(&found, zone)
    } else {
        Some(found)
    }
}

/// Runs the command.
pub fn run(args: &ExtractArgs, zone: ClockZone) -> ClientResult<()> {
    let document = Document::new("", read_markup(args.file.as_deref())?);
    match find(&document, zone, args.compact) {
        Some(value) => println!("{}", value),
        None => println!("{}", NOT_FOUND),
    }
    Ok(())
}
