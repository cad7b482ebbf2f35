//! `quickcal link`: the button's click flow from the command line.

use quickcal_core::{ClockZone, Document, EventDraft, Overlay};
use serde::Serialize;

use crate::actions;
use crate::cli::LinkArgs;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::input::read_document;

/// The event draft together with the link built from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkOutput {
    pub event: EventDraft,
    pub url: String,
}

/// Builds the calendar link for `document`.
///
/// `location` and `end` are applied on top of what the page provides.
pub fn build(
    document: &Document,
    zone: ClockZone,
    location: Option<&str>,
    end: Option<&str>,
) -> ClientResult<LinkOutput> {
    let overlay = Overlay::new(zone);
    let (event, url) = overlay.click_with(document, |mut draft| {
        if let Some(location) = location {
            draft = draft.with_location(location);
        }
        if let Some(end) = end {
            draft = draft.with_end(end);
        }
        draft
    })?;
    Ok(LinkOutput { event, url })
}

/// Runs the command: prints the link, then opens or copies it if asked.
pub fn run(args: &LinkArgs, config: &ClientConfig, zone: ClockZone) -> ClientResult<()> {
    let document = read_document(args.page.file.as_deref(), &args.page.url)?;
    let output = build(
        &document,
        zone,
        args.location.as_deref(),
        args.end.as_deref(),
    )?;

    if args.json || config.output.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        println!("{}", json);
    } else {
        println!("{}", output.url);
    }

    if args.copy || config.output.copy {
        actions::copy_link(&output.url)?;
    }
    if args.open || config.output.open {
        actions::open_link(&output.url)?;
    }

    Ok(())
}
