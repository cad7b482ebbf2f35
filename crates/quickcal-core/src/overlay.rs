//! The floating calendar button and its click flow.
//!
//! [`Overlay::activate`] injects a stylesheet and a fixed-position button into
//! a page on the activation site. Injection is idempotent twice over: the
//! overlay remembers that it already ran, and [`inject`] never adds an element
//! whose id is already present in the document.
//!
//! [`Overlay::click`] is what the button does: it gathers the page title and
//! address, looks for a date on the page, and builds the calendar deep link.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{PageError, PageResult};
use crate::event::EventDraft;
use crate::extract::DateTimeExtractor;
use crate::links::CalendarLinkBuilder;
use crate::page::Document;
use crate::time::ClockZone;

/// Id of the injected button.
pub const BUTTON_ID: &str = "fc-gcal-btn";

/// Id of the injected stylesheet.
pub const STYLE_ID: &str = "fc-gcal-style";

/// Visible button label.
pub const BUTTON_LABEL: &str = "📅 カレンダー";

/// Tooltip and accessible name of the button.
pub const BUTTON_TOOLTIP: &str = "Google カレンダーに追加";

static HEAD_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head\s*>").expect("Invalid head regex"));

static BODY_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</body\s*>").expect("Invalid body regex"));

/// Returns the markup of the button.
pub fn button_html() -> String {
    format!(
        r#"<button id="{id}" title="{tip}" aria-label="{tip}">{label}</button>"#,
        id = BUTTON_ID,
        tip = BUTTON_TOOLTIP,
        label = BUTTON_LABEL,
    )
}

/// Returns the `<style>` element positioning the button bottom-right.
pub fn style_html() -> String {
    format!(
        r#"<style id="{style}">
#{id} {{
    position: fixed;
    right: 18px;
    bottom: 18px;
    z-index: 999999;
    background: #4285F4;
    color: white;
    border: none;
    border-radius: 8px;
    padding: 10px 12px;
    font-size: 14px;
    box-shadow: 0 6px 18px rgba(66,133,244,0.3);
    cursor: pointer;
    transition: transform .12s ease, box-shadow .12s ease;
    backdrop-filter: blur(4px);
}}
#{id}:hover {{ transform: translateY(-2px); box-shadow: 0 10px 24px rgba(66,133,244,0.35); }}
#{id}:active {{ transform: translateY(0); }}
</style>"#,
        style = STYLE_ID,
        id = BUTTON_ID,
    )
}

/// What an injection pass added to the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectReport {
    /// The stylesheet was inserted before `</head>`.
    pub style_added: bool,
    /// The button was inserted before `</body>`.
    pub button_added: bool,
}

impl InjectReport {
    /// Returns `true` if nothing was inserted.
    pub fn is_noop(&self) -> bool {
        !self.style_added && !self.button_added
    }
}

/// Inserts the stylesheet and button unless they are already present.
///
/// Both insertion points are checked before anything is written, so a
/// document missing `</head>` or `</body>` is left untouched.
pub fn inject(document: &mut Document) -> PageResult<InjectReport> {
    let need_style = !document.has_element_id(STYLE_ID);
    let need_button = !document.has_element_id(BUTTON_ID);

    let head_at = if need_style {
        let found = HEAD_CLOSE_REGEX.find(document.markup());
        Some(found.ok_or_else(|| PageError::not_ready("</head>"))?.start())
    } else {
        None
    };
    let body_at = if need_button {
        let found = BODY_CLOSE_REGEX.find_iter(document.markup()).last();
        Some(found.ok_or_else(|| PageError::not_ready("</body>"))?.start())
    } else {
        None
    };

    let mut inserts: Vec<(usize, String)> = Vec::with_capacity(2);
    if let Some(at) = head_at {
        inserts.push((at, style_html()));
    }
    if let Some(at) = body_at {
        inserts.push((at, button_html()));
    }
    // Insert back to front so earlier offsets stay valid.
    inserts.sort_by(|a, b| b.0.cmp(&a.0));

    let markup = document.markup_mut();
    for (at, html) in inserts {
        markup.insert_str(at, &html);
    }

    Ok(InjectReport {
        style_added: head_at.is_some(),
        button_added: body_at.is_some(),
    })
}

/// The injected UI plus everything its click needs.
#[derive(Debug, Default)]
pub struct Overlay {
    initialized: bool,
    extractor: DateTimeExtractor,
    links: CalendarLinkBuilder,
}

impl Overlay {
    /// Creates an overlay reading offset-less timestamps in `zone`.
    pub fn new(zone: ClockZone) -> Self {
        Self {
            initialized: false,
            extractor: DateTimeExtractor::new(),
            links: CalendarLinkBuilder::with_zone(zone),
        }
    }

    /// Returns `true` once [`Overlay::activate`] has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Injects the overlay into a page on the activation site.
    ///
    /// Subsequent calls are no-ops and return an empty report.
    pub fn activate(&mut self, document: &mut Document) -> PageResult<InjectReport> {
        ensure_on_site(document)?;
        if self.initialized {
            debug!(url = document.url(), "overlay already active");
            return Ok(InjectReport::default());
        }

        let report = inject(document)?;
        self.initialized = true;
        debug!(
            url = document.url(),
            style_added = report.style_added,
            button_added = report.button_added,
            "overlay activated"
        );
        Ok(report)
    }

    /// Builds the event draft for the current state of the page.
    ///
    /// The title becomes the event title, the address becomes the details,
    /// and the first date found on the page becomes the start.
    pub fn draft_for(&self, document: &Document) -> EventDraft {
        EventDraft::new(document.title(), document.url())
            .with_optional_start(self.extractor.extract(document))
    }

    /// Runs the button's click flow and returns the calendar deep link.
    pub fn click(&self, document: &Document) -> PageResult<String> {
        self.click_with(document, |draft| draft).map(|(_, link)| link)
    }

    /// Runs the click flow, letting `edit` adjust the draft before encoding.
    ///
    /// Returns the final draft together with its link.
    pub fn click_with<F>(&self, document: &Document, edit: F) -> PageResult<(EventDraft, String)>
    where
        F: FnOnce(EventDraft) -> EventDraft,
    {
        ensure_on_site(document)?;
        let draft = edit(self.draft_for(document));
        let link = self.links.build(&draft);
        info!(url = document.url(), has_start = draft.has_start(), "built calendar link");
        Ok((draft, link))
    }
}

fn ensure_on_site(document: &Document) -> PageResult<()> {
    if document.is_on_site() {
        Ok(())
    } else {
        Err(PageError::outside_site(document.url()))
    }
}
