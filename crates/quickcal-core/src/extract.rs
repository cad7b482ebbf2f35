//! Date/time extraction from page content.
//!
//! The [`DateTimeExtractor`] runs an ordered list of [`DateTimeMatcher`]
//! strategies against a [`Document`] and returns the first hit:
//!
//! 1. [`DatetimeAttributeMatcher`]: `datetime="…"` attributes, trusted as written
//! 2. [`IsoDateTimeMatcher`]: `2025-11-01T09:30` / `2025-11-01 09:30:00` / `2025-11-01`
//! 3. [`JapaneseDateMatcher`]: `2025年11月1日`, with an optional nearby `10時30分` or `10:30`
//! 4. [`SlashDateMatcher`]: `2025/11/01`, with an optional nearby clock time
//!
//! Within one matcher the first valid occurrence in document order wins.
//! Occurrences with an impossible date are skipped. A date found without a
//! time gets [`START_OF_DAY`].
//!
//! # Example
//!
//! ```
//! use quickcal_core::extract::find_datetime;
//! use quickcal_core::page::Document;
//!
//! let doc = Document::new("https://fullcast.jp/", "<p>2025年11月1日 10時</p>");
//! assert_eq!(find_datetime(&doc).as_deref(), Some("2025-11-01T10:00:00"));
//! ```

use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use tracing::debug;

use crate::page::Document;
use crate::time::{ClockZone, parse_iso_like};

/// Time of day used when a date is found without a clock time.
pub const START_OF_DAY: &str = "00:00:00";

/// A clock time within 16 non-digit characters after a date.
///
/// Captures hour, then either `時` minutes or `:` minutes.
const NEARBY_TIME: &str = r"(?:[^\d]{0,16}?(\d{1,2})(?:\s*時(?:\s*(\d{1,2})\s*分)?|:(\d{2})))?";

static ISO_TEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ](\d{1,2}):(\d{2})(?:(Z)|:(\d{2})(?:\.\d{1,9})?(Z|[+-]\d{2}:\d{2})?)?)?",
    )
    .expect("Invalid ISO text regex")
});

static JAPANESE_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(\d{{4}})\s*年\s*(\d{{1,2}})\s*月\s*(\d{{1,2}})\s*日{}",
        NEARBY_TIME
    ))
    .expect("Invalid Japanese date regex")
});

static SLASH_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(\d{{4}})/(\d{{1,2}})/(\d{{1,2}}){}", NEARBY_TIME))
        .expect("Invalid slash date regex")
});

/// A single date/time detection strategy.
pub trait DateTimeMatcher: fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the first normalized timestamp this strategy finds, if any.
    fn attempt_match(&self, document: &Document) -> Option<String>;
}

/// Matches machine-readable `datetime` attributes such as `<time datetime>`.
///
/// The first value that parses is returned trimmed but otherwise untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatetimeAttributeMatcher;

impl DateTimeMatcher for DatetimeAttributeMatcher {
    fn name(&self) -> &'static str {
        "datetime-attribute"
    }

    fn attempt_match(&self, document: &Document) -> Option<String> {
        document
            .datetime_attributes()
            .into_iter()
            .map(|value| value.trim().to_string())
            .find(|value| parse_iso_like(value, ClockZone::Utc).is_some())
    }
}

/// Matches ISO-like date-times in the page text.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsoDateTimeMatcher;

impl DateTimeMatcher for IsoDateTimeMatcher {
    fn name(&self) -> &'static str {
        "iso"
    }

    fn attempt_match(&self, document: &Document) -> Option<String> {
        let text = document.text();
        ISO_TEXT_REGEX.captures_iter(&text).find_map(|caps| {
            let date = date_from(&caps, 1)?;
            let time = match caps.get(4) {
                Some(_) => NaiveTime::from_hms_opt(
                    number(&caps, 4)?,
                    number(&caps, 5)?,
                    number(&caps, 7).unwrap_or(0),
                )?
                .format("%H:%M:%S")
                .to_string(),
                None => START_OF_DAY.to_string(),
            };
            let offset = caps.get(6).or_else(|| caps.get(8)).map_or("", |m| m.as_str());
            let normalized = format!("{}T{}{}", date.format("%Y-%m-%d"), time, offset);
            parse_iso_like(&normalized, ClockZone::Utc).map(|_| normalized)
        })
    }
}

/// Matches `YYYY年MM月DD日` dates with an optional nearby clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct JapaneseDateMatcher;

impl DateTimeMatcher for JapaneseDateMatcher {
    fn name(&self) -> &'static str {
        "japanese-date"
    }

    fn attempt_match(&self, document: &Document) -> Option<String> {
        first_date_with_nearby_time(&JAPANESE_DATE_REGEX, &document.text())
    }
}

/// Matches `YYYY/MM/DD` dates with an optional nearby clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlashDateMatcher;

impl DateTimeMatcher for SlashDateMatcher {
    fn name(&self) -> &'static str {
        "slash-date"
    }

    fn attempt_match(&self, document: &Document) -> Option<String> {
        first_date_with_nearby_time(&SLASH_DATE_REGEX, &document.text())
    }
}

/// Runs matchers in priority order and returns the first result.
///
/// The extractor is stateless: nothing is cached between calls, so a page
/// that re-renders is rescanned from scratch.
#[derive(Debug)]
pub struct DateTimeExtractor {
    matchers: Vec<Box<dyn DateTimeMatcher>>,
}

impl Default for DateTimeExtractor {
    fn default() -> Self {
        Self::with_matchers(vec![
            Box::new(DatetimeAttributeMatcher),
            Box::new(IsoDateTimeMatcher),
            Box::new(JapaneseDateMatcher),
            Box::new(SlashDateMatcher),
        ])
    }
}

impl DateTimeExtractor {
    /// Creates an extractor with the standard matcher order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with a custom matcher order.
    pub fn with_matchers(matchers: Vec<Box<dyn DateTimeMatcher>>) -> Self {
        Self { matchers }
    }

    /// Returns the matcher names in priority order.
    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Scans the document and returns the first timestamp found.
    pub fn extract(&self, document: &Document) -> Option<String> {
        for matcher in &self.matchers {
            if let Some(found) = matcher.attempt_match(document) {
                debug!(matcher = matcher.name(), value = %found, "found datetime");
                return Some(found);
            }
            debug!(matcher = matcher.name(), "no match");
        }
        debug!(url = document.url(), "no datetime on page");
        None
    }
}

/// Convenience function running the standard extractor.
///
/// See [`DateTimeExtractor::extract`] for details.
pub fn find_datetime(document: &Document) -> Option<String> {
    DateTimeExtractor::new().extract(document)
}

/// Returns the first valid date in `text`, paired with its nearby time.
///
/// An impossible nearby time (`25:00`) is dropped and the date keeps
/// [`START_OF_DAY`].
fn first_date_with_nearby_time(regex: &Regex, text: &str) -> Option<String> {
    regex.captures_iter(text).find_map(|caps| {
        let date = date_from(&caps, 1)?;
        let time = number(&caps, 4).and_then(|hour| {
            let minute = number(&caps, 5).or_else(|| number(&caps, 6)).unwrap_or(0);
            NaiveTime::from_hms_opt(hour, minute, 0)
        });
        let time = time.map_or_else(
            || START_OF_DAY.to_string(),
            |t| t.format("%H:%M:%S").to_string(),
        );
        Some(format!("{}T{}", date.format("%Y-%m-%d"), time))
    })
}

/// Builds a date from three consecutive capture groups starting at `first`.
fn date_from(caps: &Captures<'_>, first: usize) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        number(caps, first)? as i32,
        number(caps, first + 1)?,
        number(caps, first + 2)?,
    )
}

fn number(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Document {
        Document::new(
            "https://fullcast.jp/job/1",
            format!("<html><head><title>求人</title></head><body>{}</body></html>", body),
        )
    }

    mod attribute {
        use super::*;

        #[test]
        fn returns_value_as_written() {
            let doc = page(r#"<time datetime=" 2025-11-01T10:00:00+09:00 ">11/1</time>"#);
            assert_eq!(
                DatetimeAttributeMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T10:00:00+09:00")
            );
        }

        #[test]
        fn skips_unparseable_values() {
            let doc = page(
                r#"<time datetime="PT2H">2h</time><time datetime="2025-11-02">11/2</time>"#,
            );
            assert_eq!(
                DatetimeAttributeMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-02")
            );
        }

        #[test]
        fn none_without_attributes() {
            assert_eq!(DatetimeAttributeMatcher.attempt_match(&page("<p>x</p>")), None);
        }
    }

    mod iso {
        use super::*;

        #[test]
        fn pads_and_adds_seconds() {
            let doc = page("<p>開始 2025-1-5 9:05 から</p>");
            assert_eq!(
                IsoDateTimeMatcher.attempt_match(&doc).as_deref(),
                Some("2025-01-05T09:05:00")
            );
        }

        #[test]
        fn keeps_offset_after_seconds() {
            let doc = page("<p>2025-11-01T09:30:15+09:00</p>");
            assert_eq!(
                IsoDateTimeMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T09:30:15+09:00")
            );
        }

        #[test]
        fn does_not_read_a_time_range_as_offset() {
            let doc = page("<p>2025-11-01 10:00-19:00</p>");
            assert_eq!(
                IsoDateTimeMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T10:00:00")
            );
        }

        #[test]
        fn skips_impossible_dates() {
            let doc = page("<p>2025-02-30 10:00 / 2025-03-01 11:00</p>");
            assert_eq!(
                IsoDateTimeMatcher.attempt_match(&doc).as_deref(),
                Some("2025-03-01T11:00:00")
            );
        }

        #[test]
        fn keeps_utc_suffix_after_fraction() {
            let doc = page("<p>2025-11-01T09:30:15.000Z</p>");
            let found = IsoDateTimeMatcher.attempt_match(&doc);
            assert_eq!(found.as_deref(), Some("2025-11-01T09:30:15Z"));

            let zone: ClockZone = "+09:00".parse().unwrap();
            assert_eq!(
                crate::time::compact_date(&found.unwrap(), zone).as_deref(),
                Some("20251101T093015Z")
            );
        }

        #[test]
        fn keeps_utc_suffix_after_minutes() {
            let doc = page("<p>2025-11-01T09:30Z</p>");
            assert_eq!(
                IsoDateTimeMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T09:30:00Z")
            );
        }

        #[test]
        fn date_only_gets_start_of_day() {
            assert_eq!(
                IsoDateTimeMatcher.attempt_match(&page("<p>締切 2025-11-01 まで</p>")).as_deref(),
                Some("2025-11-01T00:00:00")
            );
        }
    }

    mod japanese {
        use super::*;

        #[test]
        fn date_only_gets_start_of_day() {
            let doc = page("<p>2025年11月1日</p>");
            assert_eq!(
                JapaneseDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T00:00:00")
            );
        }

        #[test]
        fn reads_kanji_clock_time() {
            let doc = page("<p>2025年11月1日（土） 10時30分 開始</p>");
            assert_eq!(
                JapaneseDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T10:30:00")
            );
        }

        #[test]
        fn reads_hour_only() {
            let doc = page("<p>2025年 3月 9日 9時～</p>");
            assert_eq!(
                JapaneseDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-03-09T09:00:00")
            );
        }

        #[test]
        fn reads_colon_clock_time() {
            let doc = page("<p>2025年11月1日 18:45</p>");
            assert_eq!(
                JapaneseDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T18:45:00")
            );
        }

        #[test]
        fn ignores_distant_times() {
            let doc = page("<p>2025年11月1日 に開催される説明会の詳細は後日お知らせします 10:00</p>");
            assert_eq!(
                JapaneseDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T00:00:00")
            );
        }

        #[test]
        fn impossible_time_falls_back_to_start_of_day() {
            let doc = page("<p>2025年11月1日 25時</p>");
            assert_eq!(
                JapaneseDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T00:00:00")
            );
        }

        #[test]
        fn skips_impossible_dates() {
            let doc = page("<p>2025年2月30日 と 2025年3月2日</p>");
            assert_eq!(
                JapaneseDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-03-02T00:00:00")
            );
        }
    }

    mod slash {
        use super::*;

        #[test]
        fn reads_nearby_time() {
            let doc = page("<p>勤務日 2025/11/01 (土) 9:00～18:00</p>");
            assert_eq!(
                SlashDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T09:00:00")
            );
        }

        #[test]
        fn date_only_gets_start_of_day() {
            let doc = page("<p>2025/11/1</p>");
            assert_eq!(
                SlashDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T00:00:00")
            );
        }

        #[test]
        fn next_date_is_not_read_as_time() {
            let doc = page("<p>2025/11/01、2025/11/02</p>");
            assert_eq!(
                SlashDateMatcher.attempt_match(&doc).as_deref(),
                Some("2025-11-01T00:00:00")
            );
        }
    }

    mod extractor {
        use super::*;

        #[test]
        fn standard_priority_order() {
            assert_eq!(
                DateTimeExtractor::new().matcher_names(),
                ["datetime-attribute", "iso", "japanese-date", "slash-date"]
            );
        }

        #[test]
        fn attribute_beats_text() {
            let doc = page(
                r#"<p>2025-10-01 08:00</p><time datetime="2025-11-01T10:00:00">11月1日</time>"#,
            );
            assert_eq!(find_datetime(&doc).as_deref(), Some("2025-11-01T10:00:00"));
        }

        #[test]
        fn pattern_priority_beats_document_order() {
            let doc = page("<p>2025/10/01 08:00</p><p>2025年10月2日</p><p>2025-10-03 09:00</p>");
            assert_eq!(find_datetime(&doc).as_deref(), Some("2025-10-03T09:00:00"));
        }

        #[test]
        fn japanese_beats_slash() {
            let doc = page("<p>2025/10/01 08:00</p><p>2025年10月2日</p>");
            assert_eq!(find_datetime(&doc).as_deref(), Some("2025-10-02T00:00:00"));
        }

        #[test]
        fn malformed_matches_fall_through() {
            let doc = page(r#"<time datetime="soon">x</time><p>2025年13月1日 2025/11/05</p>"#);
            assert_eq!(find_datetime(&doc).as_deref(), Some("2025-11-05T00:00:00"));
        }

        #[test]
        fn no_match_is_none() {
            let doc = page("<p>お仕事情報 時給1200円 13:00から</p>");
            assert_eq!(find_datetime(&doc), None);
        }

        #[test]
        fn custom_order_is_respected() {
            let extractor = DateTimeExtractor::with_matchers(vec![
                Box::new(SlashDateMatcher),
                Box::new(IsoDateTimeMatcher),
            ]);
            let doc = page("<p>2025-10-03 09:00 2025/10/01</p>");
            assert_eq!(extractor.extract(&doc).as_deref(), Some("2025-10-01T00:00:00"));
        }

        #[test]
        fn rescans_on_every_call() {
            let extractor = DateTimeExtractor::new();
            let before = page("<p>読み込み中</p>");
            let after = page("<p>2025/11/01 10:00</p>");
            assert_eq!(extractor.extract(&before), None);
            assert_eq!(
                extractor.extract(&after).as_deref(),
                Some("2025-11-01T10:00:00")
            );
        }
    }
}
