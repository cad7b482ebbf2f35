//! Reading pages from files or stdin.

use std::io::Read;
use std::path::Path;

use quickcal_core::Document;
use tracing::debug;

use crate::error::ClientResult;

/// Reads HTML from `file`, or from stdin when it is `None` or `-`.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_markup(file: Option<&Path>) -> ClientResult<String> {
    let bytes = match file {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "reading page");
            std::fs::read(path)?
        }
        _ => {
            debug!("reading page from stdin");
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            bytes
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Loads the page at `url` whose markup is in `file`.
pub fn read_document(file: Option<&Path>, url: &str) -> ClientResult<Document> {
    Ok(Document::new(url, read_markup(file)?))
}
