// src/validate.rs
//! Structural check on the generation fragment. The prompt contract asks for
//! a fixed section skeleton; this pass verifies the required markers arrived
//! in order before the fragment is embedded in the artifact. Content is still
//! untrusted and unchecked beyond structure.

use anyhow::{bail, Result};

use crate::prompt::{
    MIN_TOP_TICKERS, SECTION_MACRO, SECTION_MINOR_TICKERS, SECTION_THEMES, SECTION_TOP_TICKERS,
};

/// Required markers in declaration order. The lower-coverage section is
/// optional and not listed here.
const REQUIRED_SECTIONS: [&str; 3] = [SECTION_MACRO, SECTION_TOP_TICKERS, SECTION_THEMES];

/// Fail if a required section marker is missing or out of order, or if the
/// top-tickers section carries fewer than the minimum ticker entries.
pub fn validate_fragment(fragment: &str) -> Result<()> {
    let mut cursor = 0usize;
    for marker in REQUIRED_SECTIONS {
        match fragment[cursor..].find(marker) {
            Some(i) => cursor += i + marker.len(),
            None => {
                if fragment.contains(marker) {
                    bail!("fragment section out of order: {marker}");
                }
                bail!("fragment missing required section: {marker}");
            }
        }
    }

    let tickers = ticker_entry_count(fragment);
    if tickers < MIN_TOP_TICKERS {
        bail!(
            "top-tickers section has {tickers} entries, contract requires at least {MIN_TOP_TICKERS}"
        );
    }
    Ok(())
}

/// Count <h3> entries between the top-tickers header and the next section.
fn ticker_entry_count(fragment: &str) -> usize {
    let Some(start) = fragment.find(SECTION_TOP_TICKERS) else {
        return 0;
    };
    let body = &fragment[start + SECTION_TOP_TICKERS.len()..];
    let end = [SECTION_MINOR_TICKERS, SECTION_THEMES]
        .iter()
        .filter_map(|m| body.find(m))
        .min()
        .unwrap_or(body.len());
    body[..end].matches("<h3>").count()
}
