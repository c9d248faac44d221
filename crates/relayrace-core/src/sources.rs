//! Loading relay candidates from configuration sources.
//!
//! Candidate acquisition is deliberately forgiving: an unreadable file or a
//! malformed line degrades the pool instead of failing startup. An empty
//! pool is non-fatal; the health monitor simply has nothing to probe and
//! races fail with `NoHealthyRelays` until a refresh supplies addresses.

use std::path::Path;

use crate::relay::RelayAddress;

/// Parse a sequence of candidate lines into relay addresses.
///
/// Blank lines and `#` comments are skipped; unparsable lines are logged at
/// debug and dropped.
pub fn parse_address_list<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<RelayAddress> {
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match RelayAddress::parse(line) {
            Ok(address) => Some(address),
            Err(err) => {
                tracing::debug!(line, error = %err, "skipping unparsable relay candidate");
                None
            }
        })
        .collect()
}

/// Load relay candidates from a file with one proxy URL per line.
///
/// Returns an empty list (with a warning) if the file cannot be read.
pub fn load_address_file(path: &Path) -> Vec<RelayAddress> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "failed to read relay list, continuing with empty pool"
            );
            return Vec::new();
        }
    };

    let addresses = parse_address_list(contents.lines());
    tracing::info!(
        path = %path.display(),
        count = addresses.len(),
        "relay candidates loaded from file"
    );
    addresses
}
