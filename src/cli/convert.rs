use crate::core::convert::{Conversion, ConversionEngine, ConversionError, ConversionRequest};
use crate::core::rate::RateTable;
use tracing::debug;

/// Maps a typed currency to the display label the engine expects.
///
/// A bare code such as `usd` is matched case-insensitively; anything else is
/// passed through untouched so full labels keep working.
pub fn resolve_label(table: &RateTable, input: &str) -> String {
    let input = input.trim();
    match table.find_by_code(input) {
        Some(entry) => entry.display_label(),
        None => input.to_string(),
    }
}

/// Converts `amount` from `source` to `destination`, both given as codes or labels.
pub fn convert(
    table: &RateTable,
    source: &str,
    destination: &str,
    amount: &str,
) -> Result<Conversion, ConversionError> {
    let source = resolve_label(table, source);
    let destination = resolve_label(table, destination);
    debug!(%source, %destination, %amount, "Converting");

    ConversionEngine::new(table).convert(&ConversionRequest::new(&source, &destination, amount))
}
