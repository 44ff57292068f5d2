//! Symbol normalization: free-text asset names to canonical pairs.

use crate::lexicon::{SynonymTable, DEFAULT_SYMBOLS};

/// Quote asset used by [`normalize_symbol`].
pub const DEFAULT_QUOTE: &str = "USDT";

/// Normalize against the built-in table, quoting unknown symbols in USDT.
///
/// `"bitcoin"` and `" btc "` become `"BTC-USDT"`, `"XYZ"` becomes
/// `"XYZ-USDT"`, and `"btc-usdt"` is left as `"BTC-USDT"`.
pub fn normalize_symbol(text: &str) -> String {
    normalize_symbol_with(&*DEFAULT_SYMBOLS, DEFAULT_QUOTE, text)
}

/// Normalize against `table`, appending `-{quote}` to symbols it does not know.
///
/// Never fails. The suffix is not appended twice when the input already
/// ends with it in any case.
pub fn normalize_symbol_with<T>(table: &T, quote: &str, text: &str) -> String
where
    T: SynonymTable<String> + ?Sized,
{
    let trimmed = text.trim();
    if let Some(pair) = table.lookup(&trimmed.to_lowercase()) {
        return pair;
    }

    let symbol = trimmed.to_uppercase();
    let suffix = format!("-{}", quote.to_uppercase());
    if symbol.ends_with(&suffix) {
        symbol
    } else {
        symbol + &suffix
    }
}
