//! Side normalization: direction words (English and Spanish) to LONG/SHORT.

use crate::lexicon::{SynonymTable, DEFAULT_SIDES};
use intent_core::Side;

/// Side used when the text matches no synonym, including empty text.
pub const DEFAULT_SIDE: Side = Side::Long;

/// Normalize against the built-in bilingual table. Total: unknown text is LONG.
pub fn normalize_side(text: &str) -> Side {
    normalize_side_with(&*DEFAULT_SIDES, text)
}

/// Normalize against `table`, falling back to [`DEFAULT_SIDE`].
pub fn normalize_side_with<T>(table: &T, text: &str) -> Side
where
    T: SynonymTable<Side> + ?Sized,
{
    table
        .lookup(&text.trim().to_lowercase())
        .unwrap_or(DEFAULT_SIDE)
}
