//! Multi-level take profit parsing.
//!
//! Input is a comma-separated list of `price:percentage` tokens, e.g.
//! `"3000:30,3100:70"`. Malformed tokens are dropped without affecting the
//! rest. Percentage totals are checked by the validator, not here.

use intent_core::TpLevel;

/// Parse a decimal number, rejecting NaN and infinities.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse one `price:percentage` token.
fn parse_level(token: &str) -> Option<TpLevel> {
    let (price, percentage) = token.trim().split_once(':')?;
    Some(TpLevel::new(parse_number(price)?, parse_number(percentage)?))
}

/// Parse a level list, keeping valid tokens in their original order.
pub fn parse_tp_levels(text: &str) -> Vec<TpLevel> {
    text.split(',').filter_map(parse_level).collect()
}
