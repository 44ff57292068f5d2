//! Builds a [`NormalizedCommand`] from a provider classification result.
//!
//! Only the first candidate of each list is used; providers order them by
//! confidence. Unparseable values leave the field absent, so the validator
//! reports them as missing where they are required.

use crate::intent_map::map_intent_with;
use crate::lexicon::Lexicon;
use crate::side::normalize_side_with;
use crate::symbol::normalize_symbol_with;
use crate::tp_levels::{parse_number, parse_tp_levels};
use chrono::{DateTime, Utc};
use intent_core::{ClassificationResult, NormalizedCommand, NormalizerConfig, Result};
use tracing::debug;

/// Entity categories per field. Earlier names take precedence.
const SYMBOL: &[&str] = &["symbol", "symbol:symbol"];
const SIDE: &[&str] = &["side", "side:side"];
const ENTRY_PRICE: &[&str] = &["entry_price", "price:entry"];
const STOP_LOSS: &[&str] = &["stop_loss", "price:stop_loss"];
const TAKE_PROFIT: &[&str] = &["take_profit", "price:take_profit"];
const RISK: &[&str] = &["risk"];
const TRIGGER_PRICE: &[&str] = &["trigger_price"];
const CALLBACK_RATE: &[&str] = &["callback_rate"];
const DISTANCE: &[&str] = &["distance"];
const RR_RATIO: &[&str] = &["rr_ratio"];
const LEVELS: &[&str] = &["levels"];

/// First entity value found under any of `categories`.
fn first_value<'a>(result: &'a ClassificationResult, categories: &[&str]) -> Option<&'a str> {
    categories
        .iter()
        .find_map(|category| result.top_entity(category))
        .map(|entity| entity.value.as_str())
}

/// Classification result to normalized command transformer.
#[derive(Debug, Clone, Default)]
pub struct CommandTransformer {
    lexicon: Lexicon,
}

impl CommandTransformer {
    /// Create a transformer over the given tables.
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Create a transformer from normalization settings.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        Ok(Self::new(Lexicon::from_config(config)?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Transform, stamping the command with the current time.
    pub fn transform(&self, result: &ClassificationResult, raw_input: &str) -> NormalizedCommand {
        self.transform_at(result, raw_input, Utc::now())
    }

    /// Transform with an explicit timestamp.
    pub fn transform_at(
        &self,
        result: &ClassificationResult,
        raw_input: &str,
        timestamp: DateTime<Utc>,
    ) -> NormalizedCommand {
        let mut cmd = NormalizedCommand::new(raw_input, timestamp);

        if let Some(top) = result.top_intent() {
            cmd.intent = map_intent_with(&*self.lexicon.intents, &top.label);
            cmd.confidence = top.confidence;
        }

        if let Some(symbol) = first_value(result, SYMBOL) {
            cmd.symbol =
                normalize_symbol_with(&*self.lexicon.symbols, &self.lexicon.quote_asset, symbol);
        }
        if let Some(side) = first_value(result, SIDE) {
            cmd.side = Some(normalize_side_with(&*self.lexicon.sides, side));
        }

        cmd.entry_price = number(result, "entry_price", ENTRY_PRICE);
        cmd.stop_loss = number(result, "stop_loss", STOP_LOSS);
        cmd.take_profit = number(result, "take_profit", TAKE_PROFIT);
        cmd.risk_percent = number(result, "risk_percent", RISK);
        cmd.trigger_price = number(result, "trigger_price", TRIGGER_PRICE);
        cmd.callback_rate = number(result, "callback_rate", CALLBACK_RATE);
        cmd.distance = number(result, "distance", DISTANCE);
        cmd.rr_ratio = number(result, "rr_ratio", RR_RATIO);

        if let Some(levels) = first_value(result, LEVELS) {
            cmd.tp_levels = parse_tp_levels(levels);
        }

        debug!(
            intent = %cmd.intent,
            confidence = cmd.confidence,
            symbol = %cmd.symbol,
            tp_levels = cmd.tp_levels.len(),
            "Transformed classification result"
        );

        cmd
    }
}

/// Numeric field value. A present but unparseable value is dropped.
fn number(result: &ClassificationResult, field: &str, categories: &[&str]) -> Option<f64> {
    let value = first_value(result, categories)?;
    let parsed = parse_number(value);
    if parsed.is_none() {
        debug!(field, value, "Dropping unparseable numeric entity");
    }
    parsed
}

/// Transform with the built-in tables.
pub fn transform(result: &ClassificationResult, raw_input: &str) -> NormalizedCommand {
    CommandTransformer::default().transform(result, raw_input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intent_core::{Intent, Side, TpLevel};

    fn open_position_result() -> ClassificationResult {
        ClassificationResult::default()
            .with_intent("open_position", 0.95)
            .with_entity("symbol", "btc")
            .with_entity("side", "long")
            .with_entity("entry_price", "45000")
            .with_entity("stop_loss", "44500")
            .with_entity("risk", "2")
    }

    #[test]
    fn test_open_position() {
        let raw = "open long BTC at 45000 with stop loss 44500 and risk 2%";
        let cmd = transform(&open_position_result(), raw);

        assert_eq!(cmd.intent, Intent::OpenPosition);
        assert_eq!(cmd.confidence, 0.95);
        assert_eq!(cmd.symbol, "BTC-USDT");
        assert_eq!(cmd.side, Some(Side::Long));
        assert_eq!(cmd.entry_price, Some(45000.0));
        assert_eq!(cmd.stop_loss, Some(44500.0));
        assert_eq!(cmd.risk_percent, Some(2.0));
        assert_eq!(cmd.raw_input, raw);
        assert!(cmd.tp_levels.is_empty());
    }

    #[test]
    fn test_close_position() {
        let result = ClassificationResult::default()
            .with_intent("close_position", 0.92)
            .with_entity("symbol", "ethereum");
        let cmd = transform(&result, "close ETH");
        assert_eq!(cmd.intent, Intent::ClosePosition);
        assert_eq!(cmd.symbol, "ETH-USDT");
        assert_eq!(cmd.side, None);
    }

    #[test]
    fn test_trailing_stop() {
        let result = ClassificationResult::default()
            .with_intent("trailing_stop", 0.88)
            .with_entity("symbol", "BTC")
            .with_entity("trigger_price", "46000")
            .with_entity("callback_rate", "1");
        let cmd = transform(&result, "trail BTC");
        assert_eq!(cmd.intent, Intent::TrailingStop);
        assert_eq!(cmd.trigger_price, Some(46000.0));
        assert_eq!(cmd.callback_rate, Some(1.0));
        assert_eq!(cmd.distance, None);
    }

    #[test]
    fn test_unknown_intent_label() {
        let result = ClassificationResult::default().with_intent("invalid_intent", 0.3);
        let cmd = transform(&result, "???");
        assert_eq!(cmd.intent, Intent::Unknown);
        assert_eq!(cmd.confidence, 0.3);
    }

    #[test]
    fn test_no_intent_candidates() {
        let cmd = transform(&ClassificationResult::default(), "hello");
        assert_eq!(cmd.intent, Intent::Unknown);
        assert_eq!(cmd.confidence, 0.0);
        assert_eq!(cmd.symbol, "");
    }

    #[test]
    fn test_first_candidate_wins() {
        let result = open_position_result()
            .with_intent("close_position", 0.99)
            .with_entity("symbol", "eth");
        let cmd = transform(&result, "x");
        assert_eq!(cmd.intent, Intent::OpenPosition);
        assert_eq!(cmd.symbol, "BTC-USDT");
    }

    #[test]
    fn test_multiple_tp_levels() {
        let result = open_position_result().with_entity("levels", "46000:50,47000:50");
        let cmd = transform(&result, "x");
        assert_eq!(
            cmd.tp_levels,
            vec![TpLevel::new(46000.0, 50.0), TpLevel::new(47000.0, 50.0)]
        );
    }

    #[test]
    fn test_all_entities_spanish_side() {
        let result = ClassificationResult::default()
            .with_intent("open_position", 0.9)
            .with_entity("symbol", "ethereum")
            .with_entity("side", "vender")
            .with_entity("entry_price", "3000.50")
            .with_entity("stop_loss", "3100.00")
            .with_entity("take_profit", "2850.75")
            .with_entity("risk", "1.5")
            .with_entity("trigger_price", "3050")
            .with_entity("distance", "25")
            .with_entity("rr_ratio", "2");
        let cmd = transform(&result, "vender ETH");

        assert_eq!(cmd.symbol, "ETH-USDT");
        assert_eq!(cmd.side, Some(Side::Short));
        approx::assert_relative_eq!(cmd.entry_price.unwrap(), 3000.5);
        approx::assert_relative_eq!(cmd.stop_loss.unwrap(), 3100.0);
        approx::assert_relative_eq!(cmd.take_profit.unwrap(), 2850.75);
        approx::assert_relative_eq!(cmd.risk_percent.unwrap(), 1.5);
        approx::assert_relative_eq!(cmd.trigger_price.unwrap(), 3050.0);
        assert_eq!(cmd.distance, Some(25.0));
        assert_eq!(cmd.rr_ratio, Some(2.0));
    }

    #[test]
    fn test_role_qualified_categories() {
        let result = ClassificationResult::default()
            .with_intent("open_position", 0.9)
            .with_entity("price:entry", "45000")
            .with_entity("price:stop_loss", "44000")
            .with_entity("price:take_profit", "47000")
            .with_entity("side:side", "short");
        let cmd = transform(&result, "x");
        assert_eq!(cmd.entry_price, Some(45000.0));
        assert_eq!(cmd.stop_loss, Some(44000.0));
        assert_eq!(cmd.take_profit, Some(47000.0));
        assert_eq!(cmd.side, Some(Side::Short));
    }

    #[test]
    fn test_canonical_category_precedes_alias() {
        let result = ClassificationResult::default()
            .with_entity("price:entry", "1")
            .with_entity("entry_price", "2");
        assert_eq!(transform(&result, "x").entry_price, Some(2.0));
    }

    #[test]
    fn test_unparseable_numbers_left_absent() {
        let result = ClassificationResult::default()
            .with_intent("open_position", 0.9)
            .with_entity("entry_price", "forty-five thousand")
            .with_entity("stop_loss", "")
            .with_entity("risk", "0");
        let cmd = transform(&result, "x");
        assert_eq!(cmd.entry_price, None);
        assert_eq!(cmd.stop_loss, None);
        // zero is a value, not an absence
        assert_eq!(cmd.risk_percent, Some(0.0));
        assert!(cmd.errors.is_empty());
    }

    #[test]
    fn test_empty_entity_list_ignored() {
        let mut result = ClassificationResult::default();
        result.entities.insert("symbol".to_string(), Vec::new());
        assert_eq!(transform(&result, "x").symbol, "");
    }

    #[test]
    fn test_configured_aliases() {
        let mut config = NormalizerConfig::default();
        config
            .symbol_aliases
            .insert("avalanche".to_string(), "AVAX-USDT".to_string());
        config.quote_asset = "usdc".to_string();
        let transformer = CommandTransformer::from_config(&config).unwrap();

        let result = ClassificationResult::default().with_entity("symbol", "Avalanche");
        assert_eq!(transformer.transform(&result, "x").symbol, "AVAX-USDT");

        let result = ClassificationResult::default().with_entity("symbol", "pepe");
        assert_eq!(transformer.transform(&result, "x").symbol, "PEPE-USDC");
    }

    #[test]
    fn test_explicit_timestamp() {
        let ts = DateTime::parse_from_rfc3339("2024-03-04T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let cmd =
            CommandTransformer::default().transform_at(&ClassificationResult::default(), "x", ts);
        assert_eq!(cmd.timestamp, ts);
    }

    #[test]
    fn test_from_config_blank_quote_rejected() {
        let config = NormalizerConfig {
            quote_asset: "  ".to_string(),
            ..NormalizerConfig::default()
        };
        let err = CommandTransformer::from_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: normalizer.quote_asset must not be empty"
        );
    }
}
