//! Core data types for the trading intent pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical trading action a command represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    OpenPosition,
    ClosePosition,
    ViewPositions,
    ViewOrders,
    CancelOrders,
    CheckBalance,
    BreakEven,
    TrailingStop,
    /// Zero value: no candidate, or a label the mapper does not know.
    /// Unrecognised labels also deserialize to this variant.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Intent {
    /// All intents, in declaration order.
    pub const ALL: [Intent; 9] = [
        Intent::OpenPosition,
        Intent::ClosePosition,
        Intent::ViewPositions,
        Intent::ViewOrders,
        Intent::CancelOrders,
        Intent::CheckBalance,
        Intent::BreakEven,
        Intent::TrailingStop,
        Intent::Unknown,
    ];

    /// Snake-case label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::OpenPosition => "open_position",
            Intent::ClosePosition => "close_position",
            Intent::ViewPositions => "view_positions",
            Intent::ViewOrders => "view_orders",
            Intent::CancelOrders => "cancel_orders",
            Intent::CheckBalance => "check_balance",
            Intent::BreakEven => "break_even",
            Intent::TrailingStop => "trailing_stop",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Long => "LONG",
            Side::Short => "SHORT",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Take profit level for partial closing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TpLevel {
    /// Target price.
    pub price: f64,
    /// Share of the position closed at this level (0-100).
    pub percentage: f64,
}

impl TpLevel {
    pub fn new(price: f64, percentage: f64) -> Self {
        Self { price, percentage }
    }
}

/// Result of running the validator over a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// True iff `missing` and `errors` are both empty.
    pub valid: bool,
    /// Required fields that were absent, in check order.
    pub missing: Vec<String>,
    /// Rule violations, in check order.
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    /// Outcome with no findings.
    pub fn passed() -> Self {
        Self {
            valid: true,
            missing: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Record an absent required field.
    pub fn push_missing(&mut self, field: impl Into<String>) {
        self.missing.push(field.into());
        self.valid = false;
    }

    /// Record a rule violation.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }
}

/// A parsed and normalized trading command.
///
/// Built once by the transformer, then completed once with a
/// [`ValidationOutcome`]. Optional fields stay `None` when the value was
/// absent or unparseable; zero is a real value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCommand {
    pub intent: Intent,
    /// Provider-reported confidence (0.0 - 1.0).
    pub confidence: f64,

    /// Canonical pair, e.g. "BTC-USDT". Empty when absent.
    pub symbol: String,
    pub side: Option<Side>,

    pub entry_price: Option<f64>,
    pub stop_loss: Option<f64>,
    /// Single take profit price.
    pub take_profit: Option<f64>,
    /// Activation price for trailing stops.
    pub trigger_price: Option<f64>,

    pub tp_levels: Vec<TpLevel>,

    /// Risk percentage, intended range (0, 100].
    pub risk_percent: Option<f64>,
    /// Risk-reward ratio (e.g. 2.0).
    pub rr_ratio: Option<f64>,

    /// Trailing callback rate.
    pub callback_rate: Option<f64>,
    /// Fixed trailing distance.
    pub distance: Option<f64>,

    pub valid: bool,
    pub missing: Vec<String>,
    pub errors: Vec<String>,

    pub raw_input: String,
    pub language: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NormalizedCommand {
    /// Create an empty command for the given input, stamped at `timestamp`.
    pub fn new(raw_input: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            intent: Intent::Unknown,
            confidence: 0.0,
            symbol: String::new(),
            side: None,
            entry_price: None,
            stop_loss: None,
            take_profit: None,
            trigger_price: None,
            tp_levels: Vec::new(),
            risk_percent: None,
            rr_ratio: None,
            callback_rate: None,
            distance: None,
            valid: false,
            missing: Vec::new(),
            errors: Vec::new(),
            raw_input: raw_input.into(),
            language: None,
            timestamp,
        }
    }

    /// Whether a symbol was extracted.
    pub fn has_symbol(&self) -> bool {
        !self.symbol.is_empty()
    }

    /// Sum of all take profit percentages.
    pub fn tp_percentage_total(&self) -> f64 {
        self.tp_levels.iter().map(|tp| tp.percentage).sum()
    }

    /// Replace the validation fields with `outcome`.
    pub fn with_validation(mut self, outcome: ValidationOutcome) -> Self {
        self.valid = outcome.valid;
        self.missing = outcome.missing;
        self.errors = outcome.errors;
        self
    }

    /// Current validation fields as an outcome.
    pub fn validation(&self) -> ValidationOutcome {
        ValidationOutcome {
            valid: self.valid,
            missing: self.missing.clone(),
            errors: self.errors.clone(),
        }
    }
}

/// Intent candidate reported by a classification provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentCandidate {
    pub label: String,
    pub confidence: f64,
}

/// Entity candidate reported by a classification provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCandidate {
    pub value: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl EntityCandidate {
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence,
            role: None,
        }
    }
}

/// Provider-neutral classification of one input text.
///
/// Candidate lists keep the provider's order; the first entry is taken as
/// the most confident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub intents: Vec<IntentCandidate>,
    #[serde(default)]
    pub entities: HashMap<String, Vec<EntityCandidate>>,
}

impl ClassificationResult {
    /// Highest ranked intent candidate.
    pub fn top_intent(&self) -> Option<&IntentCandidate> {
        self.intents.first()
    }

    /// Highest ranked entity for `category`.
    pub fn top_entity(&self, category: &str) -> Option<&EntityCandidate> {
        self.entities.get(category).and_then(|values| values.first())
    }

    /// Append an intent candidate.
    pub fn with_intent(mut self, label: impl Into<String>, confidence: f64) -> Self {
        self.intents.push(IntentCandidate {
            label: label.into(),
            confidence,
        });
        self
    }

    /// Append an entity candidate to `category`.
    pub fn with_entity(mut self, category: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities
            .entry(category.into())
            .or_default()
            .push(EntityCandidate::new(value, 1.0));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_labels_match_serde() {
        for intent in Intent::ALL {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(json, format!("\"{}\"", intent.as_str()));
        }
    }

    #[test]
    fn test_default_intent_is_unknown() {
        assert_eq!(Intent::default(), Intent::Unknown);
    }

    #[test]
    fn test_side_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Side::Short).unwrap(), "\"SHORT\"");
        assert_eq!(Side::Long.to_string(), "LONG");
    }

    #[test]
    fn test_outcome_push_marks_invalid() {
        let mut outcome = ValidationOutcome::passed();
        assert!(outcome.valid);
        outcome.push_missing("symbol");
        assert!(!outcome.valid);
        assert_eq!(outcome.missing, vec!["symbol"]);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_tp_percentage_total() {
        let mut cmd = NormalizedCommand::new("tp", Utc::now());
        cmd.tp_levels = vec![TpLevel::new(46000.0, 60.0), TpLevel::new(47000.0, 50.0)];
        approx::assert_relative_eq!(cmd.tp_percentage_total(), 110.0);
    }

    #[test]
    fn test_with_validation_replaces_fields() {
        let mut outcome = ValidationOutcome::passed();
        outcome.push_error("boom");
        let cmd = NormalizedCommand::new("x", Utc::now()).with_validation(outcome.clone());
        assert_eq!(cmd.validation(), outcome);
        assert!(!cmd.valid);
    }

    #[test]
    fn test_classification_top_entries() {
        let result = ClassificationResult::default()
            .with_intent("open_position", 0.9)
            .with_intent("close_position", 0.1)
            .with_entity("symbol", "btc")
            .with_entity("symbol", "eth");
        assert_eq!(result.top_intent().unwrap().label, "open_position");
        assert_eq!(result.top_entity("symbol").unwrap().value, "btc");
        assert!(result.top_entity("side").is_none());
    }

    #[test]
    fn test_unrecognised_intent_label_deserializes_to_unknown() {
        let intent: Intent = serde_json::from_str("\"place_bet\"").unwrap();
        assert_eq!(intent, Intent::Unknown);

        let mut cmd = NormalizedCommand::new("x", Utc::now());
        cmd.intent = Intent::OpenPosition;
        let json = serde_json::to_string(&cmd)
            .unwrap()
            .replace("open_position", "place_bet");
        let parsed: NormalizedCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.intent, Intent::Unknown);
    }
}
