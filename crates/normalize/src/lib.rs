//! Normalization of classification results into trading commands.
//!
//! This crate handles:
//! - Symbol synonyms (asset names and tickers to canonical pairs)
//! - Side synonyms (English and Spanish direction words)
//! - Multi-level take profit parsing
//! - Provider intent label mapping
//! - Building the normalized command from a classification result

pub mod intent_map;
pub mod lexicon;
pub mod side;
pub mod symbol;
pub mod tp_levels;
pub mod transformer;

pub use intent_map::{map_intent, map_intent_with};
pub use lexicon::{Lexicon, SynonymMap, SynonymTable};
pub use side::{normalize_side, normalize_side_with};
pub use symbol::{normalize_symbol, normalize_symbol_with};
pub use tp_levels::parse_tp_levels;
pub use transformer::{transform, CommandTransformer};
