//! Fixed synonym tables for symbols, sides and intent labels.
//!
//! The built-in tables are built once on first use. Call sites go through
//! [`SynonymTable`] so a provider-specific or configured table can replace
//! them.

use intent_core::{Intent, NormalizerConfig, Result, Side};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup from a free-text alias to a canonical value.
pub trait SynonymTable<T>: Send + Sync {
    /// `key` is expected to be trimmed and lower-cased by the caller.
    fn lookup(&self, key: &str) -> Option<T>;
}

/// Hash-map backed synonym table. Aliases are stored trimmed and lower-cased.
#[derive(Debug, Clone)]
pub struct SynonymMap<T> {
    entries: HashMap<String, T>,
}

impl<T: Clone> SynonymMap<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build from `(alias, value)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, T)>) -> Self {
        let mut map = Self::new();
        for (alias, value) in pairs {
            map.insert(alias, value);
        }
        map
    }

    /// Add or replace an alias.
    pub fn insert(&mut self, alias: &str, value: T) {
        self.entries.insert(alias.trim().to_lowercase(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for SynonymMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> SynonymTable<T> for SynonymMap<T> {
    fn lookup(&self, key: &str) -> Option<T> {
        self.entries.get(key).cloned()
    }
}

impl<T, S: SynonymTable<T> + ?Sized> SynonymTable<T> for &S {
    fn lookup(&self, key: &str) -> Option<T> {
        (**self).lookup(key)
    }
}

/// Asset names and tickers to canonical pairs.
pub static DEFAULT_SYMBOLS: Lazy<SynonymMap<String>> = Lazy::new(|| {
    SynonymMap::from_pairs(
        [
            ("bitcoin", "BTC-USDT"),
            ("btc", "BTC-USDT"),
            ("ethereum", "ETH-USDT"),
            ("eth", "ETH-USDT"),
            ("solana", "SOL-USDT"),
            ("sol", "SOL-USDT"),
            ("bnb", "BNB-USDT"),
            ("xrp", "XRP-USDT"),
            ("cardano", "ADA-USDT"),
            ("ada", "ADA-USDT"),
            ("dogecoin", "DOGE-USDT"),
            ("doge", "DOGE-USDT"),
        ]
        .map(|(alias, pair)| (alias, pair.to_string())),
    )
});

/// Direction words, English and Spanish.
pub static DEFAULT_SIDES: Lazy<SynonymMap<Side>> = Lazy::new(|| {
    SynonymMap::from_pairs([
        ("buy", Side::Long),
        ("long", Side::Long),
        ("bullish", Side::Long),
        ("comprar", Side::Long),
        ("largo", Side::Long),
        ("alcista", Side::Long),
        ("sell", Side::Short),
        ("short", Side::Short),
        ("bearish", Side::Short),
        ("vender", Side::Short),
        ("corto", Side::Short),
        ("bajista", Side::Short),
    ])
});

/// Provider intent labels. `unknown` is deliberately absent.
pub static DEFAULT_INTENTS: Lazy<SynonymMap<Intent>> = Lazy::new(|| {
    SynonymMap::from_pairs(
        Intent::ALL
            .into_iter()
            .filter(|intent| *intent != Intent::Unknown)
            .map(|intent| (intent.as_str(), intent)),
    )
});

/// The set of tables and the quote asset used by one transformer.
#[derive(Clone)]
pub struct Lexicon {
    pub symbols: Arc<dyn SynonymTable<String>>,
    pub sides: Arc<dyn SynonymTable<Side>>,
    pub intents: Arc<dyn SynonymTable<Intent>>,
    /// Quote asset appended to symbols missing from the table.
    pub quote_asset: String,
}

impl Lexicon {
    /// Built-in tables with configured symbol aliases merged on top.
    ///
    /// Fails when `config` does not validate, e.g. a blank quote asset.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        config.validate()?;
        let mut lexicon = Self::default();
        if !config.symbol_aliases.is_empty() {
            let mut symbols = (*DEFAULT_SYMBOLS).clone();
            for (alias, pair) in &config.symbol_aliases {
                symbols.insert(alias, pair.trim().to_uppercase());
            }
            lexicon.symbols = Arc::new(symbols);
        }
        lexicon.quote_asset = config.quote_asset.trim().to_uppercase();
        Ok(lexicon)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            symbols: Arc::new(&*DEFAULT_SYMBOLS),
            sides: Arc::new(&*DEFAULT_SIDES),
            intents: Arc::new(&*DEFAULT_INTENTS),
            quote_asset: "USDT".to_string(),
        }
    }
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicon")
            .field("quote_asset", &self.quote_asset)
            .finish_non_exhaustive()
    }
}
