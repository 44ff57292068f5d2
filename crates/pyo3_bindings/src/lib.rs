//! PyO3 bindings for the trading intent pipeline.
//!
//! Exposes the Rust normalization and validation code to Python:
//! - Symbol/side normalization and intent label mapping
//! - Take profit level parsing
//! - Transform + validate of a classification result

use std::collections::BTreeMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use intent_core::{
    ClassificationResult, NormalizedCommand as RustCommand, NormalizerConfig,
    TpLevel as RustTpLevel,
};
use intent_normalize::CommandTransformer;
use intent_validation::validated;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// A take profit level.
#[pyclass]
#[derive(Clone)]
pub struct TpLevel {
    #[pyo3(get, set)]
    pub price: f64,
    #[pyo3(get, set)]
    pub percentage: f64,
}

#[pymethods]
impl TpLevel {
    #[new]
    fn new(price: f64, percentage: f64) -> Self {
        TpLevel { price, percentage }
    }

    fn __repr__(&self) -> String {
        format!("TpLevel(price={}, percentage={})", self.price, self.percentage)
    }
}

impl From<RustTpLevel> for TpLevel {
    fn from(tp: RustTpLevel) -> Self {
        TpLevel {
            price: tp.price,
            percentage: tp.percentage,
        }
    }
}

/// A normalized, validated trading command.
#[pyclass]
#[derive(Clone)]
pub struct Command {
    inner: RustCommand,
}

#[pymethods]
impl Command {
    #[getter]
    fn intent(&self) -> &'static str {
        self.inner.intent.as_str()
    }

    #[getter]
    fn confidence(&self) -> f64 {
        self.inner.confidence
    }

    #[getter]
    fn symbol(&self) -> String {
        self.inner.symbol.clone()
    }

    #[getter]
    fn side(&self) -> Option<&'static str> {
        self.inner.side.map(|s| s.as_str())
    }

    #[getter]
    fn entry_price(&self) -> Option<f64> {
        self.inner.entry_price
    }

    #[getter]
    fn stop_loss(&self) -> Option<f64> {
        self.inner.stop_loss
    }

    #[getter]
    fn take_profit(&self) -> Option<f64> {
        self.inner.take_profit
    }

    #[getter]
    fn trigger_price(&self) -> Option<f64> {
        self.inner.trigger_price
    }

    #[getter]
    fn tp_levels(&self) -> Vec<TpLevel> {
        self.inner.tp_levels.iter().map(|tp| (*tp).into()).collect()
    }

    #[getter]
    fn risk_percent(&self) -> Option<f64> {
        self.inner.risk_percent
    }

    #[getter]
    fn rr_ratio(&self) -> Option<f64> {
        self.inner.rr_ratio
    }

    #[getter]
    fn callback_rate(&self) -> Option<f64> {
        self.inner.callback_rate
    }

    #[getter]
    fn distance(&self) -> Option<f64> {
        self.inner.distance
    }

    #[getter]
    fn valid(&self) -> bool {
        self.inner.valid
    }

    #[getter]
    fn missing(&self) -> Vec<String> {
        self.inner.missing.clone()
    }

    #[getter]
    fn errors(&self) -> Vec<String> {
        self.inner.errors.clone()
    }

    #[getter]
    fn raw_input(&self) -> String {
        self.inner.raw_input.clone()
    }

    #[getter]
    fn language(&self) -> Option<String> {
        self.inner.language.clone()
    }

    /// RFC 3339 timestamp of the transform.
    #[getter]
    fn timestamp(&self) -> String {
        self.inner.timestamp.to_rfc3339()
    }

    /// Serialize to JSON.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "Command(intent={}, symbol={:?}, valid={}, missing={:?}, errors={:?})",
            self.inner.intent,
            self.inner.symbol,
            self.inner.valid,
            self.inner.missing,
            self.inner.errors
        )
    }
}

impl From<RustCommand> for Command {
    fn from(inner: RustCommand) -> Self {
        Command { inner }
    }
}

// ============================================================================
// Python-exposed Engine Classes
// ============================================================================

/// Command transformer with optional custom symbol table.
#[pyclass]
pub struct PyCommandTransformer {
    inner: CommandTransformer,
}

#[pymethods]
impl PyCommandTransformer {
    #[new]
    #[pyo3(signature = (quote_asset=None, symbol_aliases=None))]
    fn new(
        quote_asset: Option<String>,
        symbol_aliases: Option<BTreeMap<String, String>>,
    ) -> PyResult<Self> {
        let mut config = NormalizerConfig::default();
        if let Some(quote) = quote_asset {
            config.quote_asset = quote;
        }
        if let Some(aliases) = symbol_aliases {
            config.symbol_aliases = aliases;
        }
        Ok(PyCommandTransformer {
            inner: CommandTransformer::from_config(&config).map_err(value_error)?,
        })
    }

    /// Transform and validate a classification result given as JSON.
    fn parse(&self, classification_json: &str, raw_input: &str) -> PyResult<Command> {
        let result: ClassificationResult =
            serde_json::from_str(classification_json).map_err(value_error)?;
        Ok(validated(self.inner.transform(&result, raw_input)).into())
    }
}

// ============================================================================
// Python-exposed Functions
// ============================================================================

/// Normalize an asset name or ticker to a canonical pair.
#[pyfunction]
#[pyo3(name = "normalize_symbol")]
fn py_normalize_symbol(text: &str) -> String {
    intent_normalize::normalize_symbol(text)
}

/// Normalize a direction word to "LONG" or "SHORT".
#[pyfunction]
#[pyo3(name = "normalize_side")]
fn py_normalize_side(text: &str) -> &'static str {
    intent_normalize::normalize_side(text).as_str()
}

/// Map a provider intent label to its canonical name.
#[pyfunction]
#[pyo3(name = "map_intent")]
fn py_map_intent(label: &str) -> &'static str {
    intent_normalize::map_intent(label).as_str()
}

/// Parse "price:percentage" levels separated by commas.
#[pyfunction]
#[pyo3(name = "parse_tp_levels")]
fn py_parse_tp_levels(text: &str) -> Vec<TpLevel> {
    intent_normalize::parse_tp_levels(text)
        .into_iter()
        .map(TpLevel::from)
        .collect()
}

/// Transform and validate a classification result given as JSON.
#[pyfunction]
#[pyo3(name = "parse_classification")]
fn py_parse_classification(classification_json: &str, raw_input: &str) -> PyResult<Command> {
    let result: ClassificationResult =
        serde_json::from_str(classification_json).map_err(value_error)?;
    Ok(validated(intent_normalize::transform(&result, raw_input)).into())
}

/// Re-validate a command serialized with `Command.to_json()`.
///
/// An unrecognised intent label is read as `unknown` and fails validation.
#[pyfunction]
#[pyo3(name = "validate_command_json")]
fn py_validate_command_json(command_json: &str) -> PyResult<Command> {
    let cmd: RustCommand = serde_json::from_str(command_json).map_err(value_error)?;
    Ok(validated(cmd).into())
}

// ============================================================================
// Module Definition
// ============================================================================

/// Trading intent parser - Rust normalization and validation for Python.
#[pymodule]
fn intent_pyo3(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<TpLevel>()?;
    m.add_class::<Command>()?;

    // Engine classes
    m.add_class::<PyCommandTransformer>()?;

    // Functions
    m.add_function(wrap_pyfunction!(py_normalize_symbol, m)?)?;
    m.add_function(wrap_pyfunction!(py_normalize_side, m)?)?;
    m.add_function(wrap_pyfunction!(py_map_intent, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_tp_levels, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_classification, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_command_json, m)?)?;

    Ok(())
}
