//! Classification provider boundary.

use async_trait::async_trait;
use intent_core::{ClassificationResult, Result};

/// Languages understood by the built-in synonym tables.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "es"];

/// A service that classifies free text into intents and entities.
///
/// One call per request. Retry policy, if any, belongs to the implementor.
#[async_trait]
pub trait ClassificationProvider: Send + Sync {
    /// Classify `text`. Transport and status failures are hard errors.
    async fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Provider name (e.g., "witai").
    fn name(&self) -> &str;

    /// Supported language codes.
    fn supported_languages(&self) -> &[&'static str] {
        DEFAULT_LANGUAGES
    }
}
