//! The parse pipeline: classify, transform, validate.

use crate::context::RequestContext;
use crate::provider::ClassificationProvider;
use crate::witai::WitAiProvider;
use async_trait::async_trait;
use intent_core::{Config, NormalizedCommand, Result};
use intent_normalize::CommandTransformer;
use intent_validation::validated;
use tracing::{debug, info, warn};

/// Turns natural language into validated commands.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Parse `input`. Only provider/transport failures return `Err`;
    /// incomplete commands come back with `valid == false`.
    async fn parse_command(&self, ctx: &RequestContext, input: &str) -> Result<NormalizedCommand>;

    /// Processor name (e.g., "witai").
    fn name(&self) -> &str;

    /// Supported language codes.
    fn supported_languages(&self) -> &[&'static str];
}

/// [`Processor`] over any [`ClassificationProvider`].
pub struct CommandProcessor<P> {
    provider: P,
    transformer: CommandTransformer,
}

impl<P: ClassificationProvider> CommandProcessor<P> {
    /// Create a processor with the built-in synonym tables.
    pub fn new(provider: P) -> Self {
        Self::with_transformer(provider, CommandTransformer::default())
    }

    pub fn with_transformer(provider: P, transformer: CommandTransformer) -> Self {
        Self {
            provider,
            transformer,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl CommandProcessor<WitAiProvider> {
    /// Build a Wit.ai backed processor from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let provider = WitAiProvider::new(&config.provider)?;
        let transformer = CommandTransformer::from_config(&config.normalizer)?;
        Ok(Self::with_transformer(provider, transformer))
    }
}

#[async_trait]
impl<P: ClassificationProvider> Processor for CommandProcessor<P> {
    async fn parse_command(&self, ctx: &RequestContext, input: &str) -> Result<NormalizedCommand> {
        let provider = self.provider.name();
        debug!(provider, input_len = input.len(), "Classifying command");

        let result = match ctx.run(self.provider.classify(input)).await {
            Ok(result) => result,
            Err(e) => {
                warn!(provider, error = %e, "Classification failed");
                return Err(e);
            }
        };

        let cmd = validated(self.transformer.transform(&result, input));

        if cmd.valid {
            info!(provider, intent = %cmd.intent, symbol = %cmd.symbol, "Parsed command");
        } else {
            info!(
                provider,
                intent = %cmd.intent,
                missing = ?cmd.missing,
                errors = ?cmd.errors,
                "Parsed incomplete command"
            );
        }

        Ok(cmd)
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn supported_languages(&self) -> &[&'static str] {
        self.provider.supported_languages()
    }
}
