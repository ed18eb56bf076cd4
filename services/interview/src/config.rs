use async_openai::config::OpenAIConfig;
use interview_core::interview::DEFAULT_ROUNDS;
use tracing::Level;

use crate::cli::Cli;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported backends for the dialogue service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "gemini")]
    Gemini,
}

impl Provider {
    /// Base URL of the provider's OpenAI-compatible endpoint.
    pub fn api_base(self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1/",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        }
    }

    fn key_var(self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub provider: Provider,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub chat_model: String,
    pub rounds: u32,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let provider_str =
            std::env::var("DIALOGUE_PROVIDER").unwrap_or_else(|_| "gemini".to_string());
        let provider = match provider_str.trim().to_lowercase().as_str() {
            "openai" => Provider::OpenAI,
            "gemini" => Provider::Gemini,
            _ => {
                return Err(ConfigError::InvalidValue(
                    "DIALOGUE_PROVIDER".to_string(),
                    format!("'{}' is not one of 'gemini', 'openai'", provider_str),
                ));
            }
        };

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();

        let chat_model = std::env::var("CHAT_MODEL")
            .or_else(|_| std::env::var("GEMINI_MODEL_NAME"))
            .unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let rounds = match std::env::var("INTERVIEW_ROUNDS") {
            Ok(value) => value.trim().parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("INTERVIEW_ROUNDS".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_ROUNDS,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let config = Self {
            provider,
            openai_api_key,
            gemini_api_key,
            chat_model,
            rounds,
            log_level,
        };
        config.require_api_key()?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the environment.
    pub fn apply_cli(mut self, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(provider) = cli.provider {
            self.provider = provider;
        }
        if let Some(model) = &cli.model {
            self.chat_model = model.clone();
        }
        if let Some(rounds) = cli.rounds {
            self.rounds = rounds;
        }
        self.require_api_key()?;
        Ok(self)
    }

    /// The credential of the selected provider.
    pub fn api_key(&self) -> Option<&str> {
        match self.provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        }
    }

    /// Client configuration for the selected provider's endpoint.
    pub fn openai_config(&self) -> Result<OpenAIConfig, ConfigError> {
        let api_key = self.require_api_key()?;
        Ok(OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(self.provider.api_base()))
    }

    fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key().ok_or_else(|| {
            ConfigError::MissingVar(format!(
                "{} must be set for '{:?}' provider",
                self.provider.key_var(),
                self.provider
            ))
        })
    }
}
