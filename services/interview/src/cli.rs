use crate::config::Provider;
use clap::Parser;

/// Practice a job interview in the terminal against a generative interviewer.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Number of applicant/interviewer rounds (overrides INTERVIEW_ROUNDS).
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Model identifier (overrides CHAT_MODEL / GEMINI_MODEL_NAME).
    #[arg(long)]
    pub model: Option<String>,

    /// Dialogue service backend (overrides DIALOGUE_PROVIDER).
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_no_overrides() {
        let cli = Cli::parse_from(["interview"]);
        assert_eq!(cli.rounds, None);
        assert_eq!(cli.model, None);
        assert_eq!(cli.provider, None);
    }

    #[test]
    fn test_cli_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["interview", "--provider", "claude"]).is_err());
        assert!(Cli::try_parse_from(["interview", "--rounds", "-1"]).is_err());
    }
}
