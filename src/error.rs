use miette::Diagnostic;
use thiserror::Error;

/// Main error type for switchboard operations
#[derive(Error, Debug, Diagnostic)]
pub enum SwitchboardError {
    #[error("Discord error")]
    #[diagnostic(help("Check Discord bot token and permissions"))]
    Discord(#[from] DiscordError),

    #[error("Configuration error")]
    #[diagnostic(help("Check your configuration file"))]
    Config(#[from] ConfigError),
}

/// Discord-specific errors
#[derive(Error, Debug, Diagnostic)]
pub enum DiscordError {
    #[error("Discord bot token not configured")]
    #[diagnostic(
        code(switchboard::discord::no_token),
        help("Set DISCORD_TOKEN in .env or the config file")
    )]
    NoToken,

    #[error("Failed to connect to Discord")]
    #[diagnostic(
        code(switchboard::discord::connection_failed),
        help("Check bot token and network connection")
    )]
    ConnectionFailed {
        #[source]
        source: serenity::Error,
    },

    #[error("Failed to send message to channel {channel_id}")]
    #[diagnostic(
        code(switchboard::discord::send_failed),
        help("Check bot permissions in the channel")
    )]
    SendFailed {
        channel_id: u64,
        #[source]
        source: serenity::Error,
    },

    #[error("Discord error: {0}")]
    #[diagnostic()]
    Other(#[from] serenity::Error),
}

/// Configuration errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Configuration file not found at {path}")]
    #[diagnostic(
        code(switchboard::config::not_found),
        help("Create a config file or use environment variables")
    )]
    NotFound { path: String },

    #[error("Invalid configuration")]
    #[diagnostic(
        code(switchboard::config::invalid),
        help("Check configuration format and required fields")
    )]
    Invalid { field: String, reason: String },

    #[error("Failed to parse configuration")]
    #[diagnostic(
        code(switchboard::config::parse_failed),
        help("Check TOML syntax and field types")
    )]
    ParseFailed {
        #[source]
        source: toml::de::Error,
    },
}

/// Type alias for Results in switchboard
pub type Result<T> = std::result::Result<T, SwitchboardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn no_token_renders_diagnostic_code() {
        let report = Report::new(DiscordError::NoToken);
        let output = format!("{:?}", report);
        assert!(output.contains("no_token"));
    }

    #[test]
    fn invalid_config_names_the_field() {
        let error = ConfigError::Invalid {
            field: "discord.token".to_string(),
            reason: "token cannot be empty".to_string(),
        };
        let report = Report::new(error);
        let output = format!("{:?}", report);
        assert!(output.contains("switchboard::config::invalid"));
    }
}
