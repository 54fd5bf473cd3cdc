use thiserror::Error;

/// Failure to obtain the schedule document. Terminal for the session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load schedule: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to load schedule: {0}")]
    Status(String),

    #[error("Failed to read schedule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed schedule data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate schedule entry for {0}")]
    DuplicateDate(String),
}

/// Failure to deliver a reminder message.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_IDS is not set")]
    MissingCredentials,

    #[error("Telegram request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Telegram rejected message for chat {chat_id}: {status} {body}")]
    Rejected {
        chat_id: String,
        status: String,
        body: String,
    },
}
