use serde::Serialize;

use crate::error::NotifyError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Posts a Markdown-formatted message to one chat.
    pub async fn send_markdown(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(self.endpoint("sendMessage"))
            .json(&SendMessage {
                chat_id,
                text,
                parse_mode: "Markdown",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                chat_id: chat_id.to_string(),
                status: status.to_string(),
                body,
            });
        }
        Ok(())
    }
}
