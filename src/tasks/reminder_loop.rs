use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::time::sleep;

use crate::clients::telegram_client::TelegramClient;
use crate::error::NotifyError;
use crate::models::drug::DrugRegistry;
use crate::service::reminder_content::{generate_reminder_content, ReminderKind};
use crate::service::schedule_store::ScheduleStore;

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Fans a reminder out to every configured Telegram chat.
pub struct TelegramSender {
    client: TelegramClient,
    chat_ids: Vec<String>,
}

impl TelegramSender {
    pub fn new(client: TelegramClient, chat_ids: Vec<String>) -> Self {
        Self { client, chat_ids }
    }

    /// Builds a sender from the bot token and a comma separated chat id list.
    pub fn from_credentials(token: Option<String>, chat_ids: Option<String>) -> Result<Self, NotifyError> {
        let (Some(token), Some(chat_ids)) = (token, chat_ids) else {
            return Err(NotifyError::MissingCredentials);
        };
        let chat_ids = parse_chat_ids(&chat_ids);
        if token.trim().is_empty() || chat_ids.is_empty() {
            return Err(NotifyError::MissingCredentials);
        }
        Ok(Self::new(TelegramClient::new(token), chat_ids))
    }

    pub fn chat_ids(&self) -> &[String] {
        &self.chat_ids
    }
}

pub fn parse_chat_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send_message(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let text = format!("*{}*\n\n{}", subject, body);
        let mut first_error = None;
        for chat_id in &self.chat_ids {
            match self.client.send_markdown(chat_id, &text).await {
                Ok(()) => tracing::info!(chat_id = %chat_id, subject, "Telegram message sent"),
                Err(err) => {
                    tracing::error!(chat_id = %chat_id, error = %err, "Error sending Telegram message");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Generates one reminder and sends it when there is something to report.
/// Returns whether a message went out.
pub async fn run_job<S: MessageSender + ?Sized>(
    kind: ReminderKind,
    base_date: NaiveDate,
    store: &ScheduleStore,
    registry: &DrugRegistry,
    sender: &S,
) -> Result<bool, NotifyError> {
    tracing::info!(reminder_type = %kind, %base_date, "Running reminder job");
    let content = generate_reminder_content(kind, base_date, store, registry);
    if !content.should_send {
        tracing::info!(reminder_type = %kind, "No items to report, skipping notification");
        return Ok(false);
    }
    sender.send_message(&content.subject, &content.body).await?;
    Ok(true)
}

/// Runs all three reminders once for a fixed date.
pub async fn run_for_date<S: MessageSender + ?Sized>(
    base_date: NaiveDate,
    store: &ScheduleStore,
    registry: &DrugRegistry,
    sender: &S,
) -> Result<usize, NotifyError> {
    let mut sent = 0;
    for kind in ReminderKind::ALL {
        if run_job(kind, base_date, store, registry, sender).await? {
            sent += 1;
        }
    }
    Ok(sent)
}

/// Next instant at which the local wall clock in `tz` reads `at`.
pub fn next_daily_run(now: DateTime<Utc>, tz: Tz, at: NaiveTime) -> DateTime<Utc> {
    let now_local = now.with_timezone(&tz);
    let today = resolve_local(tz, now_local.date_naive().and_time(at));
    if now_local < today {
        return today.with_timezone(&Utc);
    }
    let tomorrow = now_local.date_naive().succ_opt().unwrap_or(now_local.date_naive());
    resolve_local(tz, tomorrow.and_time(at)).with_timezone(&Utc)
}

// Wall-clock times skipped by a DST jump fall back to reading them as UTC.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&local)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&local))
}

pub async fn run_reminder_loop(
    kind: ReminderKind,
    tz: Tz,
    store: Arc<ScheduleStore>,
    registry: Arc<DrugRegistry>,
    sender: Arc<dyn MessageSender>,
) {
    loop {
        let next_run = next_daily_run(Utc::now(), tz, kind.fire_time());
        tracing::info!(reminder_type = %kind, %next_run, "Scheduled reminder");
        let sleep_for = (next_run - Utc::now())
            .to_std()
            .unwrap_or_else(|_| std::time::Duration::from_secs(60));
        sleep(sleep_for).await;

        let base_date = Utc::now().with_timezone(&tz).date_naive();
        if let Err(err) = run_job(kind, base_date, &store, &registry, sender.as_ref()).await {
            tracing::error!(reminder_type = %kind, error = %err, "Reminder job failed");
        }
    }
}
