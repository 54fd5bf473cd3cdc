use std::error::Error;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use chrono_tz::Tz;

use crate::config::AppConfig;
use crate::handlers::web::{self, Viewer};
use crate::models::drug::DrugRegistry;
use crate::service::reminder_content::ReminderKind;
use crate::service::schedule_store::ScheduleStore;
use crate::tasks::reminder_loop::{run_for_date, run_reminder_loop, MessageSender, TelegramSender};
use crate::tasks::task_runner::TaskRunner;

/// Loads the schedule and serves the HTML viewer. Reminder loops run alongside
/// when Telegram credentials are configured.
pub async fn run_server(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let addr = config.bind_addr()?;
    let registry = Arc::new(DrugRegistry::builtin());

    let store = match ScheduleStore::fetch(&config.schedule_source()).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::error!(error = %err, "Application error");
            web::serve_error(err.to_string(), addr).await;
            return Ok(());
        }
    };

    let mut task_runner = TaskRunner::new();
    match TelegramSender::from_credentials(config.telegram_token(), config.telegram_chat_ids()) {
        Ok(sender) => {
            let tz = config.reminder_timezone()?;
            schedule_reminders(&mut task_runner, tz, store.clone(), registry.clone(), Arc::new(sender));
        }
        Err(reason) => tracing::info!(%reason, "Reminders disabled"),
    }
    task_runner.start_all();

    let viewer = Arc::new(Viewer::new(store, registry, Local::now().date_naive()));
    web::serve_viewer(viewer, addr).await;
    Ok(())
}

/// Runs the reminder jobs: once for `date` (or REMINDER_DATE) when given,
/// otherwise on their daily schedule until interrupted.
pub async fn run_reminders(config: &AppConfig, date: Option<NaiveDate>) -> Result<(), Box<dyn Error>> {
    let sender = Arc::new(TelegramSender::from_credentials(
        config.telegram_token(),
        config.telegram_chat_ids(),
    )?);
    let store = Arc::new(ScheduleStore::fetch(&config.schedule_source()).await?);
    let registry = Arc::new(DrugRegistry::builtin());

    let date = match date {
        Some(date) => Some(date),
        None => config.reminder_date()?,
    };
    if let Some(date) = date {
        tracing::info!(%date, "Running reminders for specific date");
        let sent = run_for_date(date, &store, &registry, sender.as_ref()).await?;
        tracing::info!(sent, "Finished one-shot reminders");
        return Ok(());
    }

    let tz = config.reminder_timezone()?;
    let mut task_runner = TaskRunner::new();
    schedule_reminders(&mut task_runner, tz, store, registry, sender);
    task_runner.start_all();
    tracing::info!(timezone = %tz, "Reminder scheduler started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Reminder scheduler stopped");
    Ok(())
}

fn schedule_reminders(
    task_runner: &mut TaskRunner,
    tz: Tz,
    store: Arc<ScheduleStore>,
    registry: Arc<DrugRegistry>,
    sender: Arc<dyn MessageSender>,
) {
    for kind in ReminderKind::ALL {
        let store = store.clone();
        let registry = registry.clone();
        let sender = sender.clone();
        task_runner.add_task(kind.as_str(), move || {
            tokio::spawn(async move {
                run_reminder_loop(kind, tz, store, registry, sender).await;
            });
        });
    }
}
