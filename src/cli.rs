use std::error::Error;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};

use crate::config::AppConfig;
use crate::models::drug::DrugRegistry;
use crate::runtime;
use crate::service::reminder_content::{generate_reminder_content, ReminderKind};
use crate::service::schedule_store::{ScheduleStore, DATE_FORMAT};
use crate::handlers::text;
use crate::tasks::reminder_loop::{MessageSender, TelegramSender};
use crate::views::navigation::{NavAction, Navigator, View};

#[derive(Parser)]
#[command(name = "medCalendar", about = "Medication and appointment schedule viewer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the schedule viewer over HTTP (default)
    Serve,
    /// Browse the schedule interactively in the terminal
    Browse,
    /// Print the morning, evening and late-night reminders for a date
    Preview { date: Option<NaiveDate> },
    /// Send reminders on their daily schedule, or once for --date
    Remind {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Send a test message to every configured Telegram chat
    TestMessage,
}

pub async fn cli(config: AppConfig) -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => runtime::run_server(&config).await,
        Commands::Browse => {
            let store = ScheduleStore::fetch(&config.schedule_source()).await?;
            browse(&store, &DrugRegistry::builtin())
        }
        Commands::Preview { date } => {
            let date = match date {
                Some(date) => date,
                None => specify_date()?,
            };
            let store = ScheduleStore::fetch(&config.schedule_source()).await?;
            println!("{}", preview(date, &store, &DrugRegistry::builtin()));
            Ok(())
        }
        Commands::Remind { date } => runtime::run_reminders(&config, date).await,
        Commands::TestMessage => {
            let sender = TelegramSender::from_credentials(config.telegram_token(), config.telegram_chat_ids())?;
            sender
                .send_message("🧪 Test Message", "This is a test message from your reminder bot!")
                .await?;
            tracing::info!(chats = sender.chat_ids().len(), "Test message sent");
            Ok(())
        }
    }
}

fn specify_date() -> Result<NaiveDate, Box<dyn Error>> {
    let raw = Text::new("Which date? (YYYY-MM-DD)").prompt()?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| "Invalid date format. Please use YYYY-MM-DD.".into())
}

/// All three reminder templates for `date`, as the bot would send them.
pub fn preview(date: NaiveDate, store: &ScheduleStore, registry: &DrugRegistry) -> String {
    let rule = "=".repeat(50);
    let mut out = format!(
        "\n{rule}\n  GENERATING TEMPLATES FOR DATE: {}\n{rule}\n\n",
        date.format("%A, %Y-%m-%d")
    );
    for kind in ReminderKind::ALL {
        let content = generate_reminder_content(kind, date, store, registry);
        out.push_str(&format!("--- {} ---\n", kind.title()));
        out.push_str(&format!("Subject: {}\n", content.subject));
        out.push_str(&format!("Body:\n{}\n", content.body));
        out.push_str(&"-".repeat(content.subject.chars().count() + 9));
        out.push_str("\n\n");
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Show(View),
    PrevMonth,
    NextMonth,
    GoToToday,
    SelectDay,
    ClearSelection,
    Quit,
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuChoice::Show(view) => write!(f, "{}", view.label()),
            MenuChoice::PrevMonth => f.write_str("Previous month"),
            MenuChoice::NextMonth => f.write_str("Next month"),
            MenuChoice::GoToToday => f.write_str("Go to today"),
            MenuChoice::SelectDay => f.write_str("Select day"),
            MenuChoice::ClearSelection => f.write_str("Clear selection"),
            MenuChoice::Quit => f.write_str("Quit"),
        }
    }
}

fn menu_for(active: View) -> Vec<MenuChoice> {
    let mut choices: Vec<MenuChoice> = View::ALL
        .into_iter()
        .filter(|view| *view != active)
        .map(MenuChoice::Show)
        .collect();
    if active == View::Calendar {
        choices.extend([
            MenuChoice::SelectDay,
            MenuChoice::PrevMonth,
            MenuChoice::NextMonth,
            MenuChoice::GoToToday,
            MenuChoice::ClearSelection,
        ]);
    }
    choices.push(MenuChoice::Quit);
    choices
}

fn day_in_month(year: i32, month: u32, raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn browse(store: &ScheduleStore, registry: &DrugRegistry) -> Result<(), Box<dyn Error>> {
    let mut nav = Navigator::new(Local::now().date_naive());
    loop {
        let today = Local::now().date_naive();
        println!("\n{}", text::render_active_view(&nav, store, registry, today));

        let choice = Select::new("Where to?", menu_for(nav.active())).prompt()?;
        let action = match choice {
            MenuChoice::Show(view) => NavAction::Show(view),
            MenuChoice::PrevMonth => NavAction::PrevMonth,
            MenuChoice::NextMonth => NavAction::NextMonth,
            MenuChoice::GoToToday => NavAction::GoToToday,
            MenuChoice::ClearSelection => NavAction::Select(None),
            MenuChoice::SelectDay => {
                let calendar = nav.calendar();
                let raw = Text::new("Day of month:").prompt()?;
                match day_in_month(calendar.year(), calendar.month(), &raw) {
                    Some(date) => NavAction::Select(Some(date)),
                    None => {
                        println!("No such day in this month.");
                        continue;
                    }
                }
            }
            MenuChoice::Quit => return Ok(()),
        };
        nav.apply(action, today, store, registry);
    }
}
