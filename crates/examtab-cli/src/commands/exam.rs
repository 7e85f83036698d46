use chrono::Local;
use clap::Subcommand;
use examtab_core::exam::date::{format_date, parse_date};
use examtab_core::ExamId;
use serde_json::json;

use crate::session::{render_view, CliResult, Session};

#[derive(Subcommand)]
pub enum ExamAction {
    /// Countdowns for every exam with a known date
    List {
        /// Skip the remote feed and use fallback dates
        #[arg(long)]
        offline: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Make an exam the active one (jee, neet, jeeAdv, custom)
    Use {
        exam: ExamId,
        /// Skip the remote feed and use fallback dates
        #[arg(long)]
        offline: bool,
    },
    /// The user-defined exam
    Custom {
        #[command(subcommand)]
        action: CustomAction,
    },
}

#[derive(Subcommand)]
pub enum CustomAction {
    /// Print the stored custom exam
    Show,
    /// Set the custom exam's name and date
    Set {
        /// Display name (defaults to "Custom Exam")
        #[arg(long)]
        name: Option<String>,
        /// Exam date, DD-MM-YYYY
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove the custom exam's name and date
    Clear,
}

pub fn run(action: ExamAction) -> CliResult {
    let session = Session::open()?;
    let now = Local::now().naive_local();

    match action {
        ExamAction::List { offline, json } => {
            let selector = session.resolved_selector(offline)?;
            let views = selector.overview(now);
            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                let active = selector.active();
                for view in &views {
                    let marker = if view.exam_id == active { "*" } else { " " };
                    let date = selector
                        .target(view.exam_id)
                        .map(|d| format_date(&d))
                        .unwrap_or_default();
                    let text = render_view(view).replace('\n', " | ");
                    println!("{marker} {:<7} {date}  {text}", view.exam_id);
                }
            }
        }
        ExamAction::Use { exam, offline } => {
            let mut selector = session.resolved_selector(offline)?;
            let view = selector.set_active(exam, now);
            println!("{}", render_view(&view));
        }
        ExamAction::Custom { action } => run_custom(&session, action)?,
    }
    Ok(())
}

fn run_custom(session: &Session, action: CustomAction) -> CliResult {
    let mut selector = session.selector()?;

    match action {
        CustomAction::Show => {
            let record = selector.custom().record();
            let out = json!({
                "name": record.name,
                "date": record.date.as_ref().map(format_date),
                "valid": selector.custom().is_valid(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        CustomAction::Set { name, date } => {
            let date = parse_date(date.as_deref())?;
            if !selector.save_custom(name.as_deref(), date) {
                return Err("custom exam could not be saved".into());
            }
            let record = selector.custom().record();
            match record.date {
                Some(d) => println!("saved {} ({})", record.name, format_date(&d)),
                None => println!("saved {} (no date)", record.name),
            }
        }
        CustomAction::Clear => {
            if !selector.save_custom(None, None) {
                return Err("custom exam could not be saved".into());
            }
            println!("custom exam cleared");
        }
    }
    Ok(())
}
