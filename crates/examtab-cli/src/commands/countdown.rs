use chrono::Local;
use clap::Args;
use examtab_core::ExamId;

use crate::session::{render_view, CliResult, Session};

#[derive(Args)]
pub struct CountdownArgs {
    /// Exam to show instead of the active one (jee, neet, jeeAdv, custom)
    #[arg(long)]
    exam: Option<ExamId>,
    /// Hide the seconds component
    #[arg(long)]
    no_seconds: bool,
    /// Skip the remote feed and use fallback dates
    #[arg(long)]
    offline: bool,
    /// Print the view as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CountdownArgs) -> CliResult {
    let session = Session::open()?;
    let mut selector = session.resolved_selector(args.offline)?;
    if args.no_seconds {
        selector.set_show_seconds(false);
    }

    let now = Local::now().naive_local();
    let view = match args.exam {
        Some(id) => selector.view_of(id, now),
        None => selector.tick(now),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_view(&view));
    }
    Ok(())
}
