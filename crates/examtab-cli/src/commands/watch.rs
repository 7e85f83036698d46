use std::io::Write;

use clap::Args;
use examtab_core::{ClockFace, CoreError, CountdownView, Dashboard, RenderSink, SystemClock};

use crate::session::{render_view, runtime, CliResult, Session};

#[derive(Args)]
pub struct WatchArgs {
    /// Skip the remote feed and use fallback dates
    #[arg(long)]
    offline: bool,
    /// Stop after this many ticks instead of waiting for Ctrl-C
    #[arg(long)]
    ticks: Option<u32>,
}

/// Line-oriented terminal output.
struct TerminalSink<W> {
    out: W,
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render_countdown(&mut self, view: &CountdownView) -> Result<(), CoreError> {
        writeln!(self.out, "{}", render_view(view))?;
        Ok(())
    }

    fn render_clock(&mut self, face: &ClockFace) -> Result<(), CoreError> {
        writeln!(self.out, "{} {}", face.date, face.time)?;
        Ok(())
    }
}

pub fn run(args: WatchArgs) -> CliResult {
    let session = Session::open()?;
    let feed = session.feed(args.offline)?;
    // The catalog starts at the fallback set; the dashboard swaps in the
    // remote one when the fetch lands.
    let selector = session.selector()?;
    let period = session.config.tick_period();
    let mut dashboard = Dashboard::new(selector, SystemClock, period, session.fallback()?);
    let mut sink = TerminalSink {
        out: std::io::stdout(),
    };

    let ticks = args.ticks;
    let summary = runtime()?.block_on(async {
        let shutdown = async move {
            match ticks {
                // Half a period of slack so the last tick lands first.
                Some(n) => tokio::time::sleep(period * n + period / 2).await,
                None => {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!(error = %e, "failed to listen for Ctrl-C");
                    }
                }
            }
        };
        dashboard.run(&mut sink, &feed, shutdown).await
    });

    tracing::info!(
        countdown = summary.countdown_renders,
        clock = summary.clock_renders,
        failed = summary.failed_renders,
        "watch finished"
    );
    Ok(())
}
