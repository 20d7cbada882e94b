//! Tally terminal dashboard
//!
//! Interactive single-user dashboard: keeps the roster in this process and
//! redraws the summary, ranked table and chart after every change.

use anyhow::Context;
use std::io::{self, BufRead, Write};

use tally::config::Config;
use tally::presentation::{
    clear_with_confirmation, render_summary, render_table, ChartSlot, DashboardView,
    PromptConfirm, TerminalChart,
};
use tally::roster::{EmployeeInput, Roster, RosterSnapshot};

const CHART_WIDTH: usize = 40;

fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    config.logging.init_stderr();

    tracing::info!("Tally dashboard v{}", env!("CARGO_PKG_VERSION"));

    let mut roster = config.initial_roster();
    let mut chart = ChartSlot::new();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    redraw(&mut stdout, &roster.snapshot(), &config, &mut chart)?;

    loop {
        let Some(command) = prompt(&mut input, &mut stdout, "[a]dd  [c]lear  [q]uit > ")? else {
            break;
        };

        match command.to_lowercase().as_str() {
            "a" | "add" => {
                if let Some(snapshot) = add_from_prompt(&mut input, &mut stdout, &mut roster)? {
                    redraw(&mut stdout, &snapshot, &config, &mut chart)?;
                }
            }
            "c" | "clear" => {
                let mut confirm = PromptConfirm::new(&mut input, &mut stdout);
                if let Some(snapshot) = clear_with_confirmation(&mut roster, &mut confirm) {
                    redraw(&mut stdout, &snapshot, &config, &mut chart)?;
                }
            }
            "q" | "quit" | "exit" => break,
            "" => {}
            other => writeln!(stdout, "Unknown command: {}", other)?,
        }
    }

    tracing::info!(employees = roster.len(), "Tally dashboard closed");
    Ok(())
}

/// Ask for a line; `None` on end of input
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> anyhow::Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Collect name and sales; invalid entries are dropped with a warning
fn add_from_prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    roster: &mut Roster,
) -> anyhow::Result<Option<RosterSnapshot>> {
    let Some(name) = prompt(input, output, "Employee name: ")? else {
        return Ok(None);
    };
    let Some(sales) = prompt(input, output, "Sales amount: ")? else {
        return Ok(None);
    };

    match EmployeeInput::parse(&name, &sales) {
        Ok(employee) => Ok(Some(roster.add_input(employee))),
        Err(e) => {
            tracing::debug!(error = %e, "Input ignored");
            writeln!(output, "Ignored: {}", e)?;
            Ok(None)
        }
    }
}

fn redraw(
    output: &mut impl Write,
    snapshot: &RosterSnapshot,
    config: &Config,
    chart: &mut ChartSlot<TerminalChart>,
) -> io::Result<()> {
    let view = DashboardView::build(snapshot, &config.display);

    chart.refresh(view.chart.as_ref(), |c| TerminalChart::draw(c, CHART_WIDTH));

    writeln!(output)?;
    write!(output, "{}", render_summary(&view.summary))?;
    writeln!(output)?;
    write!(output, "{}", render_table(&view.table))?;
    if let Some(drawn) = chart.current() {
        writeln!(output)?;
        write!(output, "{}", drawn.render())?;
    }
    writeln!(output)?;
    output.flush()
}
