use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Once,
    Watch,
}

fn describe_interval(interval: Duration) -> String {
    match interval.as_secs() {
        3600 => "every hour".to_string(),
        secs if secs > 0 && secs % 3600 == 0 => format!("every {} hours", secs / 3600),
        60 => "every minute".to_string(),
        secs if secs > 0 && secs % 60 == 0 => format!("every {} minutes", secs / 60),
        1 => "every second".to_string(),
        secs => format!("every {secs} seconds"),
    }
}

/// Asks how to run. Anything other than "1" or "2", including end of input,
/// runs once.
pub fn prompt_run_mode<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    interval: Duration,
) -> Result<RunMode> {
    writeln!(output, "How do you want to run the scraper?")?;
    writeln!(output, "1 - Once")?;
    writeln!(output, "2 - Continuously ({})", describe_interval(interval))?;
    write!(output, "Choose (1 or 2): ")?;
    output.flush()?;

    let mut choice = String::new();
    input.read_line(&mut choice).context("Failed to read choice")?;

    match choice.trim() {
        "1" => Ok(RunMode::Once),
        "2" => Ok(RunMode::Watch),
        _ => {
            writeln!(output, "Invalid option. Running once...")?;
            Ok(RunMode::Once)
        }
    }
}
