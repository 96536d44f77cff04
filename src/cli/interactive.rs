use crate::cli::{convert, ui};
use crate::core::rate::RateTable;
use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Reads one trimmed line after printing `label`. `None` on end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Accepts a list number, a code or a full label.
fn pick_currency(labels: &[String], choice: &str) -> String {
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| labels.get(i))
        .cloned()
        .unwrap_or_else(|| choice.to_string())
}

/// Prompt loop: source, destination, amount. A blank source ends the session.
///
/// Conversion failures are printed and the loop carries on.
pub fn session<R: BufRead, W: Write>(
    table: &RateTable,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let labels = table.labels();
    writeln!(output, "{}", ui::style_text("Currencies", ui::StyleType::Title))?;
    for (i, label) in labels.iter().enumerate() {
        writeln!(output, "{:>3}. {label}", i + 1)?;
    }
    writeln!(
        output,
        "{}",
        ui::style_text("Leave the source empty to quit.", ui::StyleType::Subtle)
    )?;

    loop {
        let Some(source) = prompt(input, output, "Source currency: ")? else {
            break;
        };
        if source.is_empty() {
            break;
        }
        let Some(destination) = prompt(input, output, "Destination currency: ")? else {
            break;
        };
        let Some(amount) = prompt(input, output, "Amount: ")? else {
            break;
        };

        let source = pick_currency(&labels, &source);
        let destination = pick_currency(&labels, &destination);
        match convert::convert(table, &source, &destination, &amount) {
            Ok(result) => writeln!(
                output,
                "{}",
                ui::style_text(&result.to_string(), ui::StyleType::Result)
            )?,
            Err(e) => writeln!(
                output,
                "{}",
                ui::style_text(&format!("Error: {e}"), ui::StyleType::Error)
            )?,
        }
    }
    Ok(())
}

pub fn run(table: &RateTable) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(table, &mut stdin.lock(), &mut stdout.lock())
}
