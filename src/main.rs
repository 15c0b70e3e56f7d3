mod age;
mod cli;
mod clock;
mod config;
mod form;
mod render;
mod validate;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use clock::Clock;
use config::{Config, OutputFormat};
use form::{AgeForm, Field, FormState};
use tracing_subscriber::EnvFilter;
use validate::DateParts;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = Config::from_cli(&cli)?;
    let clock = config.clock();
    tracing::debug!(?config, "resolved configuration");

    let parts = DateParts::new(
        cli.day.clone().unwrap_or_default(),
        cli.month.clone().unwrap_or_default(),
        cli.year.clone().unwrap_or_default(),
    );

    let computed = if cli.is_one_shot() {
        one_shot(
            parts,
            clock.as_ref(),
            config.format,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )?
    } else {
        let missing: Vec<Field> = [
            (Field::Day, &cli.day),
            (Field::Month, &cli.month),
            (Field::Year, &cli.year),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.is_none().then_some(field))
        .collect();

        interactive(
            parts,
            missing,
            clock.as_ref(),
            config.format,
            io::stdin().lock(),
            &mut io::stdout().lock(),
        )?
    };

    Ok(if computed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let directive = format!("agecalc={level}")
        .parse()
        .context("invalid log directive")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(io::stderr)
        .init();

    Ok(())
}

/// Submits the command-line fields once. Results and JSON go to `out`, text
/// errors to `err`. Returns whether an age was computed.
fn one_shot(
    parts: DateParts,
    clock: &dyn Clock,
    format: OutputFormat,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    let mut form = AgeForm::with_parts(parts);
    form.submit(clock);

    match (form.state(), format) {
        (FormState::Computed(age), OutputFormat::Json) => {
            writeln!(out, "{}", render::result_json(age)?)?;
        }
        (FormState::Computed(age), OutputFormat::Text) => {
            writeln!(out, "{}", render::result_panel(Some(*age)))?;
        }
        (_, OutputFormat::Json) => {
            writeln!(out, "{}", render::errors_json(form.errors())?)?;
        }
        (_, OutputFormat::Text) => {
            writeln!(err, "{}", render::error_lines(form.errors()))?;
        }
    }

    Ok(form.last_result().is_some())
}

/// Prompts for the `pending` fields until a submit succeeds or input ends.
/// After a failed submit only the fields in error are asked again.
fn interactive(
    parts: DateParts,
    mut pending: Vec<Field>,
    clock: &dyn Clock,
    format: OutputFormat,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<bool> {
    let mut form = AgeForm::with_parts(parts);
    let mut lines = input.lines();

    if format == OutputFormat::Text {
        writeln!(out, "{}\n", render::result_panel(None))?;
    }

    loop {
        for field in &pending {
            write!(out, "{}: ", field.placeholder())?;
            out.flush().context("failed to flush prompt")?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(form.last_result().is_some());
            };
            form.set_field(*field, line.context("failed to read input")?);
        }

        match (*form.submit(clock), format) {
            (FormState::Computed(age), OutputFormat::Json) => {
                writeln!(out, "{}", render::result_json(&age)?)?;
                return Ok(true);
            }
            (FormState::Computed(age), OutputFormat::Text) => {
                writeln!(out, "\n{}", render::result_panel(Some(age)))?;
                return Ok(true);
            }
            (_, OutputFormat::Json) => {
                writeln!(out, "{}", render::errors_json(form.errors())?)?;
            }
            (_, OutputFormat::Text) => {
                writeln!(out, "{}", render::error_lines(form.errors()))?;
            }
        }

        pending = form.fields_in_error();
    }
}
