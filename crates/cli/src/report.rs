//! Renders command errors against the line that caused them

use std::io::{self, Write};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::command::CommandError;

pub fn report_command_error<W: Write>(
    input: &str,
    err: &CommandError,
    color: bool,
    out: W,
) -> io::Result<()> {
    let source_name = String::from("input");
    Report::build(ReportKind::Error, (&source_name, err.span.clone()))
        .with_config(Config::default().with_color(color))
        .with_message(&err.msg)
        .with_label(
            Label::new((&source_name, err.span.clone()))
                .with_message("Problem here")
                .with_color(Color::Red),
        )
        .finish()
        .write((&source_name, Source::from(input)), out)
}
