use std::{io::Write, path::PathBuf};
use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle, Severity},
    files::SimpleFiles,
    term::{self, Config}
};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};
use super::src_span::SrcSpan;

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize) -> CodespanLabel<usize> {
        let label = CodespanLabel::new(
            LabelStyle::Primary,
            file_id,
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

/// An error report, rendered with source context when a location is known.
pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) -> std::io::Result<()> {
        match &self.location {
            Some(location) => self.write_span(location, buf)?,
            None => self.write_title(buf)?,
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text)?;
        }

        Ok(())
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) -> std::io::Result<()> {
        let mut files = SimpleFiles::new();

        let file_id = files.add(location.path.display().to_string(), location.src);

        // codespan panics on spans past the end of the source
        let len = location.src.len() as u32;
        let span = SrcSpan {
            start: location.label.span.start.min(len),
            end: location.label.span.end.min(len),
        };
        let label = Label { text: location.label.text.clone(), span };

        let diagnostic = CodespanDiagnostic::new(Severity::Error)
            .with_message(&self.title)
            .with_labels(vec![label.to_codespan_label(file_id)]);

        term::emit(buf, &Config::default(), &files, &diagnostic)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
    }

    fn write_title(&self, buf: &mut Buffer) -> std::io::Result<()> {
        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Red)))?;
        write!(buf, "error")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        write!(buf, ": {}\n\n", self.title)?;

        buf.set_color(&ColorSpec::new())
    }
}
