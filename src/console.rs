//! Output sink for reports.
//!
//! In text mode every call writes human readable lines right away. In JSON
//! mode values are collected under their section key and written as one
//! document by [`Console::finish`].

use std::{fmt::Display, io::Write};

use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::Result;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Leading marker of a notice line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Indicator {
    Info,
    Added,
    Present,
    Error,
}

impl Indicator {
    const fn mark(self) -> &'static str {
        match self {
            Self::Info => "*",
            Self::Added => "+",
            Self::Present => "=",
            Self::Error => "!",
        }
    }
}

pub struct Console<W: Write> {
    out: W,
    format: OutputFormat,
    color: bool,
    document: Map<String, Value>,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            color: false,
            document: Map::new(),
        }
    }

    /// Enables ANSI styling of headings and indicators.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes a plain text line. Ignored in JSON mode.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot be written.
    pub fn line(&mut self, text: impl Display) -> Result<()> {
        if !self.is_json() {
            writeln!(self.out, "{text}")?;
        }
        Ok(())
    }

    /// Writes an empty line followed by a section title.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot be written.
    pub fn heading(&mut self, title: &str) -> Result<()> {
        let title = format!("{title}:");
        let title = if self.color {
            title.bold().to_string()
        } else {
            title
        };
        self.line("")?;
        self.line(title)
    }

    /// Writes a framed banner between empty lines.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot be written.
    pub fn banner(&mut self, text: &str) -> Result<()> {
        let text = format!("=== {text} ===");
        let text = if self.color {
            text.cyan().bold().to_string()
        } else {
            text
        };
        self.line("")?;
        self.line(text)
    }

    /// Writes a divider announcing a group of operations.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot be written.
    pub fn divider(&mut self, text: &str) -> Result<()> {
        self.line("")?;
        self.line(format!("--- {text} ---"))
    }

    /// Writes `message` behind an indicator mark.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot be written.
    pub fn notice(&mut self, indicator: Indicator, message: impl Display) -> Result<()> {
        let mark = indicator.mark();
        let mark = if self.color {
            match indicator {
                Indicator::Info => mark.blue().to_string(),
                Indicator::Added => mark.green().to_string(),
                Indicator::Present => mark.yellow().to_string(),
                Indicator::Error => mark.red().bold().to_string(),
            }
        } else {
            mark.to_string()
        };
        self.line(format!("{mark} {message}"))
    }

    /// Stores `value` under `key` in the JSON document. Ignored in text mode.
    ///
    /// # Errors
    ///
    /// Returns an error when the value cannot be serialized.
    pub fn record<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        if self.is_json() {
            self.document
                .insert(key.to_string(), serde_json::to_value(value)?);
        }
        Ok(())
    }

    /// Appends `value` to the array stored under `key`. Ignored in text mode.
    ///
    /// # Errors
    ///
    /// Returns an error when the value cannot be serialized.
    pub fn push<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        if !self.is_json() {
            return Ok(());
        }
        let value = serde_json::to_value(value)?;
        match self.document.get_mut(key) {
            Some(Value::Array(items)) => items.push(value),
            _ => {
                self.document
                    .insert(key.to_string(), Value::Array(vec![value]));
            }
        }
        Ok(())
    }

    /// Writes the collected JSON document and flushes the sink.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot be written.
    pub fn finish(&mut self) -> Result<()> {
        if self.is_json() && !self.document.is_empty() {
            let document = Value::Object(std::mem::take(&mut self.document));
            serde_json::to_writer_pretty(&mut self.out, &document)?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Console, Indicator, OutputFormat};

    fn text(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).expect("utf8")
    }

    #[test]
    fn text_mode_writes_lines_immediately() {
        let mut console = Console::new(Vec::new(), OutputFormat::Text);
        console.heading("Songs in ontology").expect("heading");
        console.notice(Indicator::Added, "Added 'GameOver'").expect("notice");
        console.record("songs", &vec!["GameOver"]).expect("record");
        console.finish().expect("finish");
        assert_eq!(text(console), "\nSongs in ontology:\n+ Added 'GameOver'\n");
    }

    #[test]
    fn json_mode_collects_sections() {
        let mut console = Console::new(Vec::new(), OutputFormat::Json);
        console.heading("Songs in ontology").expect("heading");
        console.record("songs", &vec!["GameOver"]).expect("record");
        console.push("favorites", &"a").expect("push");
        console.push("favorites", &"b").expect("push");
        console.finish().expect("finish");

        let value: serde_json::Value = serde_json::from_str(&text(console)).expect("json");
        assert_eq!(value["songs"], serde_json::json!(["GameOver"]));
        assert_eq!(value["favorites"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn colored_marks_keep_message() {
        let mut console = Console::new(Vec::new(), OutputFormat::Text).with_color(true);
        console.notice(Indicator::Error, "Error: Song 'X' not found!").expect("notice");
        assert!(text(console).contains("Error: Song 'X' not found!"));
    }
}
