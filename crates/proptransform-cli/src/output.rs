//! Output formatting and writing utilities
//!
//! This module formats transformation outcomes, property listings and
//! plain values as JSON, YAML or human-readable text. Values of
//! sensitive-looking properties are masked unless secrets are shown.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use proptransform_core::transform::PropertyWrite;
use proptransform_core::TransformOutcome;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use tracing::trace;

/// What `apply` reports: the dispatch outcome and optionally the whole store
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    #[serde(flatten)]
    pub outcome: TransformOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
}

impl ApplyReport {
    /// Copy with every sensitive value replaced by the mask
    pub fn masked(&self) -> Self {
        let writes = self
            .outcome
            .writes
            .iter()
            .map(|w| PropertyWrite {
                key: w.key.clone(),
                value: redaction::mask(&w.key, &w.value).to_string(),
                applied: w.applied,
            })
            .collect();
        let properties = self.properties.as_ref().map(|props| {
            props
                .iter()
                .map(|(k, v)| (k.clone(), redaction::mask(k, v).to_string()))
                .collect()
        });
        Self {
            outcome: TransformOutcome {
                strategy: self.outcome.strategy.clone(),
                mode: self.outcome.mode,
                writes,
            },
            properties,
        }
    }
}

/// Formatting for the values the CLI prints
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the report of one `apply`
    fn format_report(&self, report: &ApplyReport, use_color: bool) -> Result<String>;

    /// Format the list of transformation types
    fn format_types(&self, types: &[String]) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_report(&self, report: &ApplyReport, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report, use_color)),
            _ => self.format(report),
        }
    }

    fn format_types(&self, types: &[String]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(types.join("\n")),
            _ => self.format(&types),
        }
    }
}

fn format_report_human(report: &ApplyReport, use_color: bool) -> String {
    let outcome = &report.outcome;
    let mut lines = Vec::new();

    let header = format!("Transformation: {} ({})", outcome.strategy, outcome.mode);
    lines.push(if use_color {
        header.bold().to_string()
    } else {
        header
    });

    if outcome.writes.is_empty() {
        lines.push("  (no properties written)".to_string());
    }
    for write in &outcome.writes {
        let entry = format!("  {} = {}", write.key, write.value);
        lines.push(match (write.applied, use_color) {
            (true, true) => entry.green().to_string(),
            (true, false) => entry,
            (false, true) => format!("{} {}", entry.dimmed(), "(ignored: already set)".yellow()),
            (false, false) => format!("{} (ignored: already set)", entry),
        });
    }

    lines.push(format!(
        "Applied {}, ignored {}",
        outcome.applied_count(),
        outcome.ignored_count()
    ));

    if let Some(properties) = &report.properties {
        lines.push(String::new());
        lines.push(if use_color {
            "═══ Properties ═══".bright_blue().to_string()
        } else {
            "=== Properties ===".to_string()
        });
        for (key, value) in properties {
            lines.push(format!("  {} = {}", key, value));
        }
    }

    lines.join("\n")
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a success message (human format only)
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write raw text regardless of format, e.g. a rendered config file
    pub fn raw(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        if !content.ends_with('\n') {
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Write the report of one `apply`, masking secrets unless asked not to
    pub fn report(&mut self, report: &ApplyReport, show_secrets: bool) -> Result<()> {
        let masked;
        let shown = if show_secrets {
            report
        } else {
            masked = report.masked();
            &masked
        };
        trace!(writes = shown.outcome.writes.len(), "Outputting report");

        let formatted = self.format.format_report(shown, self.use_color)?;
        self.raw(&formatted)
    }

    /// Write the list of transformation types
    pub fn types(&mut self, types: &[String]) -> Result<()> {
        let formatted = self.format.format_types(types)?;
        self.raw(&formatted)
    }
}

#[cfg(test)]
mod tests;
