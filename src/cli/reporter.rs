use colored::Colorize;
use std::collections::HashMap;

use super::driver::{FileStatus, RunReport};
use arkmig_common::{Diagnostic, DiagnosticSeverity};

pub struct Reporter {
    color: bool,
    sources: HashMap<String, String>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
        }
    }

    /// Register source text so diagnostics in `file` get a snippet.
    pub fn add_source(&mut self, file: impl Into<String>, text: impl Into<String>) {
        self.sources.insert(file.into(), text.into());
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// `file:line:column - severity AMcode: message`, then the source line
    /// with a marker under the column when the text is known.
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = self.format_location(diagnostic);
        output.push_str(" - ");
        output.push_str(&self.format_severity(diagnostic.severity));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message);

        if let Some(snippet) = self.format_snippet(diagnostic) {
            output.push_str(&snippet);
        }
        output
    }

    fn format_location(&self, diagnostic: &Diagnostic) -> String {
        let file = if diagnostic.file.is_empty() {
            "<unknown>"
        } else {
            diagnostic.file.as_str()
        };
        let location = if diagnostic.line == 0 {
            file.to_string()
        } else {
            format!("{file}:{}:{}", diagnostic.line, diagnostic.column)
        };
        if self.color {
            location.cyan().to_string()
        } else {
            location
        }
    }

    fn format_severity(&self, severity: DiagnosticSeverity) -> String {
        let label = severity.as_str();
        if !self.color {
            return label.to_string();
        }
        match severity {
            DiagnosticSeverity::Error => label.red().bold().to_string(),
            DiagnosticSeverity::Warning => label.yellow().bold().to_string(),
            DiagnosticSeverity::Info => label.blue().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let code = format!("AM{code}");
        if self.color {
            code.dimmed().to_string()
        } else {
            code
        }
    }

    ///   12   int x = foo();
    ///                ~
    fn format_snippet(&self, diagnostic: &Diagnostic) -> Option<String> {
        if diagnostic.line == 0 {
            return None;
        }
        let source = self.sources.get(&diagnostic.file)?;
        let line_text = source.lines().nth((diagnostic.line - 1) as usize)?;
        let line_number = diagnostic.line.to_string();

        let mut underline = String::new();
        for (i, ch) in line_text.chars().enumerate() {
            if i as u32 + 1 >= diagnostic.column {
                break;
            }
            underline.push(if ch == '\t' { '\t' } else { ' ' });
        }
        let marker = if self.color {
            "~".red().to_string()
        } else {
            "~".to_string()
        };

        let gutter = " ".repeat(line_number.len());
        let line_number = if self.color {
            line_number.dimmed().to_string()
        } else {
            line_number
        };
        Some(format!(
            "\n\n{line_number}   {line_text}\n{gutter}   {underline}{marker}\n"
        ))
    }

    /// Per-file diagnostics followed by a one-line summary.
    pub fn render_report(&mut self, report: &RunReport) -> String {
        for (file, text) in &report.sources {
            self.sources.entry(file.clone()).or_insert_with(|| text.clone());
        }

        let mut out = String::new();
        for file in &report.files {
            if !file.diagnostics.is_empty() {
                out.push_str(&self.render(&file.diagnostics));
                out.push('\n');
            }
            match file.status {
                FileStatus::Migrated | FileStatus::Cancelled => {}
                FileStatus::Unreadable | FileStatus::Failed => {
                    let label = if self.color {
                        "failed".red().bold().to_string()
                    } else {
                        "failed".to_string()
                    };
                    let reason = file.error.as_deref().unwrap_or("unknown error");
                    out.push_str(&format!("{}: {label}: {reason}\n", file.file));
                }
            }
        }
        out.push_str(&self.summary(report));
        out
    }

    pub fn summary(&self, report: &RunReport) -> String {
        let migrated = report.with_status(FileStatus::Migrated).count();
        let mut line = format!(
            "Migrated {migrated} of {} file(s): {} error(s), {} warning(s), {} info(s).",
            report.files.len(),
            report.count(DiagnosticSeverity::Error),
            report.count(DiagnosticSeverity::Warning),
            report.count(DiagnosticSeverity::Info),
        );
        let cancelled = report.with_status(FileStatus::Cancelled).count();
        if cancelled > 0 {
            line.push_str(&format!(" {cancelled} file(s) cancelled."));
        }
        line.push('\n');
        line
    }
}

pub fn render_json(report: &RunReport, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}
