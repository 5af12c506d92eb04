//! Shared output formatting for check results.

use anyhow::{Context, Result};
use bibcheck_core::{DocumentReport, IssueDiagnostic, LintResult, Severity};
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Print check results in the specified format.
///
/// `root` is the checked file or directory; it is needed to re-read sources
/// for [`OutputFormat::Pretty`].
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => return print_pretty(result, root),
        OutputFormat::Report => print_report(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    for document in &result.documents {
        for issue in &document.issues {
            let severity_indicator = match issue.severity {
                Severity::Error => "\x1b[31merror\x1b[0m",
                Severity::Warning => "\x1b[33mwarning\x1b[0m",
                Severity::Info => "\x1b[34minfo\x1b[0m",
            };
            let (line, column) = document.lines.line_col(issue.location.start);

            println!(
                "{} {} in [{}] at {}:{}:{}",
                issue.kind.code(),
                issue.kind.name(),
                issue.label.trim(),
                document.file.display(),
                line,
                column,
            );
            println!("  {}: {}", severity_indicator, issue.kind.description());
            if let Some(suggestion) = &issue.suggestion {
                println!("  = help: {}", suggestion.message);
                if let Some(replacement) = &suggestion.replacement {
                    println!("  = suggested: {}", replacement.new_text);
                }
            }
            println!();
        }
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for document in &result.documents {
        for issue in &document.issues {
            let (line, column) = document.lines.line_col(issue.location.start);
            println!(
                "{}:{}:{}: {} [{}] {} ({})",
                document.file.display(),
                line,
                column,
                issue.severity,
                issue.kind.code(),
                issue.kind.name(),
                issue.label.trim(),
            );
        }
    }
}

fn source_path(root: &Path, document: &DocumentReport) -> PathBuf {
    if root.is_file() {
        root.to_path_buf()
    } else {
        root.join(&document.file)
    }
}

fn print_pretty(result: &LintResult, root: &Path) -> Result<()> {
    for document in result.documents.iter().filter(|d| !d.is_clean()) {
        let path = source_path(root, document);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to re-read {}", path.display()))?;

        for issue in &document.issues {
            let source = miette::NamedSource::new(document.file.display().to_string(), content.clone());
            let report = miette::Report::new(IssueDiagnostic::from(issue)).with_source_code(source);
            println!("{report:?}");
        }
    }

    let (errors, warnings, infos) = result.count_by_severity();
    println!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
        errors, warnings, infos, result.files_checked
    );
    Ok(())
}

fn print_report(result: &LintResult) {
    for document in &result.documents {
        if document.needs_summary() {
            tracing::info!(
                "{} has {} issues, above the summary threshold",
                document.file.display(),
                document.issues.len()
            );
        }
        println!("== {} ({} references) ==", document.file.display(), document.entries_checked);
        println!("{}\n", document.render().trim());
    }
}
