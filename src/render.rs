//! Report rendering for the terminal and for machines

use std::io::{self, Write};

use colored::Colorize;

use crate::config::ValidatorConfig;
use crate::error::{FixSuggestion, FlowError};
use crate::findings::Finding;
use crate::report::ValidationReport;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Write the banner shown before any result
pub fn write_header(out: &mut impl Write, file_path: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🔍 Auto-Validating JSON File".blue().bold())?;
    writeln!(out, "{}", RULE.blue())?;
    writeln!(out)?;
    writeln!(out, "File: {}", file_path)?;
    writeln!(out)
}

/// Write the fatal-error section (read, syntax or depth failure)
pub fn write_failure(out: &mut impl Write, err: &FlowError) -> io::Result<()> {
    match err {
        FlowError::TooDeep { .. } => writeln!(out, "{}", "✗ JSON Nesting: TOO DEEP".red())?,
        _ => writeln!(out, "{}", "✗ JSON Syntax: INVALID".red())?,
    }
    writeln!(out, "  {}", err)?;
    if let Some(fix) = err.fix_suggestion() {
        writeln!(out, "  {} {}", "Fix:".yellow(), fix)?;
    }
    writeln!(out)
}

/// Write the full text report
pub fn write_text(
    out: &mut impl Write,
    report: &ValidationReport,
    config: &ValidatorConfig,
) -> io::Result<()> {
    writeln!(out, "{}", "✓ JSON Syntax: Valid".green())?;

    if !report.shape.is_recognized() {
        writeln!(out, "{}", "ℹ Not a Power Automate flow file".yellow())?;
        writeln!(out, "{}", "✓ General JSON validation: PASSED".green())?;
        return writeln!(out);
    }

    writeln!(
        out,
        "{}",
        format!("✓ Power Automate Format: Detected ({})", report.shape).green()
    )?;

    if report.structure_issues.is_empty() {
        writeln!(out, "{}", "✓ Structure: Valid".green())?;
    } else {
        write_section(out, "✗ Structure Issues:", &report.structure_issues, None)?;
    }

    if !report.structure_warnings.is_empty() {
        writeln!(out, "{}", "⚠ Structure Warnings:".yellow())?;
        write_items(out, &report.structure_warnings, None)?;
    }

    if report.expression_issues.is_empty() {
        writeln!(out, "{}", "✓ Expressions: Valid".green())?;
    } else {
        write_section(
            out,
            "✗ Expression Issues:",
            &report.expression_issues,
            Some(config.display_limit),
        )?;
    }

    if report.dependency_issues.is_empty() {
        writeln!(out, "{}", "✓ runAfter Chains: Valid".green())?;
    } else {
        write_section(out, "✗ runAfter Chain Issues:", &report.dependency_issues, None)?;
    }

    if report.security_issues.is_empty() {
        writeln!(out, "{}", "✓ Security: No issues detected".green())?;
    } else {
        write_section(out, "✗ Security Issues:", &report.security_issues, None)?;
    }

    writeln!(
        out,
        "{}",
        format!("ℹ Total Actions: {}", report.action_count).blue()
    )?;

    write_checklist(out, report)
}

fn write_section(
    out: &mut impl Write,
    title: &str,
    findings: &[Finding],
    limit: Option<usize>,
) -> io::Result<()> {
    writeln!(out, "{}", title.red())?;
    write_items(out, findings, limit)?;
    writeln!(out)
}

fn write_items(out: &mut impl Write, findings: &[Finding], limit: Option<usize>) -> io::Result<()> {
    let shown = limit.unwrap_or(findings.len()).min(findings.len());
    for finding in &findings[..shown] {
        writeln!(out, "  • {}", finding)?;
        if let Some(fix) = finding.suggestion() {
            writeln!(out, "    {} {}", "Fix:".yellow(), fix)?;
        }
    }
    if findings.len() > shown {
        writeln!(out, "  ... and {} more", findings.len() - shown)?;
    }
    Ok(())
}

fn write_checklist(out: &mut impl Write, report: &ValidationReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📋 Deployment Readiness Checklist".blue().bold())?;
    writeln!(out, "{}", RULE.blue())?;
    writeln!(out)?;

    for item in report.checklist() {
        if item.passed {
            writeln!(out, "{} {}", "✓".green(), item.description)?;
        } else {
            writeln!(out, "{} {}", "✗".red(), item.description)?;
        }
    }
    writeln!(out)?;

    if report.is_ready() {
        writeln!(out, "{}", "✅ READY TO DEPLOY".green().bold())?;
        writeln!(
            out,
            "{}",
            "This JSON can be pasted into Power Automate!".green()
        )?;
    } else {
        writeln!(out, "{}", "⚠️  NEEDS ATTENTION".yellow().bold())?;
        writeln!(
            out,
            "{}",
            format!(
                "Found {} issue(s) that should be reviewed.",
                report.total_issues()
            )
            .yellow()
        )?;
    }
    writeln!(out)
}

/// JSON body for a fatal failure in `--format json` mode
pub fn failure_json(file_path: &str, err: &FlowError) -> serde_json::Value {
    serde_json::json!({
        "file": file_path,
        "syntax_valid": matches!(err, FlowError::TooDeep { .. }),
        "error": err.to_string(),
        "line": err.line(),
    })
}
