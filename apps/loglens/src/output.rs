//! Output rendering for log and grammar reports.
//!
//! Supports `human` (default) and `json` outputs. Human output is built as
//! plain lines first (`compose_*_lines`) so it can be tested without a
//! terminal; JSON output carries the normalized result plus computed
//! summaries.

use crate::classify::{Column, GrammarStyle, Urgency};
use crate::config::OutputMode;
use crate::error::SubmissionError;
use crate::models::{AnalysisResult, GrammarResult};
use crate::render::{
    GrammarView, LogReport, SemanticSection, TokenTable, MSG_NO_GRAMMAR_ERRORS, MSG_NO_THREATS,
};
use crate::utils::{colors_enabled, pad};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(mode: OutputMode) -> bool {
    mode != OutputMode::Json && colors_enabled()
}

fn pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().underline().to_string()
    } else {
        text.to_string()
    }
}

fn paint_urgency(text: &str, urgency: Urgency, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match urgency {
        Urgency::High => text.red().bold().to_string(),
        Urgency::Medium => text.yellow().bold().to_string(),
        Urgency::Low => text.blue().bold().to_string(),
    }
}

fn paint_grammar(text: &str, style: GrammarStyle, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match style {
        GrammarStyle::Lexical => text.magenta().bold().to_string(),
        GrammarStyle::Syntactic => text.yellow().bold().to_string(),
        GrammarStyle::Semantic => text.cyan().bold().to_string(),
        GrammarStyle::Neutral => text.bold().to_string(),
    }
}

/// Print a log analysis report in the requested format.
pub fn print_log_report(result: &AnalysisResult, report: &LogReport, mode: OutputMode) {
    match mode {
        OutputMode::Json => println!("{}", pretty(&compose_log_json(result, report))),
        OutputMode::Human => {
            for l in compose_log_lines(report, use_colors(mode)) {
                println!("{}", l);
            }
        }
    }
}

/// Print grammar findings. `NotAnalyzed` prints nothing.
pub fn print_grammar(result: &GrammarResult, view: &GrammarView, mode: OutputMode) {
    match mode {
        OutputMode::Json => println!("{}", pretty(&compose_grammar_json(result))),
        OutputMode::Human => {
            for l in compose_grammar_lines(view, use_colors(mode)) {
                println!("{}", l);
            }
        }
    }
}

/// Print a submission failure: JSON on stdout, human text on stderr.
pub fn print_failure(err: &SubmissionError, mode: OutputMode) {
    match mode {
        OutputMode::Json => println!("{}", pretty(&compose_error_json(err))),
        OutputMode::Human => eprintln!("{} {}", crate::utils::error_prefix(), err),
    }
}

/// Human report lines for a log analysis.
pub fn compose_log_lines(report: &LogReport, color: bool) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(s) = &report.summary {
        out.push(format!(
            "Líneas procesadas: {} · Alertas: {}",
            s.lines_processed, s.alerts_found
        ));
        out.push(String::new());
    }

    out.push(heading("Análisis Sintáctico y Semántico", color));
    out.push("  Veredicto Semántico (Amenazas)".to_string());
    match &report.verdict.semantic {
        SemanticSection::NoThreats => out.push(format!("    {}", MSG_NO_THREATS)),
        SemanticSection::Alerts(cards) => {
            for c in cards {
                let tag = format!("⟦{}⟧", c.treatment.label);
                out.push(format!(
                    "    {} {} {}",
                    paint_urgency(c.treatment.icon, c.treatment.urgency, color),
                    paint_urgency(&tag, c.treatment.urgency, color),
                    c.title
                ));
                if !c.details.is_empty() {
                    out.push(format!("      {}", c.details));
                }
                if let Some(ip) = &c.ip_address {
                    out.push(format!("      IP: {}", ip));
                }
                if let Some(user) = &c.user {
                    out.push(format!("      Usuario: {}", user));
                }
            }
        }
    }

    out.push("  Reporte Sintáctico (Línea por Línea)".to_string());
    let summary = report.verdict.summary.to_string();
    out.push(format!(
        "    Resumen: {} líneas analizadas tienen una estructura de log de error conocida.",
        if color { summary.bold().to_string() } else { summary }
    ));
    for l in &report.verdict.lines {
        let icon = match (l.success, color) {
            (true, true) => l.icon().green().to_string(),
            (false, true) => l.icon().red().to_string(),
            _ => l.icon().to_string(),
        };
        let mut row = format!("    {} Línea {}: {}", icon, l.line_number, l.status);
        if !l.reason.is_empty() {
            row.push_str(&format!(" — {}", l.reason));
        }
        out.push(row);
    }

    out.push(String::new());
    out.push(heading("Análisis Léxico Detallado", color));
    out.extend(compose_table_lines(&report.table));
    if let Some(notice) = report.table.truncation_notice() {
        out.push(if color {
            notice.bright_black().to_string()
        } else {
            notice
        });
    }

    if let Some(findings) = &report.structural {
        out.push(String::new());
        out.push(heading("Hallazgos Estructurales", color));
        for f in findings {
            out.push(format!("  Línea {}: {}", f.line_number, f.message));
        }
    }
    out
}

/// Fixed-width token table, header row first. Uncolored.
pub fn compose_table_lines(table: &TokenTable) -> Vec<String> {
    let rows: Vec<Vec<String>> = table.rows.iter().map(|r| r.cells()).collect();
    let widths: Vec<usize> = Column::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.header().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let join = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect();
        format!("  {}", padded.join(" │ ").trim_end())
    };
    let mut out = vec![join(Column::ALL.iter().map(|c| c.header().to_string()).collect())];
    out.push(format!(
        "  {}",
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─")
    ));
    out.extend(rows.into_iter().map(join));
    out
}

/// Human lines for grammar findings.
pub fn compose_grammar_lines(view: &GrammarView, color: bool) -> Vec<String> {
    let mut out = Vec::new();
    match view {
        GrammarView::NotAnalyzed => {}
        GrammarView::Clean => {
            out.push(heading("Resultados del Análisis:", color));
            out.push(if color {
                MSG_NO_GRAMMAR_ERRORS.green().to_string()
            } else {
                MSG_NO_GRAMMAR_ERRORS.to_string()
            });
        }
        GrammarView::Errors(cards) => {
            out.push(heading("Resultados del Análisis:", color));
            for c in cards {
                out.push(format!(
                    "  {}  Línea: {}",
                    paint_grammar(&c.error_type, c.style, color),
                    c.line
                ));
                out.push(format!("    {}", c.headline()));
                if let Some(s) = &c.suggestion {
                    out.push(format!("    Sugerencia: {}", s));
                }
            }
        }
    }
    out
}

/// Compose log JSON object (pure) for testing/snapshot purposes.
pub fn compose_log_json(result: &AnalysisResult, report: &LogReport) -> JsonVal {
    let alerts = match &report.verdict.semantic {
        SemanticSection::Alerts(cards) => cards.len(),
        SemanticSection::NoThreats => 0,
    };
    let summary = json!({
        "syntax": report.verdict.summary,
        "alerts": alerts,
        "table": {
            "shown": report.table.shown_lines,
            "total": report.table.total_lines,
            "truncated": report.table.is_truncated(),
        },
    });
    json!({
        "result": serde_json::to_value(result).unwrap_or(JsonVal::Null),
        "summary": summary,
    })
}

/// Compose grammar JSON object (pure) for testing/snapshot purposes.
pub fn compose_grammar_json(result: &GrammarResult) -> JsonVal {
    json!({
        "errors": serde_json::to_value(result).unwrap_or(JsonVal::Null),
        "summary": { "total": result.errors.len(), "clean": result.is_clean() },
    })
}

pub fn compose_error_json(err: &SubmissionError) -> JsonVal {
    json!({"error": {"kind": err.kind(), "message": err.to_string()}})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{grammar, log_report};

    fn sample() -> AnalysisResult {
        AnalysisResult::from_json(json!({
            "lexicalAnalysis": [{"lineNumber": 1, "tokens": [
                {"type": "PROCESS", "value": "sshd"},
                {"type": "IP", "value": "192.168.0.10"}
            ]}],
            "syntacticAnalysis": [{"lineNumber": 1, "status": "ÉXITO", "reason": "patrón de login"}],
            "semanticAnalysis": [{"id": "x", "severity": "MEDIA", "type": "Comando Peligroso",
                                  "details": "riesgo", "user": "fulanito"}],
            "structuralAnalysis": [{"lineNumber": 1, "message": "ok"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_log_lines_contain_every_section() {
        let report = log_report(&sample(), 50);
        let text = compose_log_lines(&report, false).join("\n");
        assert!(text.contains("▲ ⟦MEDIA⟧ Comando Peligroso"));
        assert!(text.contains("Usuario: fulanito"));
        assert!(!text.contains("IP:"));
        assert!(text.contains("Resumen: 1 de 1 líneas"));
        assert!(text.contains("✓ Línea 1: ÉXITO — patrón de login"));
        assert!(text.contains("Hallazgos Estructurales"));
        assert!(!text.contains("Mostrando"));
    }

    #[test]
    fn test_empty_log_lines_show_no_threats() {
        let report = log_report(&AnalysisResult::default(), 50);
        let lines = compose_log_lines(&report, false);
        assert!(lines.iter().any(|l| l.contains(MSG_NO_THREATS)));
        assert!(lines.iter().any(|l| l.contains("Resumen: 0 de 0")));
        assert!(!lines.iter().any(|l| l.contains("Hallazgos")));
    }

    #[test]
    fn test_table_lines_align_columns() {
        let report = log_report(&sample(), 50);
        let lines = compose_table_lines(&report.table);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  Tokens       │ PR/Tipo │ ID"));
        assert!(lines[2].starts_with("  sshd         │ X"));
        assert!(lines[3].contains("│ X"));
    }

    #[test]
    fn test_grammar_lines_for_each_view() {
        assert!(compose_grammar_lines(&GrammarView::NotAnalyzed, false).is_empty());
        let clean = compose_grammar_lines(&grammar(Some(&GrammarResult::default())), false);
        assert_eq!(clean[1], MSG_NO_GRAMMAR_ERRORS);
    }

    #[test]
    fn test_compose_log_json_shape() {
        let res = sample();
        let out = compose_log_json(&res, &log_report(&res, 50));
        assert_eq!(out["summary"]["syntax"]["successful"], 1);
        assert_eq!(out["summary"]["alerts"], 1);
        assert_eq!(out["summary"]["table"]["truncated"], false);
        assert_eq!(out["result"]["semanticAnalysis"][0]["severity"], "MEDIA");
    }

    #[test]
    fn test_compose_error_json_shape() {
        let out = compose_error_json(&SubmissionError::Transport("refused".into()));
        assert_eq!(out["error"]["kind"], "transport");
        assert!(out["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("No se pudo conectar"));
    }
}
