//! 端末向けの表示整形

use std::fmt::Write;
use xray_common::advisory::{format_advisory, AdvisoryLine};
use xray_common::{recommend, HistoryRecord, PredictionResult, COUNTRIES};

const EMPTY_HISTORY: &str = "No predictions yet.";

/// 判定結果（診断・信頼度・受診先・AIアドバイス）
pub fn format_result(result: &PredictionResult) -> String {
    let mut out = String::new();
    let disease = &result.disease;

    let _ = writeln!(out, "{}: {}", disease.caption(), disease.display_text());
    let _ = writeln!(out, "Confidence: {}", result.confidence_text());
    if let Some(warning) = &result.confidence_warning {
        let _ = writeln!(out, "⚠ {}", warning);
    }

    if let Some(advice) = recommend(disease) {
        let _ = writeln!(out, "\nRecommended Consultation");
        for line in [advice.specialist, advice.physician, advice.emergency] {
            let _ = writeln!(out, "  • {}", line);
        }
    }

    let mut advisory = format_advisory(&result.ai_response).peekable();
    if advisory.peek().is_some() {
        let _ = writeln!(out, "\nAI Medical Advice");
        for line in advisory {
            let _ = match line {
                AdvisoryLine::Heading(heading) => writeln!(out, "\n■ {}", heading.title()),
                AdvisoryLine::Bullet(text) => writeln!(out, "  • {}", text),
                AdvisoryLine::Paragraph(text) => writeln!(out, "{}", text),
            };
        }
    }

    out
}

/// 履歴テーブル
pub fn format_history(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", EMPTY_HISTORY);
    }

    let header = ["Date", "Time", "Name", "Phone", "Disease", "Confidence"];
    let rows: Vec<[String; 6]> = records
        .iter()
        .map(|r| {
            [
                r.date_part().to_string(),
                r.time_part().to_string(),
                r.patient_name.clone(),
                r.patient_phone.clone(),
                r.disease.label().to_string(),
                format!("{}%", r.confidence),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, header.iter().copied(), &widths);
    push_row(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<I, S>(out: &mut String, cells: I, widths: &[usize])
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = cells
        .into_iter()
        .zip(widths)
        .map(|(cell, width)| {
            let cell = cell.as_ref();
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// 対応国一覧
pub fn format_countries() -> String {
    let mut out = String::new();
    for (i, rule) in COUNTRIES.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {:<10} {:<5} {} digits", i + 1, rule.name, rule.code, rule.digits);
    }
    out
}
