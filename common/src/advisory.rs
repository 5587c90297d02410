//! AIアドバイス文の整形
//!
//! 改行区切りの自由文を、見出し・箇条書き・段落の行要素に分類する。
//! 入力を借用する遅延イテレータで、クローンすれば先頭からやり直せる。

use std::iter::FusedIterator;
use std::str::Lines;

/// 見出しの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    Summary,
    CommonSymptoms,
    Precautions,
    Preventions,
    /// "Precautions for X" の X（大文字）
    PrecautionsFor(String),
}

impl Heading {
    pub fn title(&self) -> &str {
        match self {
            Heading::Summary => "SUMMARY",
            Heading::CommonSymptoms => "COMMON SYMPTOMS",
            Heading::Precautions => "PRECAUTIONS",
            Heading::Preventions => "PREVENTIONS",
            Heading::PrecautionsFor(subject) => subject,
        }
    }
}

/// 分類済みの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryLine<'a> {
    Heading(Heading),
    Bullet(&'a str),
    Paragraph(&'a str),
}

impl AdvisoryLine<'_> {
    pub fn text(&self) -> &str {
        match self {
            AdvisoryLine::Heading(heading) => heading.title(),
            AdvisoryLine::Bullet(text) | AdvisoryLine::Paragraph(text) => text,
        }
    }
}

/// 行要素のイテレータ
#[derive(Debug, Clone)]
pub struct AdvisoryLines<'a> {
    lines: Lines<'a>,
}

impl<'a> Iterator for AdvisoryLines<'a> {
    type Item = AdvisoryLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?.trim();
            if !line.is_empty() {
                return Some(classify_line(line));
            }
        }
    }
}

impl FusedIterator for AdvisoryLines<'_> {}

/// アドバイス文を行要素に分解
pub fn format_advisory(text: &str) -> AdvisoryLines<'_> {
    AdvisoryLines { lines: text.lines() }
}

/// 1行を分類（前後の空白は除去済みであること）
pub fn classify_line(line: &str) -> AdvisoryLine<'_> {
    if let Some(subject) = precautions_subject(line) {
        return AdvisoryLine::Heading(Heading::PrecautionsFor(subject.to_uppercase()));
    }

    let upper = line.to_uppercase();
    if upper.contains("SUMMARY") {
        return AdvisoryLine::Heading(Heading::Summary);
    }
    if upper.contains("COMMON SYMPTOMS") {
        return AdvisoryLine::Heading(Heading::CommonSymptoms);
    }
    if upper.contains("PRECAUTIONS") {
        return AdvisoryLine::Heading(Heading::Precautions);
    }
    if upper.contains("PREVENTION MEASURES") || upper.contains("PREVENTIONS") {
        return AdvisoryLine::Heading(Heading::Preventions);
    }

    if let Some(rest) = line.strip_prefix(['-', '*']) {
        return AdvisoryLine::Bullet(rest.trim());
    }

    AdvisoryLine::Paragraph(line)
}

/// "Precautions for X"（先頭の "Heading:" は無視）から X を取り出す
fn precautions_subject(line: &str) -> Option<&str> {
    const LABEL: &str = "heading:";
    const PREFIX: &str = "precautions for";

    let line = match line.get(..LABEL.len()) {
        Some(head) if head.eq_ignore_ascii_case(LABEL) => line[LABEL.len()..].trim_start(),
        _ => line,
    };

    let head = line.get(..PREFIX.len())?;
    if !head.eq_ignore_ascii_case(PREFIX) {
        return None;
    }

    // "Precautions formulated ..." のような語の途中は対象外
    let rest = &line[PREFIX.len()..];
    if !(rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ':')) {
        return None;
    }

    let subject = rest.trim().trim_start_matches(':').trim_end_matches(':').trim();
    (!subject.is_empty()).then_some(subject)
}
