//! 予測結果表示

use leptos::prelude::*;
use xray_common::advisory::{format_advisory, AdvisoryLine};
use xray_common::image::png_data_url;
use xray_common::{recommend, DoctorRecommendation, PredictionResult};
use crate::app::SessionSignal;

#[component]
pub fn ResultPanel<FD>(session: SessionSignal, on_download: FD) -> impl IntoView
where
    FD: Fn(()) + 'static + Clone + Send + Sync,
{
    let result = Memo::new(move |_| session.with(|s| s.result().cloned()));
    let is_reporting = move || session.with(|s| s.is_reporting());

    move || {
        let on_download = on_download.clone();
        result.get().map(|result| {
            view! {
                <div class="glass-card result-card">
                    <ResultSummary result=result.clone() />
                    <ResultImages result=result.clone() />
                    {recommend(&result.disease).map(|advice| view! { <DoctorAdvice advice=advice /> })}
                    <AdvisoryText text=result.ai_response.clone() />

                    <button
                        class="btn-primary pdf-btn"
                        disabled=is_reporting
                        on:click=move |_| on_download(())
                    >
                        {move || if is_reporting() { "Generating PDF..." } else { "Download PDF Report" }}
                    </button>
                </div>
            }
        })
    }
}

#[component]
fn ResultSummary(result: PredictionResult) -> impl IntoView {
    view! {
        <div class="result-summary">
            <h3 class=format!("result-label {}", result.disease.css_class())>
                {format!("{}: {}", result.disease.caption(), result.disease.display_text())}
            </h3>
            <p class="confidence">"Confidence: "{result.confidence_text()}</p>
            {result
                .confidence_warning
                .clone()
                .map(|warning| view! { <p class="confidence-warning">"⚠ "{warning}</p> })}
        </div>
    }
}

#[component]
fn ResultImages(result: PredictionResult) -> impl IntoView {
    view! {
        <div class="result-images">
            <div class="image-box">
                <h4>"Uploaded X-ray"</h4>
                <img src=png_data_url(&result.input_image) alt="Uploaded X-ray" />
            </div>
            {result.gradcam_image.map(|gradcam| {
                view! {
                    <div class="image-box">
                        <h4>"Grad-CAM Heatmap"</h4>
                        <img src=png_data_url(&gradcam) alt="Grad-CAM heatmap" />
                    </div>
                }
            })}
        </div>
    }
}

#[component]
fn DoctorAdvice(advice: DoctorRecommendation) -> impl IntoView {
    view! {
        <div class="doctor-advice">
            <h4>"Recommended Consultation"</h4>
            <ul>
                <li>{advice.specialist}</li>
                <li>{advice.physician}</li>
                <li>{advice.emergency}</li>
            </ul>
        </div>
    }
}

/// 連続する箇条書きは1つの <ul> にまとめる
enum Block<'a> {
    Heading(String),
    List(Vec<&'a str>),
    Paragraph(&'a str),
}

fn group_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks: Vec<Block<'_>> = Vec::new();
    for line in format_advisory(text) {
        match line {
            AdvisoryLine::Heading(heading) => blocks.push(Block::Heading(heading.title().to_string())),
            AdvisoryLine::Paragraph(text) => blocks.push(Block::Paragraph(text)),
            AdvisoryLine::Bullet(text) => match blocks.last_mut() {
                Some(Block::List(items)) => items.push(text),
                _ => blocks.push(Block::List(vec![text])),
            },
        }
    }
    blocks
}

#[component]
fn AdvisoryText(text: String) -> impl IntoView {
    let blocks = group_blocks(&text)
        .into_iter()
        .map(|block| match block {
            Block::Heading(title) => view! { <h4 class="ai-heading">{title}</h4> }.into_any(),
            Block::List(items) => view! {
                <ul class="ai-list">
                    {items
                        .into_iter()
                        .map(|item| view! { <li>{item.to_string()}</li> })
                        .collect_view()}
                </ul>
            }
            .into_any(),
            Block::Paragraph(text) => view! { <p class="ai-text">{text.to_string()}</p> }.into_any(),
        })
        .collect_view();

    view! {
        <div class="ai-response">
            <h4>"AI Medical Advice"</h4>
            {blocks}
        </div>
    }
}
