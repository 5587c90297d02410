//! 画像アップロードと予測ボタン

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};
use crate::app::SessionSignal;
use crate::components::progress_bar::ProgressBar;

#[component]
pub fn UploadArea<FF, FS>(
    session: SessionSignal,
    on_file_selected: FF,
    on_submit: FS,
) -> impl IntoView
where
    FF: Fn(File) + 'static + Clone,
    FS: Fn(()) + 'static + Clone,
{
    let is_busy = move || session.with(|s| !s.can_submit());
    let file_name = Memo::new(move |_| session.with(|s| s.file_name().map(str::to_string)));
    let error = Memo::new(move |_| session.with(|s| s.error().map(str::to_string)));
    let progress_label = Signal::derive(move || {
        session.with(|s| {
            if s.is_converting() {
                "Converting HEIC image...".to_string()
            } else {
                "Analyzing X-ray...".to_string()
            }
        })
    });

    view! {
        <div class="glass-card">
            <h3 class="card-title">"Upload Chest X-ray Image"</h3>
            <p class="card-subtitle">"Supported formats: JPG, PNG, JPEG, WEBP, HEIC"</p>

            <div class="upload-controls">
                <label class="btn-primary">
                    "Choose File"
                    <input
                        type="file"
                        accept="image/*,.heic,.heif"
                        hidden=true
                        on:change=move |ev| {
                            if let Some(file) = selected_file(&ev) {
                                on_file_selected(file);
                            }
                        }
                    />
                </label>

                <button
                    class="btn-primary"
                    disabled=is_busy
                    on:click=move |_| on_submit(())
                >
                    {move || session.with(|s| s.submit_label())}
                </button>
            </div>

            <div class="file-info">
                {move || match file_name.get() {
                    Some(name) => view! { <span class="file-name">"Selected: "{name}</span> }.into_any(),
                    None => view! { <span class="file-placeholder">"No file selected"</span> }.into_any(),
                }}
            </div>

            <Show when=is_busy>
                <ProgressBar label=progress_label />
            </Show>

            {move || error.get().map(|text| view! { <p class="error-text">{text}</p> })}
        </div>
    }
}

/// input[type=file] から1枚目を取り出す（同じファイルを再選択できるよう値は消す）
fn selected_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    let file = input.files()?.get(0);
    input.set_value("");
    file
}
