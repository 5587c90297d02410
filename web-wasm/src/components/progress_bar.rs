//! プログレスバーコンポーネント（進捗率の無い処理中表示）

use leptos::prelude::*;

#[component]
pub fn ProgressBar(#[prop(into)] label: Signal<String>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar"></div>
            <p class="progress-text">{move || label.get()}</p>
        </div>
    }
}
