//! トースト通知

use leptos::prelude::*;
use crate::app::SessionSignal;

#[component]
pub fn ToastBanner(session: SessionSignal) -> impl IntoView {
    let message = Memo::new(move |_| session.with(|s| s.toast().map(|t| t.message.clone())));

    move || message.get().map(|text| view! { <div class="toast">{text}</div> })
}
