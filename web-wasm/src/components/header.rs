//! ナビゲーションバー

use leptos::prelude::*;

#[component]
pub fn Header<FA, FC, FD>(
    dark_mode: Signal<bool>,
    on_about: FA,
    on_contact: FC,
    on_toggle_dark: FD,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone,
    FC: Fn(()) + 'static + Clone,
    FD: Fn(()) + 'static + Clone,
{
    view! {
        <div class="navbar">
            <div class="navbar-center">
                <h2 class="navbar-title">"Chest X-ray Disease Detection"</h2>
                <p class="navbar-subtitle">
                    "AI-powered detection of Pneumonia, COVID-19, Tuberculosis and Normal cases."
                </p>
            </div>

            <div class="navbar-right">
                <button class="nav-btn" on:click=move |_| on_about(())>
                    "About"
                </button>

                <button class="nav-btn" on:click=move |_| on_contact(())>
                    "Contact Us"
                </button>

                <button class="dark-toggle" on:click=move |_| on_toggle_dark(())>
                    {move || if dark_mode.get() { "☀ Light Mode" } else { "🌙 Dark Mode" }}
                </button>
            </div>
        </div>
    }
}
