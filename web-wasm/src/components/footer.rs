//! フッター（免責表示）

use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="footer">
            <p>
                "⚠ Disclaimer: This AI-generated result is for educational and informational purposes only. "
                "Please consult a certified medical doctor for diagnosis and treatment."
            </p>
            <p class="footer-small">
                {format!("© {} Chest X-ray Disease Detection System", year)}
            </p>
        </footer>
    }
}
