//! About / Contact モーダル

use leptos::prelude::*;

/// 表示中の情報ページ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoPage {
    About,
    Contact,
}

#[component]
pub fn InfoModal<FC>(page: InfoPage, on_close: FC) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone,
{
    let body = match page {
        InfoPage::About => view! {
            <h2>"About This Project"</h2>
            <p>
                "This system uses a deep learning model to classify chest X-ray images as "
                "Normal, Pneumonia, COVID-19 or Tuberculosis."
            </p>
            <p>
                "Grad-CAM heatmaps highlight the lung regions that influenced the prediction, "
                "and an AI assistant summarizes symptoms, precautions and prevention measures."
            </p>
        }
        .into_any(),
        InfoPage::Contact => view! {
            <h2>"Contact Us"</h2>
            <p>"For questions or feedback about this project, please reach out to the development team."</p>
            <p>"This tool does not replace a consultation with a qualified medical professional."</p>
        }
        .into_any(),
    };

    view! {
        <div class="modal-overlay">
            <div class="modal-box">
                {body}
                <button class="nav-btn" on:click=move |_| on_close(())>
                    "Close"
                </button>
            </div>
        </div>
    }
}
