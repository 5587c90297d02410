//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::File;
use xray_common::image::is_heic;
use xray_common::session::TOAST_DURATION_MS;
use xray_common::Session;
use crate::api::backend;
use crate::components::{
    footer::Footer,
    header::Header,
    history_modal::HistoryModal,
    info_modal::{InfoModal, InfoPage},
    patient_form::PatientForm,
    result_panel::ResultPanel,
    toast::ToastBanner,
    upload_area::UploadArea,
};
use crate::config;
use crate::heic;
use crate::storage::LocalStore;

/// 画面全体の状態（File を持つのでスレッドローカル）
pub type AppSession = Session<LocalStore, File>;
pub type SessionSignal = RwSignal<AppSession, LocalStorage>;

/// 開いているモーダル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modal {
    History,
    Info(InfoPage),
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(Session::new(LocalStore));
    let backend_config = StoredValue::new(config::backend_config());
    let (modal, set_modal) = signal(None::<Modal>);

    // ダークモードをbodyのクラスに反映
    let dark_mode = Signal::derive(move || session.with(|s| s.dark_mode()));
    Effect::new(move |_| {
        let enabled = dark_mode.get();
        if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let _ = body.class_list().toggle_with_force("dark-mode", enabled);
        }
    });

    // トーストは一定時間で消す（後から出たものは消さない）
    let toast_id = Memo::new(move |_| session.with(|s| s.toast().map(|t| t.id)));
    Effect::new(move |_| {
        if let Some(id) = toast_id.get() {
            Timeout::new(TOAST_DURATION_MS, move || {
                session.update(|s| s.dismiss_toast(id));
            })
            .forget();
        }
    });

    let on_file_selected = move |file: File| {
        let name = file.name();
        let needs_conversion = is_heic(&file.type_(), &name);

        match session.try_update(|s| s.begin_file_selection(&name, needs_conversion)) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                gloo::console::warn!("File selection ignored:", e.to_string());
                return;
            }
            None => return,
        }

        if !needs_conversion {
            session.update(|s| s.finish_file_selection(file, name));
            return;
        }

        spawn_local(async move {
            match heic::convert_to_jpeg(&file).await {
                Ok(jpeg) => {
                    let jpeg_name = jpeg.name();
                    session.update(|s| s.finish_file_selection(jpeg, jpeg_name));
                }
                Err(e) => {
                    gloo::console::error!("HEIC conversion failed:", e);
                    session.update(|s| s.fail_file_selection());
                }
            }
        });
    };

    let on_submit = move |_| {
        let Some(Ok(submission)) = session.try_update(|s| s.begin_submission()) else {
            return;
        };

        spawn_local(async move {
            let config = backend_config.get_value();
            let outcome = backend::predict(&config, &submission).await;
            let timestamp = local_timestamp();
            session.update(|s| s.finish_submission(outcome, &timestamp));
        });
    };

    let on_download = move |_| {
        let Some(Ok(request)) = session.try_update(|s| s.begin_report()) else {
            return;
        };

        spawn_local(async move {
            let config = backend_config.get_value();
            let outcome = backend::download_report(&config, &request).await;
            if let Err(e) = &outcome {
                gloo::console::error!("PDF Error:", e.clone());
            }
            session.update(|s| s.finish_report(outcome));
        });
    };

    let on_clear_history = move |_| session.update(|s| s.clear_history());
    let on_toggle_dark = move |_| {
        session.update(|s| {
            s.toggle_dark_mode();
        });
    };

    view! {
        <div class="app">
            <Header
                dark_mode=dark_mode
                on_about=move |_| set_modal.set(Some(Modal::Info(InfoPage::About)))
                on_contact=move |_| set_modal.set(Some(Modal::Info(InfoPage::Contact)))
                on_toggle_dark=on_toggle_dark
            />

            <main class="main-content">
                <div class="container">
                    <PatientForm
                        session=session
                        on_show_history=move |_| set_modal.set(Some(Modal::History))
                    />
                    <UploadArea
                        session=session
                        on_file_selected=on_file_selected
                        on_submit=on_submit
                    />
                    <ResultPanel session=session on_download=on_download />
                </div>
            </main>

            {move || match modal.get() {
                Some(Modal::History) => view! {
                    <HistoryModal
                        session=session
                        on_close=move |_| set_modal.set(None)
                        on_clear=on_clear_history
                    />
                }
                .into_any(),
                Some(Modal::Info(page)) => view! {
                    <InfoModal page=page on_close=move |_| set_modal.set(None) />
                }
                .into_any(),
                None => ().into_any(),
            }}

            <ToastBanner session=session />
            <Footer />
        </div>
    }
}

/// 履歴用のローカル日時（"<日付>, <時刻>"）
fn local_timestamp() -> String {
    js_sys::Date::new_0()
        .to_locale_string("default", &JsValue::UNDEFINED)
        .into()
}
