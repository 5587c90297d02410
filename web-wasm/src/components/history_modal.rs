//! 予測履歴モーダル

use leptos::prelude::*;
use xray_common::HistoryRecord;
use crate::app::SessionSignal;

#[component]
pub fn HistoryModal<FC, FX>(session: SessionSignal, on_close: FC, on_clear: FX) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone,
    FX: Fn(()) + 'static + Clone,
{
    let records = Memo::new(move |_| session.with(|s| s.history().records().to_vec()));

    view! {
        <div class="modal-overlay">
            <div class="modal-box history-box">
                <h2>"Prediction History"</h2>

                {move || {
                    let records = records.get();
                    if records.is_empty() {
                        view! { <p class="history-empty">"No predictions yet."</p> }.into_any()
                    } else {
                        view! {
                            <table class="history-table">
                                <thead>
                                    <tr>
                                        <th>"Date"</th>
                                        <th>"Time"</th>
                                        <th>"Name"</th>
                                        <th>"Phone"</th>
                                        <th>"Disease"</th>
                                        <th>"Confidence"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {records.iter().map(history_row).collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_any()
                    }
                }}

                <div class="modal-actions">
                    <button class="btn-danger" on:click=move |_| on_clear(())>
                        "Clear History"
                    </button>
                    <button class="nav-btn" on:click=move |_| on_close(())>
                        "Close"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn history_row(record: &HistoryRecord) -> impl IntoView {
    view! {
        <tr>
            <td>{record.date_part().to_string()}</td>
            <td>{record.time_part().to_string()}</td>
            <td>{record.patient_name.clone()}</td>
            <td>{record.patient_phone.clone()}</td>
            <td>{record.disease.label().to_string()}</td>
            <td>{format!("{}%", record.confidence)}</td>
        </tr>
    }
}
