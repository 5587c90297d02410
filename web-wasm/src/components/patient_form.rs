//! 患者情報フォーム

use leptos::prelude::*;
use xray_common::country::{self, COUNTRIES};
use xray_common::Gender;
use crate::app::SessionSignal;

#[component]
pub fn PatientForm<FH>(session: SessionSignal, on_show_history: FH) -> impl IntoView
where
    FH: Fn(()) + 'static + Clone,
{
    let name = move || session.with(|s| s.form().name().to_string());
    let age = move || session.with(|s| s.form().age().to_string());
    let gender = move || session.with(|s| s.form().gender().as_str());
    let country_index = move || session.with(|s| country::index_of(s.form().phone().country()).to_string());
    let phone_digits = move || session.with(|s| s.form().phone().digits().to_string());
    let phone_placeholder = move || session.with(|s| s.form().phone().placeholder());

    view! {
        <div class="glass-card">
            <h3 class="card-title">"Patient Details"</h3>

            <div class="patient-form">
                <input
                    type="text"
                    placeholder="Patient Name"
                    prop:value=name
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        session.update(|s| s.form_mut().set_name(&value));
                    }
                />

                <input
                    type="text"
                    placeholder="Age"
                    prop:value=age
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        session.update(|s| s.form_mut().set_age(&value));
                    }
                />

                <select
                    prop:value=gender
                    on:change=move |ev| {
                        let value = Gender::parse(&event_target_value(&ev));
                        session.update(|s| s.form_mut().set_gender(value));
                    }
                >
                    <option value="">"Select Gender"</option>
                    {Gender::CHOICES
                        .iter()
                        .map(|g| view! { <option value=g.as_str()>{g.as_str()}</option> })
                        .collect_view()}
                </select>

                <div class="phone-wrapper">
                    <select
                        class="country-dropdown"
                        prop:value=country_index
                        on:change=move |ev| {
                            let selected = event_target_value(&ev)
                                .parse::<usize>()
                                .ok()
                                .and_then(country::by_index);
                            if let Some(rule) = selected {
                                session.update(|s| s.form_mut().select_country(rule));
                            }
                        }
                    >
                        {COUNTRIES
                            .iter()
                            .enumerate()
                            .map(|(i, c)| view! { <option value=i.to_string()>{c.label()}</option> })
                            .collect_view()}
                    </select>

                    <input
                        type="text"
                        class="phone-input"
                        placeholder=phone_placeholder
                        prop:value=phone_digits
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            session.update(|s| s.form_mut().set_phone(&value));
                        }
                    />
                </div>

                <div class="history-btn-wrapper">
                    <button class="nav-btn" on:click=move |_| on_show_history(())>
                        "View History"
                    </button>
                </div>
            </div>
        </div>
    }
}
