use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{SettingsFormVm, apply_settings_form, map_settings_form};

#[derive(Clone, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saved,
    Error(String),
}

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let reader = ctx.reader();

    let mut form = use_signal({
        let reader = reader.clone();
        move || map_settings_form(&reader.settings())
    });
    let mut save_state = use_signal(|| SaveState::Idle);

    let on_save = {
        let reader = reader.clone();
        move |_: MouseEvent| match apply_settings_form(reader.settings(), &form()) {
            Ok(settings) => {
                reader.set_settings(settings);
                form.set(map_settings_form(&settings));
                save_state.set(SaveState::Saved);
            }
            Err(err) => save_state.set(SaveState::Error(err.message())),
        }
    };

    let form_value = form();
    let status = match save_state() {
        SaveState::Idle => rsx! {},
        SaveState::Saved => rsx! {
            span { class: "settings-status", "Saved" }
        },
        SaveState::Error(message) => rsx! {
            span { class: "settings-status settings-status--error", "{message}" }
        },
    };

    rsx! {
        div { class: "page settings-page",
            h2 { "Playback" }
            div { class: "settings-card",
                div { class: "settings-row",
                    label { "Delay between answers (ms)" }
                    input {
                        r#type: "number",
                        min: "0",
                        inputmode: "numeric",
                        value: "{form_value.step_delay_ms}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.step_delay_ms = evt.value();
                            form.set(next);
                            save_state.set(SaveState::Idle);
                        },
                    }
                }
                div { class: "settings-row",
                    label { "Pause between passes (ms)" }
                    input {
                        r#type: "number",
                        min: "0",
                        inputmode: "numeric",
                        value: "{form_value.pass_gap_ms}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.pass_gap_ms = evt.value();
                            form.set(next);
                            save_state.set(SaveState::Idle);
                        },
                    }
                }
                {toggle_row(
                    "Wait for speech to finish",
                    form_value.wait_for_speech,
                    form,
                    save_state,
                    |next: &mut SettingsFormVm| next.wait_for_speech = !next.wait_for_speech,
                )}
                {toggle_row(
                    "Speak as typed (Number 1.A)",
                    form_value.verbatim,
                    form,
                    save_state,
                    |next: &mut SettingsFormVm| next.verbatim = !next.verbatim,
                )}
            }
            div { class: "settings-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: on_save,
                    "Save"
                }
                {status}
            }
        }
    }
}

fn toggle_row(
    label: &'static str,
    checked: bool,
    mut form: Signal<SettingsFormVm>,
    mut save_state: Signal<SaveState>,
    flip: fn(&mut SettingsFormVm),
) -> Element {
    rsx! {
        div { class: "settings-row",
            label { "{label}" }
            button {
                class: "settings-toggle",
                r#type: "button",
                role: "switch",
                aria_checked: "{checked}",
                onclick: move |_| {
                    let mut next = form();
                    flip(&mut next);
                    form.set(next);
                    save_state.set(SaveState::Idle);
                },
            }
        }
    }
}
