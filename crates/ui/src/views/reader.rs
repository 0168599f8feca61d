#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use markeasy_core::EntryId;
use services::{ReaderError, ReaderService};

use crate::context::AppContext;
use crate::vm::{EntryRowVm, map_entry_rows, reader_controls};

#[component]
pub fn ReaderView() -> Element {
    let ctx = use_context::<AppContext>();
    let reader = ctx.reader();

    let mut input = use_signal(String::new);
    let mut editing = use_signal(|| None::<EntryId>);
    let mut notice = use_signal(|| None::<String>);
    let rows = use_signal({
        let reader = reader.clone();
        move || map_entry_rows(&reader.entries())
    });
    let repeat = use_signal({
        let reader = reader.clone();
        move || reader.settings().repeat_count()
    });
    let running = use_signal({
        let reader = reader.clone();
        move || reader.is_running()
    });

    // Runs outlive this view, so the flag is read back from the service.
    use_future({
        let reader = reader.clone();
        move || {
            let reader = reader.clone();
            let mut running = running;
            async move {
                let mut updates = reader.watch_running();
                loop {
                    running.set(*updates.borrow_and_update());
                    if updates.changed().await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    let refresh = {
        let reader = reader.clone();
        move || {
            let mut rows = rows;
            rows.set(map_entry_rows(&reader.entries()));
        }
    };

    let controls = reader_controls(rows.read().len(), running(), editing().is_some());

    let on_submit = {
        let reader = reader.clone();
        let refresh = refresh.clone();
        move |_: MouseEvent| {
            let text = input();
            match editing() {
                Some(id) => match reader.update_from_text(id, &text) {
                    Ok(_) => {
                        editing.set(None);
                        input.set(String::new());
                        notice.set(None);
                    }
                    Err(err) => notice.set(Some(err.to_string())),
                },
                None => {
                    let outcome = reader.add_text(&text);
                    notice.set(outcome.warning.map(str::to_string));
                    input.set(String::new());
                }
            }
            refresh();
        }
    };

    let on_start = {
        let reader = reader.clone();
        use_callback(move |()| {
            let mut running = running;
            running.set(true);
            notice.set(None);
            start_reading(reader.clone(), notice);
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ReaderTestHandles>() {
                handles.register(on_start);
            }
        }
    }

    let on_stop = {
        let reader = reader.clone();
        move |_: MouseEvent| {
            reader.stop();
        }
    };

    let on_clear = {
        let reader = reader.clone();
        let refresh = refresh.clone();
        move |_: MouseEvent| {
            reader.clear();
            editing.set(None);
            refresh();
        }
    };

    let on_decrement = {
        let reader = reader.clone();
        move |_: MouseEvent| {
            let mut repeat = repeat;
            repeat.set(reader.decrement_repeat());
        }
    };

    let on_increment = {
        let reader = reader.clone();
        move |_: MouseEvent| {
            let mut repeat = repeat;
            repeat.set(reader.increment_repeat());
        }
    };

    let on_edit = use_callback(move |row: EntryRowVm| {
        input.set(row.edit_text);
        editing.set(Some(row.id));
    });

    let on_delete = {
        let reader = reader.clone();
        let refresh = refresh.clone();
        use_callback(move |id: EntryId| {
            reader.delete_entry(id);
            if editing() == Some(id) {
                editing.set(None);
                input.set(String::new());
            }
            refresh();
        })
    };

    let input_value = input();
    let repeat_value = repeat();

    rsx! {
        div { class: "page reader-page",
            section { class: "entry-list",
                if rows.read().is_empty() {
                    p { class: "empty", "No answers yet. Enter a key like 1.A, 2.B, 3.C" }
                }
                for row in rows() {
                    EntryRow {
                        key: "{row.id.value()}",
                        row: row.clone(),
                        on_edit,
                        on_delete,
                    }
                }
            }

            if let Some(message) = notice() {
                p { class: "notice", "{message}" }
            }

            section { class: "entry-form",
                textarea {
                    class: "entry-input",
                    placeholder: "Enter questions (e.g., 1.A, 2.B)",
                    value: "{input_value}",
                    oninput: move |evt| input.set(evt.value()),
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: on_submit,
                    "{controls.submit_label}"
                }
            }

            section { class: "reader-controls",
                div { class: "stepper",
                    button { r#type: "button", onclick: on_decrement, "-" }
                    span { class: "repeat-count", "{repeat_value}" }
                    button { r#type: "button", onclick: on_increment, "+" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !controls.can_start,
                    onclick: move |_| on_start.call(()),
                    "{controls.start_label}"
                }
                if controls.can_stop {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: on_stop,
                        "Stop"
                    }
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    disabled: !controls.can_clear,
                    onclick: on_clear,
                    "Clear All"
                }
            }
        }
    }
}

/// Starts a run on the root scope so leaving the view does not cut it short.
fn start_reading(reader: Arc<ReaderService>, mut notice: Signal<Option<String>>) {
    let _ = spawn_forever(async move {
        let message = match reader.start_playback().await {
            Ok(report) if report.cancelled => Some(format!(
                "Stopped after {} of {}.",
                report.spoken, report.total
            )),
            Ok(_) | Err(ReaderError::AlreadyRunning) => None,
            Err(err) => Some(err.to_string()),
        };
        // The view may be gone by now.
        if let (Some(message), Ok(mut slot)) = (message, notice.try_write()) {
            *slot = Some(message);
        }
    });
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ReaderTestHandles {
    start: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl ReaderTestHandles {
    pub(crate) fn register(&self, start: Callback<()>) {
        *self.start.borrow_mut() = Some(start);
    }

    pub(crate) fn start(&self) -> Callback<()> {
        (*self.start.borrow()).expect("reader start registered")
    }
}

#[component]
fn EntryRow(
    row: EntryRowVm,
    on_edit: Callback<EntryRowVm>,
    on_delete: Callback<EntryId>,
) -> Element {
    let id = row.id;
    let row_for_edit = row.clone();
    rsx! {
        div { class: "entry-row",
            span { class: "entry-label", "{row.label}" }
            button {
                class: "link-btn",
                r#type: "button",
                onclick: move |_| on_edit.call(row_for_edit.clone()),
                "Edit"
            }
            button {
                class: "link-btn link-btn--danger",
                r#type: "button",
                onclick: move |_| on_delete.call(id),
                "Delete"
            }
        }
    }
}
