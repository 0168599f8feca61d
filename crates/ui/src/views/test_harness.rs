use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use markeasy_core::PlaybackSettings;
use services::{AppServices, ReaderService, SpeechEngine};

use crate::context::{UiApp, build_app_context};
use crate::views::reader::ReaderTestHandles;
use crate::views::{ReaderView, SettingsView};

#[derive(Clone)]
struct TestApp {
    reader: Arc<ReaderService>,
}

impl UiApp for TestApp {
    fn reader(&self) -> Arc<ReaderService> {
        Arc::clone(&self.reader)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Reader,
    Settings,
}

/// Lets a test swap the mounted view after the first render.
#[derive(Clone, Default)]
pub struct ViewSwitch {
    view: Rc<RefCell<Option<Signal<ViewKind>>>>,
}

impl ViewSwitch {
    fn register(&self, view: Signal<ViewKind>) {
        *self.view.borrow_mut() = Some(view);
    }

    pub fn show(&self, next: ViewKind) {
        let mut view = (*self.view.borrow()).expect("view switch registered");
        view.set(next);
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    switch: ViewSwitch,
    reader_handles: ReaderTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let view = use_context_provider(|| Signal::new(props.view));
    use_context_provider(|| props.reader_handles.clone());
    use_hook(|| props.switch.register(view));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<Signal<ViewKind>>();
    match view() {
        ViewKind::Reader => rsx! { ReaderView {} },
        ViewKind::Settings => rsx! { SettingsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub reader: Arc<ReaderService>,
    pub switch: ViewSwitch,
    pub reader_handles: ReaderTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn drive(&mut self) {
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_settings(view, PlaybackSettings::default())
}

pub fn setup_view_harness_with_settings(
    view: ViewKind,
    settings: PlaybackSettings,
) -> ViewHarness {
    let reader = AppServices::silent(settings).reader();
    build_harness(view, reader)
}

pub fn setup_view_harness_with_speech(
    view: ViewKind,
    settings: PlaybackSettings,
    speech: Arc<dyn SpeechEngine>,
) -> ViewHarness {
    let reader = AppServices::new(speech, settings).reader();
    build_harness(view, reader)
}

fn build_harness(view: ViewKind, reader: Arc<ReaderService>) -> ViewHarness {
    let app = Arc::new(TestApp {
        reader: Arc::clone(&reader),
    });
    let switch = ViewSwitch::default();
    let reader_handles = ReaderTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            switch: switch.clone(),
            reader_handles: reader_handles.clone(),
        },
    );
    ViewHarness {
        dom,
        reader,
        switch,
        reader_handles,
    }
}
