use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{ReaderView, SettingsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ReaderView)] Reader {},
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "MarkEasy" }
                nav {
                    Link { to: Route::Reader {}, "Reader" }
                    Link { to: Route::Settings {}, "Settings" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
