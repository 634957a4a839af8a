use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::InductionView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", InductionView)] Induction {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Site Induction" }
                p { class: "app-tagline", "Visitor safety training" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
