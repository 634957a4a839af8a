use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use induction_core::time::fixed_now;
use services::{AppServices, Clock, LookupService, SubmissionService};
use storage::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::InductionView;
use crate::views::induction::InductionTestSeed;

struct TestApp {
    services: AppServices,
    clock: Clock,
}

impl UiApp for TestApp {
    fn lookup(&self) -> Arc<LookupService> {
        self.services.lookup()
    }

    fn submission(&self) -> Arc<SubmissionService> {
        self.services.submission()
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    seed: InductionTestSeed,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.seed.clone());
    rsx! { InductionView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
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

    /// Let queued workflow effects run to completion.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
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

pub fn setup_view_harness(seed: InductionTestSeed) -> ViewHarness {
    setup_view_harness_with_storage(seed, &Storage::in_memory())
}

pub fn setup_view_harness_with_storage(seed: InductionTestSeed, storage: &Storage) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let app = Arc::new(TestApp {
        services: AppServices::from_storage(storage, clock),
        clock,
    });
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, seed });
    ViewHarness { dom }
}
