use dioxus::prelude::*;

use crate::vm::{SegmentState, VideoVm, WorkflowIntent};

#[component]
pub fn VideoStep(vm: VideoVm, on_intent: EventHandler<WorkflowIntent>) -> Element {
    let chips = vm.segments.iter().map(|chip| {
        let class = match chip.state {
            SegmentState::Watched => "segment segment--watched",
            SegmentState::Current => "segment segment--current",
            SegmentState::Upcoming => "segment",
        };
        rsx! {
            div {
                class,
                style: "width: {chip.width_percent:.2}%",
                title: chip.title,
            }
        }
    });

    rsx! {
        section { class: "card video-step",
            header { class: "view-header",
                p { class: "view-eyebrow", "{vm.section_label}" }
                h2 { class: "view-title", "{vm.title}" }
            }
            video {
                key: "{vm.video_file}",
                class: "video-player",
                src: vm.video_file,
                poster: vm.poster,
                controls: true,
                preload: "metadata",
                onended: move |_| on_intent.call(WorkflowIntent::NextSegment),
            }
            div { class: "segment-bar", {chips} }
            p { class: "video-time", "{vm.time_label}" }
            p { class: "video-description", "{vm.description}" }
            div { class: "actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.can_go_back,
                    onclick: move |_| on_intent.call(WorkflowIntent::PreviousSegment),
                    "Previous"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_intent.call(WorkflowIntent::NextSegment),
                    "{vm.next_label}"
                }
            }
        }
    }
}
