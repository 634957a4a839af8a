use induction_core::model::Playlist;

use super::time_fmt::format_clock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentState {
    Watched,
    Current,
    Upcoming,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SegmentChipVm {
    pub title: &'static str,
    pub width_percent: f64,
    pub state: SegmentState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoVm {
    pub title: &'static str,
    pub description: &'static str,
    pub video_file: &'static str,
    pub poster: &'static str,
    pub section_label: String,
    pub time_label: String,
    pub segments: Vec<SegmentChipVm>,
    pub can_go_back: bool,
    pub next_label: &'static str,
}

#[must_use]
pub fn map_video(playlist: &Playlist, index: usize) -> Option<VideoVm> {
    let segment = playlist.segment(index)?;
    let total = playlist.len();
    let segments = playlist
        .segments()
        .iter()
        .enumerate()
        .map(|(i, s)| SegmentChipVm {
            title: s.title,
            width_percent: playlist.width_percent(i),
            state: match i.cmp(&index) {
                std::cmp::Ordering::Less => SegmentState::Watched,
                std::cmp::Ordering::Equal => SegmentState::Current,
                std::cmp::Ordering::Greater => SegmentState::Upcoming,
            },
        })
        .collect();

    Some(VideoVm {
        title: segment.title,
        description: segment.description,
        video_file: segment.video_file,
        poster: segment.poster,
        section_label: format!("Section {} of {total}", index + 1),
        time_label: format!(
            "{} / {}",
            format_clock(playlist.elapsed_before(index)),
            format_clock(playlist.total_secs())
        ),
        segments,
        can_go_back: index > 0,
        next_label: if index + 1 >= total {
            "Start Assessment"
        } else {
            "Next Video"
        },
    })
}
