/// One instructional video in the induction playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSegment {
    pub title: &'static str,
    pub video_file: &'static str,
    pub poster: &'static str,
    pub description: &'static str,
    pub estimated_secs: u32,
}

/// Ordered, fixed sequence of segments a visitor watches before the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    segments: Vec<VideoSegment>,
}

impl Playlist {
    #[must_use]
    pub fn new(segments: Vec<VideoSegment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn site_induction() -> Self {
        let segment = |title: &'static str,
                       video_file: &'static str,
                       poster: &'static str,
                       description: &'static str,
                       estimated_secs: u32| VideoSegment {
            title,
            video_file,
            poster,
            description,
            estimated_secs,
        };
        Self::new(vec![
            segment(
                "Introduction to Workplace Safety",
                "/videos/safety-1.mov",
                "/img/safety-img-1.png",
                "Learn the fundamentals of workplace safety",
                11,
            ),
            segment(
                "Personal Protective Equipment",
                "/videos/safety-2.mov",
                "/img/safety-img-2.png",
                "Proper use and maintenance of PPE",
                45,
            ),
            segment(
                "Emergency Procedures",
                "/videos/safety-3.mov",
                "/img/safety-img-3.png",
                "What to do in case of workplace emergencies",
                41,
            ),
            segment(
                "Hazard Identification",
                "/videos/safety-4.mov",
                "/img/safety-img-4.png",
                "How to identify and report workplace hazards",
                24,
            ),
            segment(
                "Safe Work Practices",
                "/videos/safety-5.mov",
                "/img/safety-img-5.png",
                "Daily practices for maintaining safety",
                27,
            ),
            segment(
                "Chemical Safety",
                "/videos/safety-6.mov",
                "/img/safety-img-6.png",
                "Handling and storage of hazardous materials",
                36,
            ),
            segment(
                "Equipment Operation",
                "/videos/safety-7.mov",
                "/img/safety-img-7.png",
                "Safe operation of workplace equipment",
                20,
            ),
            segment(
                "Safety Compliance",
                "/videos/safety-8.mov",
                "/img/safety-img-8.png",
                "Understanding safety regulations and compliance",
                17,
            ),
        ])
    }

    #[must_use]
    pub fn segments(&self) -> &[VideoSegment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&VideoSegment> {
        self.segments.get(index)
    }

    #[must_use]
    pub fn total_secs(&self) -> u32 {
        self.segments.iter().map(|s| s.estimated_secs).sum()
    }

    /// Estimated seconds of all segments before `index`.
    #[must_use]
    pub fn elapsed_before(&self, index: usize) -> u32 {
        self.segments
            .iter()
            .take(index)
            .map(|s| s.estimated_secs)
            .sum()
    }

    /// Share of the total runtime taken by the segment, in percent.
    #[must_use]
    pub fn width_percent(&self, index: usize) -> f64 {
        let total = self.total_secs();
        match self.segment(index) {
            Some(segment) if total > 0 => {
                f64::from(segment.estimated_secs) / f64::from(total) * 100.0
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_induction_playlist_totals() {
        let playlist = Playlist::site_induction();
        assert_eq!(playlist.len(), 8);
        assert_eq!(playlist.total_secs(), 221);
        assert_eq!(playlist.elapsed_before(0), 0);
        assert_eq!(playlist.elapsed_before(2), 56);
        assert_eq!(playlist.elapsed_before(99), 221);
    }

    #[test]
    fn widths_sum_to_one_hundred() {
        let playlist = Playlist::site_induction();
        let sum: f64 = (0..playlist.len()).map(|i| playlist.width_percent(i)).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!(playlist.width_percent(8).abs() < f64::EPSILON);
    }
}
