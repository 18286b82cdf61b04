//! Viewer orchestration: one value owning everything a dataset view needs —
//! the catalog entry, the validated document, the derived filters, the
//! normalized series, and playback — with an explicit lifecycle. The UI
//! layer only draws this state and forwards input to it.

use std::time::Instant;

use crate::catalog::CatalogEntry;
use crate::dataset::DatasetDocument;
use crate::filters::{derive_filters, FilterSet};
use crate::format;
use crate::playback::PlaybackController;
use crate::series::{compute_series, Series, SeriesPoint, GLOBAL_FILTER};

pub struct ViewerState {
    pub entry: CatalogEntry,
    pub doc: DatasetDocument,
    pub filters: FilterSet,
    pub current_filter: String,
    pub series: Series,
    pub playback: PlaybackController,
    /// Latest assistive-technology announcement, refreshed on every index
    /// or filter change.
    pub announcement: String,
    value_label: String,
}

impl ViewerState {
    /// Construct on view entry: derive filters once, default the selection
    /// to `"global"`, and show the most recent year first.
    pub fn new(entry: CatalogEntry, doc: DatasetDocument) -> Self {
        let filters = derive_filters(&doc);
        let series = compute_series(&doc, GLOBAL_FILTER, filters.field.as_deref());
        let value_label = doc.value_field_label();

        let mut playback = PlaybackController::new();
        if !series.is_empty() {
            playback.end(series.len());
        }

        let mut state = ViewerState {
            entry,
            doc,
            filters,
            current_filter: GLOBAL_FILTER.to_string(),
            series,
            playback,
            announcement: String::new(),
            value_label,
        };
        state.refresh_announcement();
        state
    }

    /// Tear down on view exit: cancel any pending animation tick.
    pub fn dispose(&mut self) {
        self.playback.stop();
    }

    pub fn unit(&self) -> &str {
        &self.doc.metadata.unit
    }

    pub fn value_label(&self) -> &str {
        &self.value_label
    }

    pub fn current_index(&self) -> usize {
        self.playback.current_index()
    }

    pub fn current_point(&self) -> Option<SeriesPoint> {
        self.series.get(self.current_index()).copied()
    }

    /// (first, last) year of the active series.
    pub fn year_range(&self) -> Option<(i64, i64)> {
        match (self.series.first(), self.series.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        }
    }

    /// Switch the active filter. Stops playback before mutating anything so
    /// a scheduled tick cannot land on the old series, then recomputes and
    /// clamps the index into the new range.
    pub fn set_filter(&mut self, filter: &str) {
        self.playback.stop();
        self.current_filter = filter.to_string();
        self.series = compute_series(&self.doc, filter, self.filters.field.as_deref());
        self.playback.clamp_to(self.series.len());
        log::debug!(
            "filter {} -> {} points (dataset {})",
            filter,
            self.series.len(),
            self.entry.id
        );
        self.refresh_announcement();
    }

    /// Slider scrub. Ignored while playing.
    pub fn scrub_to(&mut self, index: usize) {
        if self.playback.set_index(index, self.series.len()) {
            self.refresh_announcement();
        }
    }

    pub fn key_left(&mut self) {
        if self.playback.step_back(self.series.len()) {
            self.refresh_announcement();
        }
    }

    pub fn key_right(&mut self) {
        if self.playback.step_forward(self.series.len()) {
            self.refresh_announcement();
        }
    }

    pub fn key_home(&mut self) {
        if self.playback.home(self.series.len()) {
            self.refresh_announcement();
        }
    }

    pub fn key_end(&mut self) {
        if self.playback.end(self.series.len()) {
            self.refresh_announcement();
        }
    }

    pub fn toggle_play(&mut self, now: Instant) {
        if self.playback.is_playing() {
            self.playback.stop();
        } else {
            self.playback.play(now, self.series.len());
        }
    }

    /// Advance the animation if due. Returns the revealed index.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let index = self.playback.poll(now, self.series.len())?;
        self.refresh_announcement();
        Some(index)
    }

    fn refresh_announcement(&mut self) {
        self.announcement = match self.current_point() {
            Some(point) => format::announcement(
                point.year,
                &self.current_filter,
                &self.value_label,
                point.value,
                self.unit(),
            ),
            None => String::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetFile;
    use crate::format::format_value;

    fn state(json: &str) -> ViewerState {
        let file: DatasetFile = serde_json::from_str(json).unwrap();
        let doc = DatasetDocument::from_file(file).unwrap();
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"id": "t", "title": "Test", "file_path": "data/t.json"}"#,
        )
        .unwrap();
        ViewerState::new(entry, doc)
    }

    const REGIONAL: &str = r#"{
        "metadata": {"unit": "people"},
        "fields": [{"name": "year", "type": "integer"},
                   {"name": "value", "type": "number", "description": "Population"}],
        "data": [
            {"year": 2000, "value": 5, "region": "EU"},
            {"year": 2001, "value": 6, "region": "EU"},
            {"year": 2002, "value": 7, "region": "EU"},
            {"year": 2000, "value": 7, "region": "US"}
        ]
    }"#;

    #[test]
    fn init_defaults_to_global_and_last_index() {
        let state = state(REGIONAL);
        assert_eq!(state.current_filter, GLOBAL_FILTER);
        // Aggregated years 2000..=2002, most recent shown first.
        assert_eq!(state.series.len(), 3);
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.current_point().unwrap().year, 2002);
        assert_eq!(state.year_range(), Some((2000, 2002)));
    }

    #[test]
    fn filter_change_recomputes_and_clamps() {
        let mut state = state(REGIONAL);
        assert_eq!(state.current_index(), 2);
        state.set_filter("US");
        // US has a single point; the stale index 2 clamps to 0.
        assert_eq!(state.series.len(), 1);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.current_point().unwrap().value, 7.0);
    }

    #[test]
    fn filter_round_trip_yields_identical_series() {
        let mut state = state(REGIONAL);
        state.set_filter("EU");
        let first = state.series.clone();
        state.set_filter(GLOBAL_FILTER);
        state.set_filter("EU");
        assert_eq!(first, state.series);
    }

    #[test]
    fn filter_change_stops_playback() {
        let mut state = state(REGIONAL);
        state.toggle_play(Instant::now());
        assert!(state.playback.is_playing());
        state.set_filter("EU");
        assert!(!state.playback.is_playing());
    }

    #[test]
    fn keyboard_navigation_clamps_at_bounds() {
        let mut state = state(REGIONAL);
        state.key_home();
        assert_eq!(state.current_index(), 0);
        state.key_left();
        assert_eq!(state.current_index(), 0);
        state.key_end();
        assert_eq!(state.current_index(), state.series.len() - 1);
        state.key_right();
        assert_eq!(state.current_index(), state.series.len() - 1);
    }

    #[test]
    fn playback_reveals_whole_series_through_viewer() {
        let mut state = state(REGIONAL);
        state.toggle_play(Instant::now());
        let mut steps = Vec::new();
        while let Some(due) = state.playback.next_tick() {
            if let Some(idx) = state.tick(due) {
                steps.push(idx);
            }
        }
        assert_eq!(steps, vec![0, 1, 2]);
        assert!(!state.playback.is_playing());
    }

    #[test]
    fn scrub_ignored_while_playing() {
        let mut state = state(REGIONAL);
        state.toggle_play(Instant::now());
        let before = state.current_index();
        state.scrub_to(2);
        assert_eq!(state.current_index(), before);
    }

    #[test]
    fn announcement_tracks_index_and_filter() {
        let mut state = state(REGIONAL);
        state.set_filter("EU");
        state.key_home();
        assert_eq!(state.announcement, "Year 2000 in EU, Population: 5");
        state.key_right();
        assert_eq!(state.announcement, "Year 2001 in EU, Population: 6");
    }

    #[test]
    fn temperature_scenario() {
        let state = state(
            r#"{
                "metadata": {"unit": "°C"},
                "fields": [],
                "summary": [{"year": 2000, "value": 10}, {"year": 2001, "value": 20}]
            }"#,
        );
        assert_eq!(state.series.len(), 2);
        let point = state.current_point().unwrap();
        assert_eq!(point.year, 2001);
        assert_eq!(format_value(point.value, state.unit()), "+20.00°C");
    }
}
