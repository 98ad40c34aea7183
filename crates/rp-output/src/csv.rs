//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `frames.csv`
//! - `phase_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::FrameWriter;
use crate::{FrameRow, OutputResult, PhaseEventRow};

/// Writes playback output to two CSV files.  Missing values are empty cells.
pub struct CsvFrameWriter {
    frames:   Writer<File>,
    events:   Writer<File>,
    finished: bool,
}

impl CsvFrameWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut frames = Writer::from_path(dir.join("frames.csv"))?;
        frames.write_record([
            "frame", "elapsed", "progress", "status", "phase", "waypoint", "next_waypoint",
            "lat", "lng", "heading", "speed_kmh", "distance_remaining_km", "eta_secs",
            "camera_heading", "camera_tilt", "camera_zoom", "trail_len", "label",
        ])?;

        let mut events = Writer::from_path(dir.join("phase_events.csv"))?;
        events.write_record(["elapsed", "from", "to", "waypoint"])?;

        Ok(Self { frames, events, finished: false })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl FrameWriter for CsvFrameWriter {
    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()> {
        self.frames.write_record(&[
            row.frame.to_string(),
            row.elapsed.to_string(),
            row.progress.to_string(),
            row.status.to_string(),
            row.phase.to_string(),
            row.waypoint.to_string(),
            opt(row.next_waypoint),
            row.lat.to_string(),
            row.lng.to_string(),
            row.heading.to_string(),
            row.speed_kmh.to_string(),
            opt(row.distance_remaining_km),
            opt(row.eta_secs),
            row.camera_heading.to_string(),
            row.camera_tilt.to_string(),
            row.camera_zoom.to_string(),
            row.trail_len.to_string(),
            row.label.clone().unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn write_phase_event(&mut self, row: &PhaseEventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.elapsed.to_string(),
            opt(row.from),
            row.to.to_string(),
            row.waypoint.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.frames.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
