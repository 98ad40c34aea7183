//! `FrameRecorder<W>` — bridges `PlaybackObserver` to a `FrameWriter`.

use rp_motion::Phase;
use rp_playback::{Frame, PlaybackObserver};

use crate::row::{FrameRow, PhaseEventRow};
use crate::writer::FrameWriter;
use crate::{OutputError, OutputResult};

/// A [`PlaybackObserver`] that records frames and phase transitions to any
/// [`FrameWriter`] backend.
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  After the run, check with
/// [`take_error`][Self::take_error].
pub struct FrameRecorder<W: FrameWriter> {
    writer:     W,
    /// Record every n-th frame.  Phase events and the final frame are
    /// always recorded.
    every:      u64,
    seen:       u64,
    written:    u64,
    last_error: Option<OutputError>,
}

impl<W: FrameWriter> FrameRecorder<W> {
    /// `every` of 0 is treated as 1.
    pub fn new(writer: W, every: u64) -> Self {
        Self { writer, every: every.max(1), seen: 0, written: 0, last_error: None }
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.written
    }

    /// Flush the writer.  Needed when a run ends without completing (e.g. a
    /// closed real-time view); completion flushes on its own.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: FrameWriter> PlaybackObserver for FrameRecorder<W> {
    fn on_frame(&mut self, frame: &Frame) {
        let n = self.seen;
        self.seen += 1;
        if n % self.every != 0 && !frame.finished {
            return;
        }
        let row = FrameRow::from_frame(n, frame);
        let result = self.writer.write_frame(&row);
        if result.is_ok() {
            self.written += 1;
        }
        self.store_err(result);
    }

    fn on_phase_change(&mut self, from: Option<Phase>, to: Phase, frame: &Frame) {
        let row = PhaseEventRow {
            elapsed:  frame.elapsed,
            from,
            to,
            waypoint: frame.waypoint_index,
        };
        let result = self.writer.write_phase_event(&row);
        self.store_err(result);
    }

    fn on_complete(&mut self, _frame: &Frame) {
        self.finish();
    }
}
