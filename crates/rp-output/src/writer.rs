//! The `FrameWriter` trait implemented by output backends.

use crate::{FrameRow, OutputResult, PhaseEventRow};

/// Implemented by each output backend.
///
/// Errors are stored by [`FrameRecorder`](crate::FrameRecorder) and
/// retrieved with [`take_error`](crate::FrameRecorder::take_error), since
/// observer hooks cannot fail.
pub trait FrameWriter {
    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()>;

    fn write_phase_event(&mut self, row: &PhaseEventRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
