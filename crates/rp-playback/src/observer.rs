//! Observer hooks for frame consumers.

use rp_motion::Phase;

use crate::{Frame, PlaybackError};

/// Callbacks invoked by [`PlaybackDriver::tick`][crate::PlaybackDriver::tick]
/// and the run loops.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — phase logger
///
/// ```rust,ignore
/// struct PhaseLog(Vec<(Phase, f64)>);
///
/// impl PlaybackObserver for PhaseLog {
///     fn on_phase_change(&mut self, _from: Option<Phase>, to: Phase, frame: &Frame) {
///         self.0.push((to, frame.elapsed));
///     }
/// }
/// ```
pub trait PlaybackObserver {
    /// Called for every rendered frame.
    fn on_frame(&mut self, _frame: &Frame) {}

    /// Called before `on_frame` when the phase differs from the previous
    /// frame's.  `from` is `None` for the first frame after a (re)load or
    /// reset.
    fn on_phase_change(&mut self, _from: Option<Phase>, _to: Phase, _frame: &Frame) {}

    /// Called once, after `on_frame`, for the frame that reaches the end.
    fn on_complete(&mut self, _frame: &Frame) {}

    /// A recoverable error surfaced by the real-time loop (e.g. a failed
    /// refetch).  Playback is stopped but the view stays open.
    fn on_error(&mut self, _error: &PlaybackError) {}
}

/// A [`PlaybackObserver`] that does nothing.
pub struct NoopObserver;

impl PlaybackObserver for NoopObserver {}
