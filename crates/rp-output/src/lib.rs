//! `rp-output` — recording playback frames to disk.
//!
//! | Backend | Files created                  |
//! |---------|--------------------------------|
//! | CSV     | `frames.csv`, `phase_events.csv` |
//!
//! Backends implement [`FrameWriter`] and are driven by [`FrameRecorder`],
//! which implements `rp_playback::PlaybackObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rp_output::{CsvFrameWriter, FrameRecorder};
//!
//! let writer = CsvFrameWriter::new(Path::new("./out"))?;
//! let mut rec = FrameRecorder::new(writer, 1);
//! run_headless(&mut driver, &mut rec, 1.0 / 30.0)?;
//! rec.finish();
//! if let Some(e) = rec.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod recorder;
pub mod row;
pub mod writer;


pub use csv::CsvFrameWriter;
pub use error::{OutputError, OutputResult};
pub use recorder::FrameRecorder;
pub use row::{FrameRow, PhaseEventRow};
pub use writer::FrameWriter;
