//! # hdrcal-sequencer
//!
//! The calibration run as a state machine.
//!
//! - [`TestId`] - The 47 screens in run order
//! - [`TestDescriptor`] - Per-test timer, adjust policy and slider handling
//! - [`Sequencer`] - Navigation, timers, adjustment, per-frame output
//! - [`FrameOutput`] - What a renderer draws and which metadata it sends
//! - [`Command`] - The input vocabulary
//!
//! # Frame Loop
//!
//! ```rust
//! use hdrcal_display::{DisplayInfo, StaticProvider};
//! use hdrcal_sequencer::{Command, Sequencer, TestId};
//!
//! let mut provider = StaticProvider::new(DisplayInfo::hdr10_reference(1000.0, 400.0, 0.05));
//! let mut seq = Sequencer::default();
//!
//! seq.apply(Command::JumpToTest(TestId::WarmUp.index())).unwrap();
//! let frame = seq.step(&mut provider, 1.0 / 60.0);
//! assert_eq!(frame.test, TestId::WarmUp);
//! assert_eq!(frame.remaining_seconds, Some(1800.0));
//! assert!(frame.metadata_dirty);
//! ```
//!
//! Generic logic is driven by the descriptor table; only color patches,
//! checkerboard selection and the profile curve have their own code in
//! [`strategy`].

#![warn(missing_docs)]

pub mod command;
pub mod frame;
pub mod sequencer;
pub mod strategy;
pub mod table;
pub mod test_id;
pub mod timer;
pub mod value;

pub use command::Command;
pub use frame::{FrameContext, FrameOutput, Patch, Selection, compute_frame};
pub use sequencer::{SHIFT_MULTIPLIER, Sequencer};
pub use strategy::{Checkerboard, ProfileCurve};
pub use table::{AdjustPolicy, SliderPolicy, Strategy, TestDescriptor};
pub use test_id::TestId;
pub use timer::{TestTimer, TimerEvent, TimerKind};
pub use value::{IndexSlot, LevelSlot, ValueDomain, ValueRange};
