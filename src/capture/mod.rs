// SPDX-License-Identifier: GPL-3.0-only

//! Capture session state machine
//!
//! Drives the full photo flow of the complaint form:
//!
//! ```text
//! Idle → Acquiring → Streaming → Captured → Review → Confirmed
//!            │            │          │         │
//!            │            │          │         └── retake() → Acquiring
//!            └────────────┴──────────┴── close() → Closed
//! ```
//!
//! Camera and geolocation are requested concurrently on `open()`; capture is
//! blocked until a fix exists; the geocode → stamp → review sequence runs
//! per capture; and a generation counter discards results from superseded
//! cycles (see [`controller`]).

pub mod artifact;
pub mod controller;

pub use artifact::CapturedArtifact;
pub use controller::{CaptureController, CaptureOutcome, CaptureState};
