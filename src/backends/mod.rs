// SPDX-License-Identifier: GPL-3.0-only

//! Hardware provider abstraction
//!
//! The capture pipeline consumes two device capabilities behind traits so it
//! can run against real hardware, a file-backed virtual camera, or in-memory
//! fakes in tests:
//!
//! - [`camera`]: live stream + still capture
//! - [`location`]: one-shot geolocation fix

pub mod camera;
pub mod location;
