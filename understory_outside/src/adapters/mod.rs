// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Understory crates.
//!
//! Each adapter is gated behind a feature flag so the detector itself stays
//! free of host dependencies.
//!
//! ## Available Adapters
//!
//! - [`dom`] (`dom_adapter` feature): implements [`ElementTree`](crate::ElementTree)
//!   for [`understory_dom::Tree`].

#[cfg(feature = "dom_adapter")]
pub mod dom;
