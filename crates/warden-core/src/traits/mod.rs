// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams for the Warden adapter.
//!
//! Adapters extend the [`PluginAdapter`] base trait and use `#[async_trait]`
//! for dynamic dispatch compatibility. Policies are plain synchronous traits.

pub mod adapter;
pub mod auth;
pub mod policy;

pub use adapter::PluginAdapter;
pub use auth::AuthAdapter;
pub use policy::{ClaimMatcher, PayloadPolicy};
