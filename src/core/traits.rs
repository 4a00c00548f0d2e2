// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Core Traits Module
//!
//! This module defines the capabilities every part of Notiflow is built on.
//!
//! ## Key Traits
//!
//! - [`ContentProvider`]: anything that can produce a content string
//! - [`IntoShared`]: converts a provider into a [`SharedProvider`] handle
//! - [`Clock`]: the time source injected into time-dependent decorators
//!
//! ## Design Philosophy
//!
//! - **Single capability**: a provider exposes exactly one query, [`ContentProvider::content`]
//! - **Composability**: decorators are providers too, so chains nest without limit
//! - **Explicit dependencies**: time is read through a [`Clock`], never from ambient state

use std::fmt::Debug;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::core::error::Result;

/// Core trait for anything that can produce notification content.
///
/// Producing content is a query: implementations must not mutate shared
/// state, which makes it safe to call `content` concurrently on a provider
/// that is reused by several chains.
///
/// # Examples
///
/// ```
/// use notiflow::core::error::Result;
/// use notiflow::core::traits::ContentProvider;
///
/// #[derive(Debug)]
/// struct Greeting;
///
/// impl ContentProvider for Greeting {
///     fn content(&self) -> Result<String> {
///         Ok("Hello".to_string())
///     }
/// }
///
/// assert_eq!(Greeting.content().unwrap(), "Hello");
/// ```
pub trait ContentProvider: Send + Sync + Debug {
    /// Produces the content string.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot produce its content. Errors
    /// from an inner provider are returned unchanged by every decorator.
    fn content(&self) -> Result<String>;
}

/// A reference-counted provider handle that can be wrapped by many chains.
pub type SharedProvider = Arc<dyn ContentProvider>;

/// Trait for providers that can be converted into a [`SharedProvider`].
pub trait IntoShared {
    /// Moves the provider behind a shared, thread-safe handle.
    fn into_shared(self) -> SharedProvider;
}

// Blanket implementation of IntoShared for all providers
impl<P: ContentProvider + 'static> IntoShared for P {
    fn into_shared(self) -> SharedProvider {
        Arc::new(self)
    }
}

/// A source of the current local date-time.
///
/// Decorators that stamp content hold a clock instead of reading the
/// system time directly, so tests can supply a deterministic one.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current local date-time.
    fn now(&self) -> NaiveDateTime;
}
