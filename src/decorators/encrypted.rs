// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks content as encrypted by prefixing it with a marker.
//!
//! The marker is added on every layer: wrapping twice yields
//! `"[Encrypted] [Encrypted] ..."`.

use std::sync::Arc;

use log::trace;

use crate::core::error::Result;
use crate::core::traits::{ContentProvider, SharedProvider};
use crate::decorators::Decorator;

/// Marker placed in front of encrypted content.
pub const ENCRYPTED_MARKER: &str = "[Encrypted] ";

/// Decorator that prefixes the wrapped content with [`ENCRYPTED_MARKER`].
///
/// ```
/// use notiflow::core::traits::ContentProvider;
/// use notiflow::decorators::EncryptedMessage;
/// use notiflow::message::TextMessage;
///
/// let message = EncryptedMessage::new(TextMessage::new("Hello"));
/// assert_eq!(message.content().unwrap(), "[Encrypted] Hello");
/// ```
#[derive(Debug, Clone)]
pub struct EncryptedMessage {
    base: Decorator,
    marker: String,
}

impl EncryptedMessage {
    /// Wraps `wrapped` with the default marker.
    pub fn new<P: ContentProvider + 'static>(wrapped: P) -> Self {
        Self::from_shared(Arc::new(wrapped))
    }

    /// Wraps a provider that may also be used by other chains.
    pub fn from_shared(wrapped: SharedProvider) -> Self {
        Self::from_decorator(Decorator::new(wrapped))
    }

    /// Wraps an optional provider.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::error::NotiflowError::MissingProvider`] when
    /// `wrapped` is `None`.
    pub fn try_new(wrapped: Option<SharedProvider>) -> Result<Self> {
        Decorator::try_new(wrapped).map(Self::from_decorator)
    }

    /// Replaces the marker placed in front of the content.
    pub fn with_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.marker = marker.into();
        self
    }

    fn from_decorator(base: Decorator) -> Self {
        Self {
            base,
            marker: ENCRYPTED_MARKER.to_string(),
        }
    }
}

impl ContentProvider for EncryptedMessage {
    fn content(&self) -> Result<String> {
        let inner = self.base.wrapped_content()?;
        trace!("Applying encryption marker");

        let mut content =
            String::with_capacity(self.marker.len() + inner.len());
        content.push_str(&self.marker);
        content.push_str(&inner);
        Ok(content)
    }
}
