// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Content Decorators Module
//!
//! Decorators wrap exactly one [`ContentProvider`] and derive their own
//! content from it. A decorator is itself a provider, so decorators nest:
//! each layer asks the one it wraps for content and transforms the result.
//!
//! ## Available Decorators
//!
//! - [`encrypted`]: prefixes the wrapped content with an encryption marker
//! - [`timestamped`]: suffixes the wrapped content with the time it was rendered
//!
//! ## Usage
//!
//! ```rust
//! use notiflow::core::traits::ContentProvider;
//! use notiflow::decorators::{EncryptedMessage, TimestampedMessage};
//! use notiflow::message::TextMessage;
//!
//! let message = TimestampedMessage::new(EncryptedMessage::new(TextMessage::new("Hello")));
//! let content = message.content().unwrap();
//! assert!(content.starts_with("[Encrypted] Hello @ "));
//! ```
//!
//! ## Implementing Custom Decorators
//!
//! Custom decorators hold a [`Decorator`] and implement [`ContentProvider`]
//! on top of [`Decorator::wrapped_content`]:
//!
//! ```rust
//! # use notiflow::core::error::Result;
//! # use notiflow::core::traits::{ContentProvider, IntoShared};
//! # use notiflow::decorators::Decorator;
//! # use notiflow::message::TextMessage;
//! #[derive(Debug)]
//! struct Shouting {
//!     base: Decorator,
//! }
//!
//! impl ContentProvider for Shouting {
//!     fn content(&self) -> Result<String> {
//!         Ok(self.base.wrapped_content()?.to_uppercase())
//!     }
//! }
//!
//! let shouting = Shouting {
//!     base: Decorator::new(TextMessage::new("hi").into_shared()),
//! };
//! assert_eq!(shouting.content().unwrap(), "HI");
//! ```

use log::trace;

use crate::core::error::{NotiflowError, Result};
use crate::core::traits::SharedProvider;

/// Encryption marker decorator.
pub mod encrypted;

/// Render-time timestamp decorator.
pub mod timestamped;

// Re-export commonly used types
pub use encrypted::{EncryptedMessage, ENCRYPTED_MARKER};
pub use timestamped::{
    parse_timestamp, TimestampedMessage, DEFAULT_TIMESTAMP_FORMAT,
    TIMESTAMP_SEPARATOR,
};

/// Shared state of every decorator: the one provider it wraps.
///
/// The wrapped provider is set once, at construction, and cannot be
/// replaced or taken back out. Outside code only sees the wrapped
/// provider's content, through [`Decorator::wrapped_content`]. Because
/// the handle is immutable and must exist before the decorator does, a
/// decorator can never end up wrapping itself.
#[derive(Debug, Clone)]
pub struct Decorator {
    wrapped: SharedProvider,
}

impl Decorator {
    /// Creates a decorator around `wrapped`.
    pub fn new(wrapped: SharedProvider) -> Self {
        Self { wrapped }
    }

    /// Creates a decorator around an optional provider.
    ///
    /// # Errors
    ///
    /// Returns [`NotiflowError::MissingProvider`] when `wrapped` is `None`.
    pub fn try_new(wrapped: Option<SharedProvider>) -> Result<Self> {
        wrapped.map(Self::new).ok_or(NotiflowError::MissingProvider)
    }

    /// Requests content from the wrapped provider.
    ///
    /// Errors from the wrapped provider are returned as-is.
    pub fn wrapped_content(&self) -> Result<String> {
        let content = self.wrapped.content()?;
        trace!("Wrapped provider produced {} bytes", content.len());
        Ok(content)
    }
}
