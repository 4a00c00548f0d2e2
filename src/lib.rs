// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Notiflow Library
//!
//! Notiflow renders the displayed content of a notification by wrapping a
//! base message in independent decorators, such as an encryption marker or
//! a render-time timestamp, without touching the base message itself.
//!
//! Every piece is a [`ContentProvider`]. A decorator wraps exactly one
//! provider and is a provider in turn, so chains nest without limit and
//! the order of the layers decides the shape of the final text.
//!
//! ```rust
//! use notiflow::{ContentProvider, EncryptedMessage, TextMessage};
//!
//! let message = EncryptedMessage::new(EncryptedMessage::new(TextMessage::new("Hello")));
//! assert_eq!(message.content().unwrap(), "[Encrypted] [Encrypted] Hello");
//! ```

#![doc = include_str!("../README.md")]
#![crate_name = "notiflow"]
#![crate_type = "lib"]

/// Module containing core utilities, such as traits, configuration and error handling.
pub mod core;

/// Provides the fluent chain builder.
pub mod chain;

/// Provides command-line interface utilities.
pub mod cli;

/// Provides clock implementations.
pub mod clock;

/// Provides the content decorators.
pub mod decorators;

/// Provides base message implementations.
pub mod message;

pub use crate::chain::{ChainBuilder, Layer};
pub use crate::clock::{FixedClock, SteppingClock, SystemClock};
pub use crate::core::config::{Config, ConfigBuilder};
pub use crate::core::error::{NotiflowError, Result};
pub use crate::core::traits::{
    Clock, ContentProvider, IntoShared, SharedProvider,
};
pub use crate::decorators::{
    Decorator, EncryptedMessage, TimestampedMessage,
};
pub use crate::message::TextMessage;
