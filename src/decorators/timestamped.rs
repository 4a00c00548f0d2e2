// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Timestamp Decorator
//!
//! Appends the local date-time at which the content was rendered. The clock
//! is read on every call to [`ContentProvider::content`], not when the
//! decorator is built, so two calls separated in time return different
//! strings that share the same leading content.
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use notiflow::clock::SteppingClock;
//! use notiflow::core::traits::ContentProvider;
//! use notiflow::decorators::TimestampedMessage;
//! use notiflow::message::TextMessage;
//! use std::sync::Arc;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1)
//!     .and_then(|d| d.and_hms_opt(8, 0, 0))
//!     .unwrap();
//! let message = TimestampedMessage::new(TextMessage::new("Hello"))
//!     .with_clock(Arc::new(SteppingClock::new(start, Duration::seconds(1))));
//!
//! assert_eq!(message.content().unwrap(), "Hello @ 2024-03-01T08:00:00");
//! assert_eq!(message.content().unwrap(), "Hello @ 2024-03-01T08:00:01");
//! ```

use std::fmt::Write;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use log::trace;

use crate::clock::SystemClock;
use crate::core::error::{NotiflowError, Result};
use crate::core::traits::{Clock, ContentProvider, SharedProvider};
use crate::decorators::Decorator;

/// Text placed between the content and its timestamp.
pub const TIMESTAMP_SEPARATOR: &str = " @ ";

/// ISO-8601 local date-time; the fraction is omitted when it is zero.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Decorator that appends [`TIMESTAMP_SEPARATOR`] and the render time.
#[derive(Debug, Clone)]
pub struct TimestampedMessage {
    base: Decorator,
    clock: Arc<dyn Clock>,
    separator: String,
    format: String,
}

impl TimestampedMessage {
    /// Wraps `wrapped`, stamping it with the system clock.
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
    /// Returns [`NotiflowError::MissingProvider`] when `wrapped` is `None`.
    pub fn try_new(wrapped: Option<SharedProvider>) -> Result<Self> {
        Decorator::try_new(wrapped).map(Self::from_decorator)
    }

    /// Replaces the clock the timestamp is read from.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the text placed between the content and the timestamp.
    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = separator.into();
        self
    }

    /// Replaces the `strftime` pattern used to render the timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`NotiflowError::ConfigError`] if `format` is empty or is
    /// not a valid pattern.
    pub fn with_format<S: Into<String>>(mut self, format: S) -> Result<Self> {
        let format = format.into();
        validate_format(&format)?;
        self.format = format;
        Ok(self)
    }

    /// The `strftime` pattern used to render the timestamp.
    pub fn format(&self) -> &str {
        &self.format
    }

    fn from_decorator(base: Decorator) -> Self {
        Self {
            base,
            clock: Arc::new(SystemClock),
            separator: TIMESTAMP_SEPARATOR.to_string(),
            format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ContentProvider for TimestampedMessage {
    fn content(&self) -> Result<String> {
        let mut content = self.base.wrapped_content()?;
        let now = self.clock.now();
        trace!("Stamping content at {}", now);

        content.push_str(&self.separator);
        write!(content, "{}", now.format(&self.format)).map_err(|e| {
            NotiflowError::internal_error(format!(
                "Failed to render timestamp with `{}`: {}",
                self.format, e
            ))
        })?;
        Ok(content)
    }
}

/// Checks that `format` is a non-empty `strftime` pattern that a local
/// date-time can be rendered with.
///
/// Patterns naming a UTC offset or zone (`%z`, `%:z`, `%Z`) cannot be
/// rendered for a local date-time and are rejected.
///
/// # Errors
///
/// Returns [`NotiflowError::ConfigError`] describing the problem.
pub fn validate_format(format: &str) -> Result<()> {
    if format.is_empty() {
        return Err(NotiflowError::config_error(
            "Timestamp format cannot be empty",
            None,
        ));
    }

    let invalid = || {
        NotiflowError::config_error(
            format!("Invalid timestamp format `{}`", format),
            None,
        )
    };

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDateTime::default().format(format))
        .map_err(|_| invalid())
}

/// Parses a timestamp rendered with `format` back into a date-time.
///
/// # Errors
///
/// Returns [`NotiflowError::InvalidTimestamp`] if `value` does not match.
pub fn parse_timestamp(value: &str, format: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, format).map_err(|source| {
        NotiflowError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}
