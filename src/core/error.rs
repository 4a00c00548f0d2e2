// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Error Handling for Notiflow
//!
//! This module defines the error type shared by every content provider,
//! decorator and configuration routine in the library. The `thiserror`
//! crate keeps the variants and their messages in one place.
//!
//! Two kinds of failure matter to callers composing a chain:
//!
//! - [`NotiflowError::MissingProvider`] is raised when a decorator is built
//!   without anything to wrap. It surfaces at construction, never later.
//! - [`NotiflowError::ContentUnavailable`] is raised by a concrete provider
//!   that cannot produce its content. Decorators pass it through untouched.

use std::path::PathBuf;
use thiserror::Error;

/// A unified result type for the Notiflow library.
///
/// This type alias simplifies function signatures by defining a result type that always uses `NotiflowError` as the error variant.
pub type Result<T> = std::result::Result<T, NotiflowError>;

/// The main error type for Notiflow, encompassing all potential error cases.
#[derive(Error, Debug)]
pub enum NotiflowError {
    /// A decorator was constructed without a provider to wrap.
    ///
    /// This is a programmer error and is reported before any content is
    /// requested from the chain.
    #[error("Decorator construction error: no provider to wrap.")]
    MissingProvider,

    /// A provider could not produce its content.
    ///
    /// Raised by concrete base providers for their own reasons, and
    /// propagated unchanged through every enclosing decorator.
    #[error("Content unavailable: {message}.")]
    ContentUnavailable {
        /// Detailed description of why the content is unavailable.
        message: String,
        /// Optional source error providing additional context, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error related to configuration initialisation or validation.
    #[error("Configuration error: {message}.")]
    ConfigError {
        /// Detailed description of the configuration error.
        message: String,
        /// Optional path of the configuration file that caused the error.
        path: Option<PathBuf>,
    },

    /// A rendered timestamp could not be parsed back into a date-time.
    #[error("Invalid timestamp `{value}`: {source}")]
    InvalidTimestamp {
        /// The text that failed to parse.
        value: String,
        /// The underlying parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// IO error encountered during file operations.
    #[error("File IO error at `{path:?}`: {source}")]
    IOError {
        /// Path associated with the IO error.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// General internal error.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for NotiflowError {
    /// Converts a standard IO error into a `NotiflowError::IOError` with an empty path.
    fn from(source: std::io::Error) -> Self {
        NotiflowError::IOError {
            path: PathBuf::new(),
            source,
        }
    }
}

impl NotiflowError {
    /// Creates a `ContentUnavailable` error with a message and optional source.
    ///
    /// # Parameters
    /// - `message`: A description of why the content could not be produced.
    /// - `source`: An optional source error providing additional context.
    pub fn content_unavailable<S: Into<String>>(
        message: S,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        NotiflowError::ContentUnavailable {
            message: message.into(),
            source,
        }
    }

    /// Creates a `ConfigError` with a specific message.
    ///
    /// # Parameters
    /// - `message`: A description of the configuration error.
    /// - `path`: Optional path of the configuration file causing the error.
    pub fn config_error<S: Into<String>>(
        message: S,
        path: Option<PathBuf>,
    ) -> Self {
        NotiflowError::ConfigError {
            message: message.into(),
            path,
        }
    }

    /// Wraps an IO error as an `IOError` variant with the specified path.
    pub fn io_error(path: PathBuf, source: std::io::Error) -> Self {
        NotiflowError::IOError { path, source }
    }

    /// Creates a general internal error with a custom message.
    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        NotiflowError::InternalError(message.into())
    }
}
