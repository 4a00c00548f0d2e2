// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Chain Builder
//!
//! Assembles a decorator chain around a base provider. Layers are applied
//! in the order they are added, innermost first, so
//! `base(p).encrypted().timestamped()` builds `Timestamped(Encrypted(p))`.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use notiflow::chain::ChainBuilder;
//! use notiflow::clock::FixedClock;
//! use notiflow::core::traits::ContentProvider;
//! use notiflow::message::TextMessage;
//! use std::sync::Arc;
//!
//! let at = NaiveDate::from_ymd_opt(2024, 1, 2)
//!     .and_then(|d| d.and_hms_opt(3, 4, 5))
//!     .unwrap();
//! let chain = ChainBuilder::new()
//!     .base(TextMessage::new("Hello"))
//!     .encrypted()
//!     .timestamped()
//!     .clock(Arc::new(FixedClock::new(at)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(chain.content().unwrap(), "[Encrypted] Hello @ 2024-01-02T03:04:05");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clock::SystemClock;
use crate::core::config::Config;
use crate::core::error::{NotiflowError, Result};
use crate::core::traits::{Clock, ContentProvider, SharedProvider};
use crate::decorators::{
    EncryptedMessage, TimestampedMessage, DEFAULT_TIMESTAMP_FORMAT,
    ENCRYPTED_MARKER, TIMESTAMP_SEPARATOR,
};

/// One decorator layer of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Prefix the content with the encryption marker.
    Encrypted,
    /// Suffix the content with the render time.
    Timestamped,
}

impl Layer {
    /// Every available layer, in declaration order.
    pub const ALL: [Layer; 2] = [Layer::Encrypted, Layer::Timestamped];

    /// The name used in configuration files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Layer::Encrypted => "encrypted",
            Layer::Timestamped => "timestamped",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layer {
    type Err = NotiflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "encrypted" => Ok(Layer::Encrypted),
            "timestamped" => Ok(Layer::Timestamped),
            other => Err(NotiflowError::config_error(
                format!("Unknown layer: {}", other),
                None,
            )),
        }
    }
}

/// Fluent builder for decorator chains.
#[derive(Debug)]
pub struct ChainBuilder {
    base: Option<SharedProvider>,
    layers: Vec<Layer>,
    clock: Arc<dyn Clock>,
    marker: String,
    separator: String,
    format: String,
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self {
            base: None,
            layers: Vec::new(),
            clock: Arc::new(SystemClock),
            marker: ENCRYPTED_MARKER.to_string(),
            separator: TIMESTAMP_SEPARATOR.to_string(),
            format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ChainBuilder {
    /// Creates an empty builder with default decorator settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder using the marker, separator, format and layers
    /// from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            layers: config.layers.clone(),
            marker: config.encryption.marker.clone(),
            separator: config.timestamp.separator.clone(),
            format: config.timestamp.format.clone(),
            ..Self::default()
        }
    }

    /// Sets the base provider.
    pub fn base<P: ContentProvider + 'static>(self, base: P) -> Self {
        self.shared_base(Arc::new(base))
    }

    /// Sets a base provider that may also be used by other chains.
    pub fn shared_base(mut self, base: SharedProvider) -> Self {
        self.base = Some(base);
        self
    }

    /// Appends a layer around everything added so far.
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Appends several layers, innermost first.
    pub fn layers<I: IntoIterator<Item = Layer>>(mut self, layers: I) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Appends an encryption marker layer.
    pub fn encrypted(self) -> Self {
        self.layer(Layer::Encrypted)
    }

    /// Appends a timestamp layer.
    pub fn timestamped(self) -> Self {
        self.layer(Layer::Timestamped)
    }

    /// Sets the clock used by every timestamp layer.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the chain and returns its outermost provider.
    ///
    /// # Errors
    ///
    /// Returns [`NotiflowError::MissingProvider`] if no base was set, or
    /// [`NotiflowError::ConfigError`] if the timestamp format is invalid.
    pub fn build(self) -> Result<SharedProvider> {
        let mut current = self.base.ok_or(NotiflowError::MissingProvider)?;
        debug!("Building chain with layers {:?}", self.layers);

        for layer in &self.layers {
            let next: SharedProvider = match layer {
                Layer::Encrypted => Arc::new(
                    EncryptedMessage::from_shared(current)
                        .with_marker(self.marker.as_str()),
                ),
                Layer::Timestamped => Arc::new(
                    TimestampedMessage::from_shared(current)
                        .with_clock(Arc::clone(&self.clock))
                        .with_separator(self.separator.as_str())
                        .with_format(self.format.as_str())?,
                ),
            };
            current = next;
        }

        Ok(current)
    }
}
