// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base messages: the innermost providers of every chain.

use crate::core::error::Result;
use crate::core::traits::ContentProvider;

/// A plain in-memory message whose content is fixed at construction.
///
/// ```
/// use notiflow::core::traits::ContentProvider;
/// use notiflow::message::TextMessage;
///
/// let message = TextMessage::new("Hello");
/// assert_eq!(message.content().unwrap(), "Hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    text: String,
}

impl TextMessage {
    /// Creates a new `TextMessage`.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl ContentProvider for TextMessage {
    fn content(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
