// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behaviour of decorator chains.

use std::sync::Arc;
use std::thread;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use notiflow::decorators::{
    parse_timestamp, DEFAULT_TIMESTAMP_FORMAT, TIMESTAMP_SEPARATOR,
};
use notiflow::{
    ChainBuilder, ContentProvider, Decorator, EncryptedMessage, FixedClock,
    IntoShared, NotiflowError, Result, SteppingClock, TextMessage,
    TimestampedMessage,
};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 5)
        .and_then(|d| d.and_hms_micro_opt(7, 45, 30, 500))
        .unwrap()
}

#[derive(Debug)]
struct Offline;

impl ContentProvider for Offline {
    fn content(&self) -> Result<String> {
        Err(NotiflowError::content_unavailable("mailbox offline", None))
    }
}

/// Content-dependent decorator used to show that layer order matters.
#[derive(Debug)]
struct Uppercase {
    base: Decorator,
}

impl ContentProvider for Uppercase {
    fn content(&self) -> Result<String> {
        Ok(self.base.wrapped_content()?.to_uppercase())
    }
}

#[test]
fn encryption_prefixes_base_content() {
    for text in ["Hello", "", "multi\nline", "[Encrypted] already"] {
        let message = EncryptedMessage::new(TextMessage::new(text));
        assert_eq!(message.content().unwrap(), format!("[Encrypted] {text}"));
    }
}

#[test]
fn double_encryption_prefixes_twice() {
    let message =
        EncryptedMessage::new(EncryptedMessage::new(TextMessage::new("C")));
    assert_eq!(message.content().unwrap(), "[Encrypted] [Encrypted] C");
}

#[test]
fn both_orders_place_segments_correctly() {
    let clock = Arc::new(FixedClock::new(start()));

    let stamp_outside = TimestampedMessage::new(EncryptedMessage::new(
        TextMessage::new("Hello"),
    ))
    .with_clock(clock.clone());
    let encrypt_outside = EncryptedMessage::new(
        TimestampedMessage::new(TextMessage::new("Hello")).with_clock(clock),
    );

    let expected = "[Encrypted] Hello @ 2024-11-05T07:45:30.000500";
    assert_eq!(stamp_outside.content().unwrap(), expected);
    assert_eq!(encrypt_outside.content().unwrap(), expected);
}

#[test]
fn reordering_content_dependent_layers_changes_output() {
    let upper_outside = Uppercase {
        base: Decorator::new(
            EncryptedMessage::new(TextMessage::new("Hello")).into_shared(),
        ),
    };
    let upper_inside = EncryptedMessage::new(Uppercase {
        base: Decorator::new(TextMessage::new("Hello").into_shared()),
    });

    assert_eq!(upper_outside.content().unwrap(), "[ENCRYPTED] HELLO");
    assert_eq!(upper_inside.content().unwrap(), "[Encrypted] HELLO");
}

#[test]
fn timestamp_changes_between_calls() {
    let message = TimestampedMessage::new(TextMessage::new("Hello"))
        .with_clock(Arc::new(SteppingClock::new(
            start(),
            Duration::seconds(1),
        )));

    let first = message.content().unwrap();
    let second = message.content().unwrap();

    let (first_body, first_stamp) =
        first.rsplit_once(TIMESTAMP_SEPARATOR).unwrap();
    let (second_body, second_stamp) =
        second.rsplit_once(TIMESTAMP_SEPARATOR).unwrap();
    assert_eq!(first_body, "Hello");
    assert_eq!(first_body, second_body);
    assert_ne!(first_stamp, second_stamp);
}

#[test]
fn timestamp_changes_between_calls_on_system_clock() {
    let message = TimestampedMessage::new(TextMessage::new("Hello"));

    let first = message.content().unwrap();
    thread::sleep(StdDuration::from_millis(20));
    let second = message.content().unwrap();

    let (_, first_stamp) = first.rsplit_once(TIMESTAMP_SEPARATOR).unwrap();
    let (_, second_stamp) = second.rsplit_once(TIMESTAMP_SEPARATOR).unwrap();
    let first_at = parse_timestamp(first_stamp, DEFAULT_TIMESTAMP_FORMAT).unwrap();
    let second_at =
        parse_timestamp(second_stamp, DEFAULT_TIMESTAMP_FORMAT).unwrap();
    assert!(second_at > first_at);
}

#[test]
fn end_to_end_hello_with_system_clock() {
    let message = TimestampedMessage::new(EncryptedMessage::new(
        TextMessage::new("Hello"),
    ));

    let content = message.content().unwrap();
    let stamp = content.strip_prefix("[Encrypted] Hello @ ").unwrap();
    assert!(parse_timestamp(stamp, DEFAULT_TIMESTAMP_FORMAT).is_ok());
}

#[test]
fn missing_provider_is_rejected_before_content_is_requested() {
    assert!(matches!(
        EncryptedMessage::try_new(None),
        Err(NotiflowError::MissingProvider)
    ));
    assert!(matches!(
        TimestampedMessage::try_new(None),
        Err(NotiflowError::MissingProvider)
    ));
    assert!(matches!(
        ChainBuilder::new().encrypted().timestamped().build(),
        Err(NotiflowError::MissingProvider)
    ));
}

#[test]
fn upstream_error_propagates_through_every_layer() {
    let chain = ChainBuilder::new()
        .base(Offline)
        .encrypted()
        .timestamped()
        .encrypted()
        .build()
        .unwrap();

    match chain.content() {
        Err(NotiflowError::ContentUnavailable { message, .. }) => {
            assert_eq!(message, "mailbox offline");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn shared_base_serves_chains_on_many_threads() {
    let base = TextMessage::new("Shared").into_shared();
    let clock = Arc::new(FixedClock::new(start()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let base = Arc::clone(&base);
            let clock = clock.clone();
            thread::spawn(move || -> Result<String> {
                let mut builder = ChainBuilder::new().shared_base(base);
                for _ in 0..i {
                    builder = builder.encrypted();
                }
                builder.timestamped().clock(clock).build()?.content()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let content = handle.join().unwrap().unwrap();
        let expected = format!(
            "{}Shared @ 2024-11-05T07:45:30.000500",
            "[Encrypted] ".repeat(i)
        );
        assert_eq!(content, expected);
    }
    assert_eq!(base.content().unwrap(), "Shared");
}
