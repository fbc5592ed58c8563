//! Miscellaneous test code for zmsg.
// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

use std::sync::Once;

use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod prelude;
pub mod transcript;
pub mod vectors;

static INIT: Once = Once::new();

/// Initialize globals for tests such as the tracing subscriber and panic / error
/// reporting hooks.
///
/// Safe to call from every test, only the first call has any effect.
pub fn init() {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer().with_target(false).with_test_writer();
        // Use the RUST_LOG env var, or by default:
        //  - warn for most tests, and
        //  - hide the expected unknown status warnings from the poller tests
        let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new("warn")
                .unwrap()
                .add_directive("zmsg::operation=error".parse().unwrap())
        });

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(ErrorLayer::default())
            .init();

        // Async runtime frames hide the failing test in panic reports.
        color_eyre::config::HookBuilder::default()
            .add_frame_filter(Box::new(|frames| {
                const NOISE: &[&str] = &["tokio::", "<futures_util::", "std::panic", "test::"];

                frames.retain(|frame| {
                    frame
                        .name
                        .as_deref()
                        .map_or(true, |name| !NOISE.iter().any(|prefix| name.starts_with(prefix)))
                });
            }))
            .install()
            .unwrap();
    })
}
