//! Test logging
//!
//! Library crates never install a subscriber; tests that want to see the
//! reconciler's events call [`init_test_logging`]. Output goes through the
//! test harness writer and honours `RUST_LOG`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// # Examples
///
/// ```
/// use redgrant_test::logging::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(EnvFilter::from_default_env())
			.with_test_writer()
			.try_init();
	});
}
