//! Minimal test support utilities for `column-sync` consumers.

use std::{future::Future, time::Duration};

use tokio::runtime::{Builder, Runtime};

/// Run an async test body on a current-thread Tokio runtime and shut it down promptly.
///
/// Hosts are single-threaded, so the body need not be `Send`.
pub fn run_local_test<F>(fut: F)
where
    F: Future<Output = ()>,
{
    /// Shuts the runtime down eagerly when the test body returns or panics.
    struct RuntimeGuard(Option<Runtime>);

    impl Drop for RuntimeGuard {
        fn drop(&mut self) {
            if let Some(rt) = self.0.take() {
                rt.shutdown_timeout(Duration::from_millis(50));
            }
        }
    }

    let guard = RuntimeGuard(Some(
        Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build test runtime"),
    ));

    if let Some(rt) = guard.0.as_ref() {
        rt.block_on(fut);
    }
}
