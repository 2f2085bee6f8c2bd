//! Collect tracing events in memory.
//!
//! [`capture`] returns a [`CaptureLayer`] to install in a subscriber and a
//! [`CaptureHandle`] that reads back what the layer recorded. The driver
//! binary uses it for `--events`; tests use it to assert on binding decisions.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::{self, RenderedLog};

/// Shared buffer of rendered events.
type Buffer = Arc<Mutex<Vec<RenderedLog>>>;

/// Tracing layer that appends every event it sees to a shared buffer.
pub struct CaptureLayer {
    /// Destination buffer shared with the handle.
    buffer: Buffer,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let rendered = fmt::render_event(event);
        self.buffer.lock().push(rendered);
    }
}

/// Read access to the events recorded by a [`CaptureLayer`].
#[derive(Clone, Default)]
pub struct CaptureHandle {
    /// Buffer shared with the layer.
    buffer: Buffer,
}

impl CaptureHandle {
    /// Snapshot of every event recorded so far.
    pub fn events(&self) -> Vec<RenderedLog> {
        self.buffer.lock().clone()
    }

    /// Remove and return every event recorded so far.
    pub fn drain(&self) -> Vec<RenderedLog> {
        self.buffer.lock().drain(..).collect()
    }

    /// True when any recorded event mentions `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.buffer.lock().iter().any(|e| e.mentions(needle))
    }
}

/// Create a capture layer and the handle that reads it.
pub fn capture() -> (CaptureLayer, CaptureHandle) {
    let buffer = Buffer::default();
    (
        CaptureLayer {
            buffer: buffer.clone(),
        },
        CaptureHandle { buffer },
    )
}
