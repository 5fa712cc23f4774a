//! Order sink adapters.

mod recording;

pub use recording::RecordingOrderSink;
