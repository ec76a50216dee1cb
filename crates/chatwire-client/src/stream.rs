//! Stream event delivery. Events travel from the parse loop to the
//! consumer through a bounded mpsc channel, so a burst of tokens decoded
//! from one chunk never runs the consumer inline with the byte reads.
//! Order is FIFO per stream; exactly one terminal event closes a stream.

/// Events emitted during a streaming completion.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// Incremental text content from the model.
    Delta { text: String },

    /// Stream completed. No further events follow.
    Done,

    /// Stream failed. No further events follow.
    Error { message: String },
}

type DeltaFn = Box<dyn FnMut(&str) + Send>;
type ErrorFn = Box<dyn FnMut(&str) + Send>;
type DoneFn = Box<dyn FnMut() + Send>;

/// Callback sinks for a streaming completion. Every slot is optional —
/// a missing callback is a no-op.
#[derive(Default)]
pub struct StreamHandlers {
    on_delta: Option<DeltaFn>,
    on_error: Option<ErrorFn>,
    on_done: Option<DoneFn>,
}

impl StreamHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per extracted token, in extraction order.
    pub fn on_delta(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_delta = Some(Box::new(f));
        self
    }

    /// Called at most once, when the stream fails.
    pub fn on_error(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Called at most once, after the last token of a clean stream.
    pub fn on_done(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_done = Some(Box::new(f));
        self
    }

    /// Route one stream event to its callback.
    pub(crate) fn dispatch(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Delta { text } => {
                if let Some(f) = self.on_delta.as_mut() {
                    f(&text);
                }
            }
            StreamEvent::Done => {
                if let Some(f) = self.on_done.as_mut() {
                    f();
                }
            }
            StreamEvent::Error { message } => {
                if let Some(f) = self.on_error.as_mut() {
                    f(&message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn dispatch_routes_to_the_right_callback() {
        let deltas = Arc::new(AtomicUsize::new(0));
        let dones = Arc::new(AtomicUsize::new(0));
        let (d, n) = (deltas.clone(), dones.clone());

        let mut handlers = StreamHandlers::new()
            .on_delta(move |_| {
                d.fetch_add(1, Ordering::SeqCst);
            })
            .on_done(move || {
                n.fetch_add(1, Ordering::SeqCst);
            });

        handlers.dispatch(StreamEvent::Delta {
            text: "a".to_string(),
        });
        handlers.dispatch(StreamEvent::Delta {
            text: "b".to_string(),
        });
        handlers.dispatch(StreamEvent::Done);

        assert_eq!(deltas.load(Ordering::SeqCst), 2);
        assert_eq!(dones.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_callbacks_are_noops() {
        let mut handlers = StreamHandlers::new();
        handlers.dispatch(StreamEvent::Delta {
            text: "ignored".to_string(),
        });
        handlers.dispatch(StreamEvent::Error {
            message: "ignored".to_string(),
        });
        handlers.dispatch(StreamEvent::Done);
    }
}
