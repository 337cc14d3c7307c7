//! Browser console logging.
//!
//! A `tracing` layer that forwards every event to the matching
//! `console.*` method, so the core crates can log with the usual macros.

use std::fmt::Write as _;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::{LookupSpan, Registry};

pub struct ConsoleLayer {
    max_level: Level,
}

impl ConsoleLayer {
    pub fn new(max_level: Level) -> Self {
        Self { max_level }
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = *metadata.level();
        if level > self.max_level {
            return;
        }

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let line = format!("[{}] {}{}", metadata.target(), visitor.message, visitor.fields);

        match level {
            Level::ERROR => gloo_console::error!(line),
            Level::WARN => gloo_console::warn!(line),
            Level::INFO => gloo_console::info!(line),
            _ => gloo_console::debug!(line),
        }
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// Install the console subscriber. A second call is ignored.
pub fn init(max_level: Level) {
    let subscriber = Registry::default().with(ConsoleLayer::new(max_level));
    let _ = tracing::subscriber::set_global_default(subscriber);
}
