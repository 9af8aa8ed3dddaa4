//! Tracing layer that turns session warnings into REPL toasts.
//!
//! Collaborator failures are recovered inside the session and only show up as
//! an apology in the transcript. The session logs the underlying error at
//! WARN; this layer forwards those events so the REPL can show them as a
//! transient notification.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Toast data sent to the REPL
#[derive(Debug, Clone, serde::Serialize)]
pub struct Toast {
    /// Event target (e.g., "docsage_core::action::orchestrator")
    pub target: String,
    /// Log level (WARN or ERROR)
    pub level: String,
    /// Human-readable message
    pub message: String,
    /// Structured fields from the event
    pub fields: HashMap<String, Value>,
    /// Timestamp
    pub timestamp: String,
}

/// Forwards WARN and ERROR events from Docsage crates to a channel
pub struct ToastLayer {
    sender: mpsc::UnboundedSender<Toast>,
}

impl ToastLayer {
    /// Create a new layer with the given channel sender
    pub fn new(sender: mpsc::UnboundedSender<Toast>) -> Self {
        Self { sender }
    }
}

impl<S> Layer<S> for ToastLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > Level::WARN || !metadata.target().starts_with("docsage") {
            return;
        }

        let mut fields = HashMap::new();
        let mut visitor = FieldVisitor(&mut fields);
        event.record(&mut visitor);

        let toast = Toast {
            target: metadata.target().to_string(),
            level: metadata.level().to_string(),
            message: fields
                .remove("message")
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Non-blocking send - if the receiver is dropped, we just skip
        let _ = self.sender.send(toast);
    }
}

/// Field visitor that extracts tracing event fields into a HashMap
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_forwards_docsage_warnings_only() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscriber = tracing_subscriber::registry().with(ToastLayer::new(tx));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "docsage_core::action", kind = "qna", retryable = true, "Collaborator failed: timeout");
            tracing::info!(target: "docsage_core::action", "Action settled");
            tracing::warn!(target: "hyper::client", "connection reset");
        });

        let toast = rx.try_recv().expect("warning should become a toast");
        assert_eq!(toast.level, "WARN");
        assert_eq!(toast.message, "Collaborator failed: timeout");
        assert_eq!(toast.fields["kind"], "qna");
        assert_eq!(toast.fields["retryable"], true);
        assert!(rx.try_recv().is_err());
    }
}
