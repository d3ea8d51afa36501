#![forbid(unsafe_code)]

//! Capture `tracing` spans and events for assertions.
//!
//! ```rust,ignore
//! let capture = with_captured_spans(|| tour.start());
//! assert!(capture.span_names().contains(&"showcase.tour.start".to_string()));
//! assert!(capture.events_with_field("degradation").is_empty());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// A captured span with its metadata and parent info.
#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: String,
    pub level: tracing::Level,
    pub fields: HashMap<String, String>,
    pub parent_name: Option<String>,
}

/// A captured event with its fields and enclosing span.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub message: String,
    pub fields: HashMap<String, String>,
    pub parent_span_name: Option<String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A tracing Layer that records spans, events, and parent names.
struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Handle to read captured spans and events after execution.
#[derive(Debug, Clone)]
pub struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    pub fn spans(&self) -> Vec<CapturedSpan> {
        lock(&self.spans).clone()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    pub fn span_names(&self) -> Vec<String> {
        lock(&self.spans).iter().map(|s| s.name.clone()).collect()
    }

    pub fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        lock(&self.spans)
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }

    pub fn events_with_field(&self, field: &str) -> Vec<CapturedEvent> {
        lock(&self.events)
            .iter()
            .filter(|e| e.fields.contains_key(field))
            .cloned()
            .collect()
    }

    /// Values of the `degradation` field, in emission order.
    pub fn degradations(&self) -> Vec<String> {
        self.events_with_field("degradation")
            .into_iter()
            .filter_map(|e| e.field("degradation").map(str::to_owned))
            .collect()
    }
}

/// Field values as text, keyed by name.
///
/// Integers and bools go through `record_debug`, whose output matches their
/// `Display`. Floats are recorded with `Display` so `100.0` reads `100`.
#[derive(Default)]
struct FieldText(HashMap<String, String>);

impl FieldText {
    fn put(&mut self, field: &tracing::field::Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl tracing::field::Visit for FieldText {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.put(field, value.to_string());
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut fields = FieldText::default();
        attrs.record(&mut fields);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|pid| ctx.span(pid))
            .map(|span_ref| span_ref.name().to_string());

        lock(&self.spans).push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
            fields: fields.0,
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut fields = FieldText::default();
        event.record(&mut fields);

        let fields = fields.0;
        let message = fields.get("message").cloned().unwrap_or_default();

        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        lock(&self.events).push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
            parent_span_name,
        });
    }
}

/// Run `f` under a subscriber that captures everything at TRACE and above.
pub fn with_captured_spans<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let handle = CaptureHandle {
        spans: spans.clone(),
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(SpanCapture { spans, events });
    tracing::subscriber::with_default(subscriber, f);
    handle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_span_fields_and_event_parent() {
        let capture = with_captured_spans(|| {
            let _span = tracing::info_span!("outer", index = 3_u64).entered();
            tracing::debug!(degradation = "stale_callback", "ignored");
        });

        let spans = capture.spans_named("outer");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].fields.get("index").map(String::as_str), Some("3"));

        let events = capture.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].parent_span_name.as_deref(), Some("outer"));
        assert_eq!(events[0].level, tracing::Level::DEBUG);
        assert_eq!(capture.degradations(), vec!["stale_callback"]);
    }

    #[test]
    fn scalar_fields_render_like_display() {
        let capture = with_captured_spans(|| {
            tracing::debug!(radius = 100.0_f32, dy = -40_i32, hit = true, anchor = "center", "shown");
        });
        let event = &capture.events()[0];
        assert_eq!(event.message, "shown");
        assert_eq!(event.field("radius"), Some("100"));
        assert_eq!(event.field("dy"), Some("-40"));
        assert_eq!(event.field("hit"), Some("true"));
        assert_eq!(event.field("anchor"), Some("center"));
    }
}
