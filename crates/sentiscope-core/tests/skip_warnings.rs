//! Skipped posts are reported as `warn` events, one per post, in file order.

use std::sync::{Arc, Mutex};

use sentiscope_core::Dataset;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Default)]
struct Captured {
    position: Option<u64>,
    reason: Option<String>,
}

impl Visit for Captured {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "position" {
            self.position = Some(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "reason" {
            self.reason = Some(format!("{value:?}"));
        }
    }
}

#[derive(Clone, Default)]
struct Warnings(Arc<Mutex<Vec<Captured>>>);

impl<S: Subscriber> Layer<S> for Warnings {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            let mut captured = Captured::default();
            event.record(&mut captured);
            self.0.lock().unwrap().push(captured);
        }
    }
}

#[test]
fn each_skipped_post_warns_once() {
    let input = r#"[
        {"idx": 1, "RawTweet": "b'ok'", "Month": "Jan",
         "Dimension 1": 0.0, "Dimension 2": 0.0, "Sentiment": 0.0, "Subjectivity": 0.0},
        {"idx": 2, "RawTweet": "b'no month'",
         "Dimension 1": 0.0, "Dimension 2": 0.0, "Sentiment": 0.0, "Subjectivity": 0.0},
        {"idx": 1, "RawTweet": "b'again'", "Month": "Jan",
         "Dimension 1": 0.0, "Dimension 2": 0.0, "Sentiment": 0.0, "Subjectivity": 0.0}
    ]"#;
    let warnings = Warnings::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());

    let report = tracing::subscriber::with_default(subscriber, || {
        Dataset::from_json_str(input).unwrap().1
    });

    let captured = warnings.0.lock().unwrap();
    assert_eq!(captured.len(), report.skipped.len());
    let positions: Vec<_> = captured.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![Some(1), Some(2)]);
    assert!(captured.iter().all(|c| c.reason.is_some()));
}

#[test]
fn clean_load_is_silent() {
    let input = r#"[{"idx": 1, "RawTweet": "b'ok'", "Month": "Jan",
        "Dimension 1": 0.0, "Dimension 2": 0.0, "Sentiment": 0.0, "Subjectivity": 0.0}]"#;
    let warnings = Warnings::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());

    tracing::subscriber::with_default(subscriber, || Dataset::from_json_str(input).unwrap());

    assert!(warnings.0.lock().unwrap().is_empty());
}
