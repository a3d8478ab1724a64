//! The dashboard emits spans for its expensive phases.
//!
//! A capturing `tracing_subscriber` layer records span names while a load
//! and a metric switch run, so the tests can check which phases ran.

use std::sync::{Arc, Mutex};

use sentiscope::{Dashboard, Msg};
use sentiscope_core::Metric;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

#[derive(Clone, Default)]
struct SpanNames(Arc<Mutex<Vec<String>>>);

impl SpanNames {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanNames
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: Context<'_, S>,
    ) {
        self.0
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }
}

const POSTS: &str = r#"[
    {"idx": 1, "RawTweet": "b'a'", "Month": "Jan",
     "Dimension 1": 0.0, "Dimension 2": 0.0, "Sentiment": 0.1, "Subjectivity": 0.2}
]"#;

#[test]
fn load_runs_layout_then_render() {
    let names = SpanNames::default();
    let subscriber = tracing_subscriber::registry().with(names.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut dashboard = Dashboard::default();
        dashboard.run(Msg::LoadJson(POSTS.into()));
        let loaded = names.take();
        let layout = loaded.iter().position(|n| n == "compute_layout").unwrap();
        let render = loaded.iter().position(|n| n == "render_scene").unwrap();
        assert!(layout < render);

        dashboard.run(Msg::SetMetric(Metric::Subjectivity));
        let restyled = names.take();
        assert!(restyled.iter().any(|n| n == "render_scene"));
        assert!(!restyled.iter().any(|n| n == "compute_layout"));
    });
}
