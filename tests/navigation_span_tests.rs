use std::{
    fmt,
    sync::{Arc, Mutex},
};

use pix_navigator::{AppConfig, InMemoryDom, Navigator, NavigatorState, RecordingLoader, StaticAuth};
use tracing::{
    Subscriber,
    field::{Field, Visit},
    span::{Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, prelude::*};

/// Collects every value recorded into a `route` span field.
#[derive(Clone, Default)]
struct RouteFields(Arc<Mutex<Vec<String>>>);

impl<S: Subscriber> Layer<S> for RouteFields {
    fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
        values.record(&mut RouteVisitor(&self.0));
    }
}

struct RouteVisitor<'a>(&'a Mutex<Vec<String>>);

impl Visit for RouteVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "route" {
            self.0.lock().unwrap().push(format!("{value:?}"));
        }
    }
}

fn navigator() -> Navigator {
    let (loader, _calls) = RecordingLoader::new();
    Navigator::new(NavigatorState {
        loader: Arc::new(loader),
        auth: Arc::new(StaticAuth::signed_out()),
        dom: Arc::new(InMemoryDom::new()),
        config: AppConfig::default(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_navigation_span_names_the_matched_route() {
    let routes = RouteFields::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(routes.clone()));
    let navigator = navigator();

    navigator.navigate("/post/42").await.unwrap();
    navigator.navigate("/nowhere").await.unwrap();

    // One navigation span per hop; the catch-all hop redirects to `/`.
    assert_eq!(
        *routes.0.lock().unwrap(),
        vec!["/post/:postId".to_string(), "*".to_string(), "/".to_string()]
    );
}
