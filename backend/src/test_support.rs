//! Test utilities shared by unit tests across the crate.

pub mod logs {
    //! In-memory capture of `tracing` events.
    //!
    //! Install a [`LogCollector`] for the current thread, drive the code under
    //! test, then inspect the recorded events and their fields.

    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::subscriber::DefaultGuard;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::LookupSpan;

    /// One recorded event.
    #[derive(Debug, Clone)]
    pub struct CapturedEvent {
        pub level: Level,
        pub fields: BTreeMap<String, String>,
    }

    impl CapturedEvent {
        /// Rendered `message` field, empty when absent.
        pub fn message(&self) -> &str {
            self.field("message").unwrap_or_default()
        }

        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// Layer recording every event it sees.
    #[derive(Clone, Default)]
    pub struct LogCollector {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    impl LogCollector {
        /// Make the collector the default subscriber until the guard drops.
        pub fn install(&self) -> DefaultGuard {
            tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
        }

        pub fn events(&self) -> Vec<CapturedEvent> {
            self.events.lock().expect("log collector lock").clone()
        }

        /// First event whose message starts with `prefix`.
        pub fn find(&self, prefix: &str) -> Option<CapturedEvent> {
            self.events()
                .into_iter()
                .find(|event| event.message().starts_with(prefix))
        }
    }

    struct FieldRecorder<'a>(&'a mut BTreeMap<String, String>);

    impl Visit for FieldRecorder<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }

    impl<S> tracing_subscriber::Layer<S> for LogCollector
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = BTreeMap::new();
            event.record(&mut FieldRecorder(&mut fields));
            self.events
                .lock()
                .expect("log collector lock")
                .push(CapturedEvent {
                    level: *event.metadata().level(),
                    fields,
                });
        }
    }
}
