use biometrics::{Collector, Counter};

pub(crate) static CHAT_REQUESTS: Counter = Counter::new("maestro.client.chat_requests");
pub(crate) static CHAT_REQUEST_ERRORS: Counter = Counter::new("maestro.client.chat_request_errors");
pub(crate) static IMAGE_REQUESTS: Counter = Counter::new("maestro.client.image_requests");
pub(crate) static IMAGE_REQUEST_ERRORS: Counter =
    Counter::new("maestro.client.image_request_errors");

pub(crate) static SESSION_TURNS: Counter = Counter::new("maestro.session.turns");
pub(crate) static SESSION_TURN_FAILURES: Counter = Counter::new("maestro.session.turn_failures");
pub(crate) static SESSION_FUNCTION_DISPATCHES: Counter =
    Counter::new("maestro.session.function_dispatches");
pub(crate) static SESSION_POINTS_AWARDED: Counter = Counter::new("maestro.session.points_awarded");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CHAT_REQUESTS);
    collector.register_counter(&CHAT_REQUEST_ERRORS);
    collector.register_counter(&IMAGE_REQUESTS);
    collector.register_counter(&IMAGE_REQUEST_ERRORS);

    collector.register_counter(&SESSION_TURNS);
    collector.register_counter(&SESSION_TURN_FAILURES);
    collector.register_counter(&SESSION_FUNCTION_DISPATCHES);
    collector.register_counter(&SESSION_POINTS_AWARDED);
}
