use biometrics::{Collector, Counter, Moments};

pub(crate) static CHAT_TURNS: Counter = Counter::new("chatlog.chat.turns");
pub(crate) static CHAT_ABORTS: Counter = Counter::new("chatlog.chat.aborts");

pub(crate) static COMPLETION_REQUESTS: Counter = Counter::new("chatlog.completion.requests");
pub(crate) static COMPLETION_ERRORS: Counter = Counter::new("chatlog.completion.errors");
pub(crate) static COMPLETION_DURATION: Moments =
    Moments::new("chatlog.completion.duration_seconds");

pub(crate) static LOGGER_LINES: Counter = Counter::new("chatlog.logger.lines");
pub(crate) static LOGGER_WRITE_ERRORS: Counter = Counter::new("chatlog.logger.write_errors");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_ABORTS);

    collector.register_counter(&COMPLETION_REQUESTS);
    collector.register_counter(&COMPLETION_ERRORS);
    collector.register_moments(&COMPLETION_DURATION);

    collector.register_counter(&LOGGER_LINES);
    collector.register_counter(&LOGGER_WRITE_ERRORS);
}
