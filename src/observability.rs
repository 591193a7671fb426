use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("kimi.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("kimi.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("kimi.client.request_duration_seconds");
pub(crate) static CLIENT_UPLOAD_BYTES: Counter = Counter::new("kimi.client.upload_bytes");

pub(crate) static SHELL_COMMANDS: Counter = Counter::new("kimi.shell.commands");
pub(crate) static SHELL_CHAT_TURNS: Counter = Counter::new("kimi.shell.chat_turns");
pub(crate) static SHELL_ERRORS: Counter = Counter::new("kimi.shell.errors");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);
    collector.register_counter(&CLIENT_UPLOAD_BYTES);

    collector.register_counter(&SHELL_COMMANDS);
    collector.register_counter(&SHELL_CHAT_TURNS);
    collector.register_counter(&SHELL_ERRORS);
}
