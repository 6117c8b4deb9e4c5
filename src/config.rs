use std::time::Duration;

const KILOBYTE: usize = 1024;
pub const BUFFER_CAPACITY: usize = 64 * KILOBYTE;
pub const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Knobs applied when a [`crate::Source`] is opened.
#[derive(Clone, Debug)]
pub struct SourceOptions {
    /// Capacity of the buffered reader wrapped around every opened stream.
    pub buffer_capacity: usize,
    /// `User-Agent` header sent with HTTP(S) requests.
    pub user_agent: String,
    /// Total timeout for HTTP(S) requests. `None` blocks indefinitely.
    pub http_timeout: Option<Duration>,
    /// Honour the proxies configured in the environment for HTTP(S).
    pub use_proxy: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: BUFFER_CAPACITY,
            user_agent: USER_AGENT.to_owned(),
            http_timeout: None,
            use_proxy: true,
        }
    }
}

impl SourceOptions {
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    pub fn without_proxy(mut self) -> Self {
        self.use_proxy = false;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        // BufReader needs room for at least one UTF-8 sequence
        self.buffer_capacity = capacity.max(4);
        self
    }
}
