use std::fmt::{Display, Formatter};

/// Strongly typed request identifier backed by ULID.
///
/// Attached to every [`HandlerRequest`](crate::handler::HandlerRequest) so
/// log lines emitted across a middleware chain correlate to one request.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(pub ulid::Ulid);

impl RequestId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
