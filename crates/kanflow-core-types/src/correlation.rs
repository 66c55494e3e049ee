//! Correlation ids for engine calls
//!
//! One `RequestContext` exists per engine call (a CLI invocation, or one
//! request in an embedding service). Its ids end up on `ExError` so a failed
//! move or reorder can be matched with the log lines of the same call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh time-ordered id (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Id of a single engine call
    RequestId
);

correlation_id!(
    /// Id handed in by an outer caller that groups several engine calls
    TraceId
);

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a call made on behalf of `trace_id`; blank ids are ignored
    pub fn for_trace(trace_id: Option<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            trace_id: trace_id
                .filter(|t| !t.trim().is_empty())
                .map(TraceId::from),
        }
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}
