//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across the engine, the store
//! and any log consumer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity identifiers
pub const FIELD_PROJECT_ID: &str = "project_id";
pub const FIELD_BOARD_ID: &str = "board_id";
pub const FIELD_COLUMN_ID: &str = "column_id";
pub const FIELD_TASK_ID: &str = "task_id";

// Ordering
pub const FIELD_POSITION: &str = "position";
pub const FIELD_SHIFTED_ROWS: &str = "shifted_rows";
pub const FIELD_CHILD_COUNT: &str = "child_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_TASK_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_fields_match_macro_keys() {
        // log_op_error! emits dotted keys; capture relies on these exact names
        assert_eq!(FIELD_ERR_KIND, "err.kind");
        assert_eq!(FIELD_ERR_CODE, "err.code");
    }
}
