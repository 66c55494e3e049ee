use kanflow_core_types::{RequestContext, RequestId, TraceId};
use thiserror::Error;

/// Result type alias using KanbanError
pub type Result<T> = std::result::Result<T, KanbanError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the store or the engine is classified into one
/// of these kinds. The kind maps to a stable error code that callers (CLI,
/// HTTP adapters, tests) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup
    NotFound,

    // Admission control
    /// Target column is at its WIP limit for a cross-column insertion
    AdmissionDenied,

    // Validation
    /// Reorder permutation does not match the container's children
    InvalidArgument,
    /// A field failed shape validation (length, colour format, range)
    InvalidInput,
    /// Persisted positions are not a dense 0..n-1 sequence
    InvariantViolation,

    // Infrastructure
    Io,
    Serialization,
    Persistence,
    /// Storage reported contention (SQLITE_BUSY / SQLITE_LOCKED)
    Concurrency,
    Timeout,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AdmissionDenied => "ERR_ADMISSION_DENIED",
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the whole operation may be retried by the caller.
    ///
    /// Only infrastructure failures qualify: every engine operation rolls back
    /// completely on these, so a retry starts from committed state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExErrorKind::Persistence | ExErrorKind::Concurrency | ExErrorKind::Timeout
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the context needed to debug a failed
/// ordering operation: which op, which entity, which container, which slot.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    parent_id: Option<String>,
    position: Option<u32>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            parent_id: None,
            position: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (the task, column, board or project concerned)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add container context (board id for columns, column id for tasks)
    pub fn with_parent_id(mut self, id: impl Into<String>) -> Self {
        self.parent_id = Some(id.into());
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Attach both correlation ids from a request context
    pub fn with_context(self, ctx: &RequestContext) -> Self {
        let err = self.with_request_id(ctx.request_id.clone());
        match &ctx.trace_id {
            Some(trace_id) => err.with_trace_id(trace_id.clone()),
            None => err,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn position(&self) -> Option<u32> {
        self.position
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(parent_id) = &self.parent_id {
            write!(f, " (parent_id: {})", parent_id)?;
        }
        if let Some(position) = self.position {
            write!(f, " (position: {})", position)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        if let Some(trace_id) = &self.trace_id {
            write!(f, " (trace_id: {})", trace_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for Kanflow operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KanbanError {
    // ===== Lookup Errors =====
    #[error("Project not found: {project_id}")]
    ProjectNotFound { project_id: String },

    #[error("Board not found: {board_id}")]
    BoardNotFound { board_id: String },

    #[error("Column not found: {column_id}")]
    ColumnNotFound { column_id: String },

    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    // ===== Admission Errors =====
    /// Cross-column insertion into a column already holding `task_limit` tasks
    #[error("Column \"{column_name}\" reached its limit of {task_limit} tasks")]
    WipLimitReached {
        column_id: String,
        column_name: String,
        task_limit: u32,
        task_count: u32,
    },

    // ===== Reorder Errors =====
    /// Reorder list length differs from the number of children
    #[error("Reorder of {parent_id} expected {expected} ids, got {actual}")]
    ReorderCountMismatch {
        parent_id: String,
        expected: usize,
        actual: usize,
    },

    /// Reorder list names the same child twice
    #[error("Reorder of {parent_id} lists {id} more than once")]
    ReorderDuplicateId { parent_id: String, id: String },

    /// Reorder list names an id that is not a child of the container
    #[error("Reorder of {parent_id} lists {id}, which is not one of its children")]
    ReorderForeignId { parent_id: String, id: String },

    // ===== Invariant Errors =====
    /// Positions in a container are not a dense 0..n-1 permutation
    #[error("Positions under {parent_id} are not dense: {reason}")]
    DensityViolation { parent_id: String, reason: String },

    // ===== Validation Errors =====
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    #[error("Invalid title: {reason}")]
    InvalidTitle { reason: String },

    #[error("Invalid color {color}: expected #RRGGBB")]
    InvalidColor { color: String },

    #[error("Invalid task limit {value}: must be at least 1")]
    InvalidTaskLimit { value: u32 },

    #[error("Invalid story points {value}: must be between 1 and 100")]
    InvalidStoryPoints { value: u32 },

    #[error("Invalid assignee: {reason}")]
    InvalidAssignee { reason: String },

    /// Unknown value for an enumerated field (priority, type, status)
    #[error("Invalid {field}: {value}")]
    InvalidEnumValue { field: String, value: String },

    // ===== Generic Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from KanbanError to ExError
impl From<KanbanError> for ExError {
    fn from(err: KanbanError) -> Self {
        match err {
            KanbanError::ProjectNotFound { project_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(project_id)
                .with_message("Project not found"),

            KanbanError::BoardNotFound { board_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(board_id)
                .with_message("Board not found"),

            KanbanError::ColumnNotFound { column_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(column_id)
                .with_message("Column not found"),

            KanbanError::TaskNotFound { task_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(task_id)
                .with_message("Task not found"),

            KanbanError::WipLimitReached {
                column_id,
                column_name,
                task_limit,
                task_count,
            } => ExError::new(ExErrorKind::AdmissionDenied)
                .with_entity_id(column_id)
                .with_message(format!(
                    "Column \"{}\" holds {} tasks and its limit is {}",
                    column_name, task_count, task_limit
                )),

            KanbanError::ReorderCountMismatch {
                parent_id,
                expected,
                actual,
            } => ExError::new(ExErrorKind::InvalidArgument)
                .with_parent_id(parent_id)
                .with_message(format!(
                    "Expected {} ids in reorder list, got {}",
                    expected, actual
                )),

            KanbanError::ReorderDuplicateId { parent_id, id } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_parent_id(parent_id)
                    .with_entity_id(id)
                    .with_message("Id listed more than once")
            }

            KanbanError::ReorderForeignId { parent_id, id } => {
                ExError::new(ExErrorKind::InvalidArgument)
                    .with_parent_id(parent_id)
                    .with_entity_id(id)
                    .with_message("Id is not a child of this container")
            }

            KanbanError::DensityViolation { parent_id, reason } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_parent_id(parent_id)
                    .with_message(reason)
            }

            KanbanError::InvalidName { reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid name: {}", reason)),

            KanbanError::InvalidTitle { reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid title: {}", reason)),

            KanbanError::InvalidColor { color } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid color {}: expected #RRGGBB", color)),

            KanbanError::InvalidTaskLimit { value } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid task limit {}: must be at least 1", value)),

            KanbanError::InvalidStoryPoints { value } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!(
                    "Invalid story points {}: must be between 1 and 100",
                    value
                )),

            KanbanError::InvalidAssignee { reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid assignee: {}", reason)),

            KanbanError::InvalidEnumValue { field, value } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_message(format!("Invalid {}: {}", field, value))
            }

            KanbanError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            KanbanError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to KanbanError
impl From<serde_json::Error> for KanbanError {
    fn from(err: serde_json::Error) -> Self {
        KanbanError::Serialization {
            message: err.to_string(),
        }
    }
}
