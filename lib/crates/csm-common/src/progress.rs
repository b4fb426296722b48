use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status carried by every progress update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Started,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl OperationStatus {
    /// Returns `true` for statuses after which no further updates are sent.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// One progress notification for a long-running operation.
///
/// This is the envelope broadcast to observers (terminal, web socket
/// clients). Percent is monotonically non-decreasing within one
/// `operation_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressUpdate {
    pub operation_id: String,
    pub status: OperationStatus,
    /// 1-based index of the planned step this update refers to, `0` when
    /// the update is not tied to a step.
    pub step: usize,
    pub total_steps: usize,
    pub percent: u8,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl ProgressUpdate {
    /// Build an update with no step association and no payload.
    #[must_use]
    pub fn new(
        operation_id: impl Into<String>,
        status: OperationStatus,
        percent: u8,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            status,
            step: 0,
            total_steps: 0,
            percent: percent.min(100),
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// Associate the update with step `step` of `total`.
    #[must_use]
    pub fn with_step(mut self, step: usize, total: usize) -> Self {
        self.step = step;
        self.total_steps = total;
        self
    }

    /// Attach a JSON payload (e.g. the captured output summary).
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
