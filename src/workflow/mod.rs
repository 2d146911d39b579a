pub mod controller;
pub mod notice;
pub mod state;

pub use controller::{ExportOutcome, ProcessResult, WorkflowController};
pub use notice::{Notifier, TracingNotifier, UserAction, UserNotice};
pub use state::{CompareJobState, ExportJobState, Phase, WorkflowState};
