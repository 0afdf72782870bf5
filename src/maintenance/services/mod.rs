//! Application services for routine maintenance.

mod catalogue;
mod sweep;
mod template;

pub use catalogue::{
    RegisterRoutineTaskRequest, RoutineTaskService, RoutineTaskServiceError,
    RoutineTaskServiceResult, UpdateScheduleRequest,
};
pub use sweep::{
    FailedTask, SkipReason, SkippedTask, SweepError, SweepReport, TaskSweepError,
    TicketMaterializer,
};
pub use template::render_ticket_text;
