pub mod journal;
pub mod position;
pub mod report;

pub use journal::SignalJournal;
pub use position::{
    ExecutionOutcome, ExecutionRejection, ExitReason, PortfolioSummary, Position, PositionManager,
    RiskParams,
};
pub use report::ReportFormatter;
