//! CLI commands for the disclosure trading system.

pub mod run;
pub mod scan;
pub mod status;
pub mod top;

pub use run::{run_bot, RunArgs};
pub use scan::{run_scan, ScanArgs};
pub use status::{run_status, StatusArgs};
pub use top::{run_top, TopArgs};
