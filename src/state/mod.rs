mod app;
mod operations;
mod types;

pub use app::AppState;
pub use types::{
    AppMessage, BatchProgress, OperationRecord, OperationStatus, PackageRow, PackageStatus,
};
