mod commands;
mod environment;
mod parser;
mod privilege;

pub use commands::{AptCache, DpkgProbe, PackageIndex, StatusProbe};
pub use environment::{EnvironmentIssue, check_environment};
pub(crate) use parser::{category_label, is_virtual};
pub use privilege::{AptCommands, CommandFactory};
pub(crate) use privilege::run_streaming;
