pub mod add;
pub mod config;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod log;

use crate::cli::parser::SourceArgs;
use crate::core::loader::SourceSelection;

impl From<&SourceArgs> for SourceSelection {
    fn from(args: &SourceArgs) -> Self {
        Self {
            kind: args.source,
            file: args.from.clone(),
        }
    }
}
