pub mod output;
pub mod walker;

pub use output::{create_writer, JsonWriter, OutputFormat, OutputWriter, TerminalWriter};
pub use walker::{find_project_files, FileWalker};
