pub mod serve;
pub mod stdio;

pub use serve::ServeCommand;
pub use stdio::StdioCommand;
