//! External program execution and platform detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{
    command_line, CommandOptions, CommandResult, CommandRunner, PassthroughStdout, SystemRunner,
};
pub use mock::{Invocation, MockRunner, RunMode};
pub use platform::{is_ci, path_list_separator};
