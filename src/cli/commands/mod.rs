//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each handler validates its arguments, calls the engine, and formats
//! the result for display.

mod completion;
mod config_cmd;
mod render;

pub use completion::completion;
pub use config_cmd::config;
pub use render::{render, RenderArgs};

use crate::cli::args::Command;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Render {
            output,
            stdout,
            format,
            direction,
            short_len,
        } => render::render(
            ctx,
            &RenderArgs {
                output,
                stdout,
                format,
                direction,
                short_len: short_len.map(usize::from),
            },
        ),
        Command::Config => config_cmd::config(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
