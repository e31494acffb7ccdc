//! CLI domain: parse, route, output, presentation and the interactive wizard
//! driver. Single route table dispatches to the tool catalogue and sessions.

mod interactive;
mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_plan, format_review, format_tool_json, format_tool_text, format_tools_json,
    format_tools_text,
};
pub use route::{parse_assignment, RunContext};
