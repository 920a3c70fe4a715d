//! Text utilities: Markdown styling and line wrapping for the planner panes.

mod markdown;
mod wrap;

pub(crate) use markdown::{markdown_lines, parse_markdown_inline};
pub(crate) use wrap::wrap_message;

#[cfg(test)]
mod tests;
