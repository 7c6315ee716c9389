mod common;
mod themes;

pub use common::*;
pub use themes::{article_themes_prompt, landing_page_themes_prompt, theme_prompt};
