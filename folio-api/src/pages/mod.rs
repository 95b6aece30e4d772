//! Server-rendered public pages.

mod project_page;

pub use project_page::*;
