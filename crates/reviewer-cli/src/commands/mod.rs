//! One module per tool. Each exposes its clap options and an async entry point.

use super::*;

pub mod export;
pub mod fetch;
pub mod find;

pub use export::{export, ExportOptions};
pub use fetch::{fetch, FetchOptions};
pub use find::{find, FindOptions};
