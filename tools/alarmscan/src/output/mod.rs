mod format;
mod json;
mod table;

pub use format::{print_error, print_region_failures};
pub use json::render_json;
pub use table::{render_table, TableOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}
