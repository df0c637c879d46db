//! Command implementations.

mod add;
mod delete;
mod list;
mod scan;

pub use add::{execute_add, execute_edit};
pub use delete::execute_delete;
pub use list::{execute_list, execute_summary};
pub use scan::execute_scan;
