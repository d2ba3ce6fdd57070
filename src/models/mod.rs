pub mod record;
pub mod sheet_name;

pub use record::*;
pub use sheet_name::*;
