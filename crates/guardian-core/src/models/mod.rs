pub mod entity;
pub mod mapping;
pub mod placeholder;
pub mod status;

pub use entity::{EntitySpan, MergedEntity};
pub use mapping::MappingEntry;
pub use placeholder::{format_placeholder, placeholder_regex};
pub use status::StatusReport;
