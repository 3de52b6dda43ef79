pub mod resume;
pub mod schema;
