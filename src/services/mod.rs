pub mod alerts;
pub mod fs;
