pub mod exposure;
pub mod logger;
