pub mod core;
pub mod models;
pub mod pages;
pub mod services;
