pub mod listing;
pub mod opener;
