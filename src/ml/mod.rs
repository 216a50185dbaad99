pub mod features;
pub mod models;
pub mod training;
