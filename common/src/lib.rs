pub mod db;
pub mod error;
pub mod model;
pub mod repositories;
pub mod settings;
