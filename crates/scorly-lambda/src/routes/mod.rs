pub mod download;
pub mod generate;
pub mod health;
pub mod reports;
