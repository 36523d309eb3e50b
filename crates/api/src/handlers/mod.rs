pub mod health;
pub mod leads;
pub mod reports;
