pub mod health;
pub mod weather;
