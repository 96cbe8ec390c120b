pub mod alumni;
pub mod employment;
pub mod health;
pub mod reports;
