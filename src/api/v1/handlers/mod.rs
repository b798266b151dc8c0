pub mod empires;
pub mod health;
pub mod me;
pub mod pages;
