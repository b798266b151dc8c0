pub mod empires;
pub mod me;
pub mod pages;
