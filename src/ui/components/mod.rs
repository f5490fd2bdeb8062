pub mod celebrate;
pub mod menu;
pub mod practice;
