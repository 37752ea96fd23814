pub mod calendar;
pub mod categories;
pub mod climate;
pub mod details;
pub mod health;
pub mod investments;
pub mod monthly;
pub mod yearly;
