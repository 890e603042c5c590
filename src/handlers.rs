pub mod assistant;
pub mod auth;
pub mod brands;
pub mod categories;
pub mod celebrities;
pub mod celebrity_brands;
pub mod health;
pub mod outfits;
pub mod plans;
pub mod products;
pub mod roles;
pub mod tournaments;
pub mod users;
