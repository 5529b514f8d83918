pub mod health;
pub mod invite;
