pub mod breathing;
pub mod chat;
pub mod journal;
pub mod mood;
pub mod setting;
