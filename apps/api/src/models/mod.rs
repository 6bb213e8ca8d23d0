pub mod candidate;
pub mod chat;
pub mod job;
pub mod question;
pub mod user;
