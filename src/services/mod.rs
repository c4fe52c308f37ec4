pub mod chat;
pub mod conversation;
pub mod rating;
pub mod router;
