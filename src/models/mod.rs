pub mod conversation;
pub mod gemini;
pub mod request;
