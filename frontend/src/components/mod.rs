pub mod alerts;
pub mod chatbot;
