// Resume intake: upload handling, AI-assisted field extraction, in-memory store.

pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod store;
