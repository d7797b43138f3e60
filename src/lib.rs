//! Book Actions API - turns self-development books into concrete action plans
//!
//! A small stateless HTTP service with two endpoints: one analyzes a book
//! title into a structured description with popular reader queries and
//! examples, the other generates a personalized action plan from the book and
//! the user's context. Both forward a fixed prompt to the Groq
//! chat-completion API.

pub mod ai;
pub mod error;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod startup;

pub use error::{Error, Result};
