// Question sets: the built-in sample and LLM-backed generation.

pub mod handlers;
pub mod prompts;
pub mod sample;
pub mod source;
