pub mod llm;
pub mod relay;
