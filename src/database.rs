pub mod order;
pub mod settings;
