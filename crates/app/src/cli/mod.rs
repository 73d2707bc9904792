pub mod args;
pub mod input;
pub mod key_file;
pub mod op;
pub mod ops;

pub use ops::{Keygen, Open, Seal, Version};
