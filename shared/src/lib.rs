pub mod animator;
pub mod history;
pub mod rewind;
pub mod wheel;
