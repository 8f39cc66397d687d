// Adapters layer: concrete implementations of the domain ports (files, terminal).

pub mod console;
pub mod storage;
