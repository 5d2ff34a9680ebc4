pub mod config;
pub mod logging;

pub mod probe;
pub mod quantity;
pub mod retry;
pub mod storage;
