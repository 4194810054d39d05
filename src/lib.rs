pub mod models;
pub mod storage;
pub mod services;
pub mod cli;
pub mod utils;
