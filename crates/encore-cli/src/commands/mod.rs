pub mod config;
pub mod domains;
pub mod recommend;
pub mod search;
