pub mod config;
pub mod logging;

pub mod abort;
pub mod crawl;
pub mod manifest;
pub mod retry;
pub mod source;
pub mod storage;
pub mod template;
pub mod transcode;
