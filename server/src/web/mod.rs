// fern_server/src/web/mod.rs

pub mod dispatch;

pub use dispatch::dispatch_handler;
