pub mod explain_handler;

pub use explain_handler::configure;
