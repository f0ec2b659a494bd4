pub mod report;
pub mod request;
pub mod role;
pub mod template;
