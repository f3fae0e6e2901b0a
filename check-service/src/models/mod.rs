pub mod check_response;

pub use check_response::{CheckResponse, ErrorResponse};
