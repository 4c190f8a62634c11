pub mod api_error;
pub(crate) mod handlers;
pub(crate) mod state;
