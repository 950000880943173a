pub mod handlers;
pub mod responses;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
