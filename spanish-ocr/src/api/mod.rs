mod extractors;
pub mod dto;
pub mod handlers;
pub mod openapi;
mod routes;
mod state;

pub use extractors::AppQuery;
pub use routes::create_router;
pub use state::AppState;
