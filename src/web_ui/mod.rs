mod server;
mod api_routes;

pub use server::WebUI;
pub use api_routes::api_routes;
