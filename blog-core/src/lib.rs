pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod render;
pub mod router;
pub mod state;

pub use catalog::{Article, Catalog};
pub use config::AppConfig;
pub use error::FetchError;
pub use fetch::{ContentStore, Event, RequestToken};
pub use render::render_markdown;
pub use router::{handle_location_change, AddressBar, Route};
pub use state::{View, ViewState};
