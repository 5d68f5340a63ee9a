// Shared pieces of the Farmer's Dashboard viewer, used by the terminal and web front-ends
pub mod api;
pub mod config;
pub mod error;
pub mod fragment;
pub mod highlight;
pub mod html;
pub mod model;
pub mod navigate;
pub mod source;
pub mod view;

pub use api::{ApiClient, ImageSize, Route};
pub use config::ServerRoot;
pub use error::{ConfigError, FetchError, RouteError};
pub use fragment::{Fragment, Node};
pub use model::Resource;
pub use navigate::{navigate, Surface};
pub use source::{DataSource, LocalDataSource, StaticSource};
