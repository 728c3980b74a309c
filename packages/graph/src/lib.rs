//! Resolution of Open Badges objects stored in a SPARQL repository.

pub mod address;
pub mod config;
pub mod error;
pub mod image;
pub mod payload;
pub mod query;
pub mod repository;
pub mod resolver;

pub use address::{AddressResolver, ObjectKind, RepositoryAddress};
pub use config::RepositoryConfig;
pub use error::GraphError;
pub use image::{FetchedImage, ImageResolver, ImageSource};
pub use payload::ParsedObject;
pub use repository::{Binding, BindingValue, GraphRepository, HttpRepository, QueryResult};
pub use resolver::{BadgeClassSummary, ObjectResolver, ResolvedObject};
