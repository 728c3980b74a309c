use std::sync::Arc;

use graph::{AddressResolver, GraphError, HttpRepository, ImageResolver, ObjectResolver};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub objects: Arc<ObjectResolver>,
    pub images: Arc<ImageResolver>,
}

impl AppState {
    /// Wire the resolution pipeline against the configured repository.
    pub fn new(config: AppConfig) -> Result<Self, GraphError> {
        let repository = Arc::new(HttpRepository::new(&config.repository)?);
        let addresses = AddressResolver::new(config.repository.repository_root.clone());
        let objects = Arc::new(ObjectResolver::new(addresses, repository));
        let images = Arc::new(ImageResolver::new(objects.clone(), &config.repository)?);

        Ok(Self {
            config: Arc::new(config),
            objects,
            images,
        })
    }
}
