//! Configuration module

mod site;

pub use site::ContactConfig;
pub use site::DataApiConfig;
pub use site::HeroConfig;
pub use site::HighlightConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::StoreBackend;
