pub mod models;
pub mod resource;

pub use models::About;
pub use resource::AboutResource;
