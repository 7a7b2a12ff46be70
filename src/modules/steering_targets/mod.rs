pub mod fixtures;
pub mod models;
pub mod resource;

pub use fixtures::{create_test_steering_targets, delete_test_steering_targets};
pub use models::{SteeringTarget, SteeringTargetRequest, SteeringValue};
pub use resource::SteeringTargets;
