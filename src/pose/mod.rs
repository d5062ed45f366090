pub mod landmark;

pub use landmark::{Keypoint, LandmarkIndex, Pose, LOWER_BODY, UPPER_BODY};
