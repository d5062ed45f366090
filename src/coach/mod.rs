pub mod correction;
pub mod sync;
pub mod synth;

pub use correction::CorrectionEngine;
pub use sync::{CoachMode, SyncArbitrator};
pub use synth::reference_pose;
