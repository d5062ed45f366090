pub mod form;
pub mod spec;
pub mod state;

pub use form::{FormCheck, FormValidator};
pub use spec::{DepthRemap, ExerciseSpec, GatingSignal, Trigger};
pub use state::{Progress, RepTracker};

/// 対応する運動種目（閉集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ExerciseType {
    Squat = 0,
    Lunge = 1,
    JumpingJacks = 2,
    HighKnees = 3,
    BicepCurl = 4,
    ShoulderPress = 5,
    SideLegRaise = 6,
    CalfRaises = 7,
    ArmCircles = 8,
    TorsoTwist = 9,
}

impl ExerciseType {
    pub const COUNT: usize = 10;

    pub const ALL: [ExerciseType; Self::COUNT] = [
        Self::Squat,
        Self::Lunge,
        Self::JumpingJacks,
        Self::HighKnees,
        Self::BicepCurl,
        Self::ShoulderPress,
        Self::SideLegRaise,
        Self::CalfRaises,
        Self::ArmCircles,
        Self::TorsoTwist,
    ];

    /// 序数による選択（キーバインド切替の外部契約）
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// テンプレートファイル名などに使う識別子
    pub fn name(&self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Lunge => "lunge",
            Self::JumpingJacks => "jumping_jacks",
            Self::HighKnees => "high_knees",
            Self::BicepCurl => "bicep_curl",
            Self::ShoulderPress => "shoulder_press",
            Self::SideLegRaise => "side_leg_raise",
            Self::CalfRaises => "calf_raises",
            Self::ArmCircles => "arm_circles",
            Self::TorsoTwist => "torso_twist",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_roundtrip() {
        for (i, &ex) in ExerciseType::ALL.iter().enumerate() {
            assert_eq!(ExerciseType::from_index(i), Some(ex));
            assert_eq!(ex as usize, i);
        }
        assert_eq!(ExerciseType::from_index(ExerciseType::COUNT), None);
    }

    #[test]
    fn test_names_unique() {
        for (i, a) in ExerciseType::ALL.iter().enumerate() {
            for b in &ExerciseType::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
