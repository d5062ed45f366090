//! フォーム検証
//!
//! 可視性チェックで短絡し、種目別の述語を優先度順に評価する。
//! 最初に失敗した述語のメッセージだけを報告する。

use super::spec::ExerciseSpec;
use super::ExerciseType;
use crate::biomech::{elbow_angle, JointAngles};
use crate::pose::{LandmarkIndex, Pose};

/// フォーム良好時の標準メッセージ
pub const MSG_GOOD: &str = "PERFECT FORM";
/// 可視性不足時の標準メッセージ
pub const MSG_STEP_BACK: &str = "STEP BACK ->";

/// 検証結果: 正誤フラグと単一のフィードバックメッセージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCheck {
    pub ok: bool,
    pub message: &'static str,
}

impl FormCheck {
    fn good() -> Self {
        Self { ok: true, message: MSG_GOOD }
    }

    fn bad(message: &'static str) -> Self {
        Self { ok: false, message }
    }
}

pub struct FormValidator;

impl FormValidator {
    /// 現在フレームのフォームを検証する
    ///
    /// クリティカルランドマークの可視性が閾値未満なら種目述語を評価せず
    /// STEP BACK で短絡する（低可視性ノイズでの誤判定防止）。
    pub fn check(exercise: ExerciseType, pose: &Pose, angles: &JointAngles) -> FormCheck {
        let spec = ExerciseSpec::of(exercise);
        if !pose.all_visible(spec.critical_landmarks, spec.visibility_threshold) {
            return FormCheck::bad(MSG_STEP_BACK);
        }

        match exercise {
            ExerciseType::Squat => Self::check_squat(pose, angles),
            ExerciseType::Lunge => Self::check_upright(pose, 0.12, "TORSO UPRIGHT!"),
            ExerciseType::JumpingJacks => Self::check_jumping_jacks(pose),
            ExerciseType::HighKnees => Self::check_upright(pose, 0.15, "STAND TALL!"),
            ExerciseType::BicepCurl => Self::check_bicep_curl(pose),
            ExerciseType::ShoulderPress => Self::check_shoulder_press(pose),
            ExerciseType::SideLegRaise => Self::check_upright(pose, 0.12, "DON'T LEAN!"),
            ExerciseType::CalfRaises => Self::check_calf_raises(pose),
            ExerciseType::ArmCircles => Self::check_arm_circles(pose),
            ExerciseType::TorsoTwist => Self::check_torso_twist(pose),
        }
    }

    fn check_squat(pose: &Pose, angles: &JointAngles) -> FormCheck {
        use LandmarkIndex::*;

        // 前傾: 股関節と膝の屈曲差が大きいまま膝が曲がっている
        let knee = angles.knee_mean();
        let hip = angles.hip_mean();
        if (hip - knee).abs() > 45.0 && knee < 160.0 {
            return FormCheck::bad("TOO MUCH LEAN!");
        }

        // ニーイン: 膝間隔が足幅の7割未満
        let knee_dist = (pose.get(LeftKnee).x - pose.get(RightKnee).x).abs();
        let feet_dist = (pose.get(LeftAnkle).x - pose.get(RightAnkle).x).abs();
        if knee_dist < feet_dist * 0.7 {
            return FormCheck::bad("KNEES OUT!");
        }

        FormCheck::good()
    }

    /// 肩-腰のX方向ずれによる体幹直立チェック（複数種目で共用）
    fn check_upright(pose: &Pose, max_lean: f32, message: &'static str) -> FormCheck {
        use LandmarkIndex::*;

        let lean = (pose.get(LeftShoulder).x - pose.get(LeftHip).x).abs();
        if lean > max_lean {
            return FormCheck::bad(message);
        }
        FormCheck::good()
    }

    fn check_jumping_jacks(pose: &Pose) -> FormCheck {
        let left = elbow_angle(pose, true).unwrap_or(180.0);
        let right = elbow_angle(pose, false).unwrap_or(180.0);
        if left < 140.0 || right < 140.0 {
            return FormCheck::bad("STRAIGHTEN ARMS!");
        }
        FormCheck::good()
    }

    fn check_bicep_curl(pose: &Pose) -> FormCheck {
        use LandmarkIndex::*;

        // プレス型の挙上を拒否: カール中の手首は常に肩より下
        let l_wrist_above = pose.get(LeftWrist).y < pose.get(LeftShoulder).y;
        let r_wrist_above = pose.get(RightWrist).y < pose.get(RightShoulder).y;
        if l_wrist_above || r_wrist_above {
            return FormCheck::bad("KEEP HANDS BELOW SHOULDERS!");
        }

        // 肘が肩のラインから前後に流れていないか
        let l_drift = (pose.get(LeftElbow).x - pose.get(LeftShoulder).x).abs();
        let r_drift = (pose.get(RightElbow).x - pose.get(RightShoulder).x).abs();
        if l_drift > 0.10 || r_drift > 0.10 {
            return FormCheck::bad("PIN YOUR ELBOWS!");
        }

        FormCheck::good()
    }

    fn check_shoulder_press(pose: &Pose) -> FormCheck {
        use LandmarkIndex::*;

        // カール型の肘下がりを拒否: プレス中の肘は肩の高さ以上
        let l_drop = pose.get(LeftElbow).y - pose.get(LeftShoulder).y;
        let r_drop = pose.get(RightElbow).y - pose.get(RightShoulder).y;
        if l_drop > 0.05 || r_drop > 0.05 {
            return FormCheck::bad("ELBOWS UP!");
        }

        // 左右非対称な挙上
        if (pose.get(LeftElbow).y - pose.get(RightElbow).y).abs() > 0.08 {
            return FormCheck::bad("PRESS EVENLY!");
        }

        FormCheck::good()
    }

    fn check_calf_raises(pose: &Pose) -> FormCheck {
        use LandmarkIndex::*;

        if (pose.get(LeftShoulder).y - pose.get(RightShoulder).y).abs() > 0.05 {
            return FormCheck::bad("STAY BALANCED!");
        }
        FormCheck::good()
    }

    fn check_arm_circles(pose: &Pose) -> FormCheck {
        use LandmarkIndex::*;

        let l_off = (pose.get(LeftWrist).y - pose.get(LeftShoulder).y).abs();
        let r_off = (pose.get(RightWrist).y - pose.get(RightShoulder).y).abs();
        if l_off > 0.15 || r_off > 0.15 {
            return FormCheck::bad("ARMS AT SHOULDER HEIGHT!");
        }
        FormCheck::good()
    }

    fn check_torso_twist(pose: &Pose) -> FormCheck {
        use LandmarkIndex::*;

        if (pose.get(LeftHip).y - pose.get(RightHip).y).abs() > 0.05 {
            return FormCheck::bad("HIPS STEADY!");
        }
        FormCheck::good()
    }
}
