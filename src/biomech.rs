//! 関節角度の幾何計算
//!
//! すべて純関数。状態はフレームをまたがない。

use crate::pose::{Keypoint, LandmarkIndex, Pose};

/// 頂点bにおける3点角度（度）
///
/// 2本のレイ角 atan2(c-b), atan2(a-b) の符号付き差の絶対値を取り、
/// 180度を超える値は 360 - angle に折り返す。結果は常に [0, 180]。
///
/// a==b または c==b（長さゼロのレイ）は角度が定義できないため None。
/// NaNを状態機械へ流さないためのガードはここに置く。
pub fn joint_angle(a: &Keypoint, b: &Keypoint, c: &Keypoint) -> Option<f32> {
    if (a.x == b.x && a.y == b.y) || (c.x == b.x && c.y == b.y) {
        return None;
    }

    let radians = f32::atan2(c.y - b.y, c.x - b.x) - f32::atan2(a.y - b.y, a.x - b.x);
    let mut angle = (radians * 180.0 / std::f32::consts::PI).abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    Some(angle)
}

/// フレームごとに再計算される主要関節角度
///
/// None は「不明」を意味する。0度と混同してはならない。
#[derive(Debug, Clone, Copy, Default)]
pub struct JointAngles {
    pub left_knee: Option<f32>,
    pub right_knee: Option<f32>,
    pub left_hip: Option<f32>,
    pub right_hip: Option<f32>,
}

impl JointAngles {
    /// 左右膝角度の平均（不明側は直立180度とみなす）
    pub fn knee_mean(&self) -> f32 {
        (self.left_knee.unwrap_or(180.0) + self.right_knee.unwrap_or(180.0)) / 2.0
    }

    /// 左右股関節角度の平均
    pub fn hip_mean(&self) -> f32 {
        (self.left_hip.unwrap_or(180.0) + self.right_hip.unwrap_or(180.0)) / 2.0
    }
}

/// Poseから理学療法で使う関節角度セットを抽出
///
/// 膝角度 = angle(hip, knee, ankle)、股関節角度 = angle(shoulder, hip, knee)
pub fn joint_angles(pose: &Pose) -> JointAngles {
    use LandmarkIndex::*;

    JointAngles {
        left_knee: joint_angle(pose.get(LeftHip), pose.get(LeftKnee), pose.get(LeftAnkle)),
        right_knee: joint_angle(
            pose.get(RightHip),
            pose.get(RightKnee),
            pose.get(RightAnkle),
        ),
        left_hip: joint_angle(pose.get(LeftShoulder), pose.get(LeftHip), pose.get(LeftKnee)),
        right_hip: joint_angle(
            pose.get(RightShoulder),
            pose.get(RightHip),
            pose.get(RightKnee),
        ),
    }
}

/// 肩外転角度: angle(hip, shoulder, elbow) を左右平均
///
/// ジャンピングジャック・ショルダープレスのゲーティング信号。
/// 左右いずれかが縮退形状なら None（そのフレームは判定不能）。
pub fn shoulder_abduction_mean(pose: &Pose) -> Option<f32> {
    use LandmarkIndex::*;

    let left = joint_angle(pose.get(LeftHip), pose.get(LeftShoulder), pose.get(LeftElbow))?;
    let right = joint_angle(
        pose.get(RightHip),
        pose.get(RightShoulder),
        pose.get(RightElbow),
    )?;
    Some((left + right) / 2.0)
}

/// 肘角度: angle(shoulder, elbow, wrist)
pub fn elbow_angle(pose: &Pose, left: bool) -> Option<f32> {
    use LandmarkIndex::*;

    if left {
        joint_angle(
            pose.get(LeftShoulder),
            pose.get(LeftElbow),
            pose.get(LeftWrist),
        )
    } else {
        joint_angle(
            pose.get(RightShoulder),
            pose.get(RightElbow),
            pose.get(RightWrist),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kp(x: f32, y: f32) -> Keypoint {
        Keypoint::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn test_right_angle() {
        let a = kp(0.0, 0.0);
        let b = kp(0.0, 1.0);
        let c = kp(1.0, 1.0);
        let angle = joint_angle(&a, &b, &c).unwrap();
        assert!((angle - 90.0).abs() < 0.01, "angle={}", angle);
    }

    #[test]
    fn test_straight_line_is_180() {
        let a = kp(0.0, 0.0);
        let b = kp(0.0, 0.5);
        let c = kp(0.0, 1.0);
        let angle = joint_angle(&a, &b, &c).unwrap();
        assert!((angle - 180.0).abs() < 0.01, "angle={}", angle);
    }

    #[test]
    fn test_symmetry() {
        let a = kp(0.1, 0.2);
        let b = kp(0.5, 0.7);
        let c = kp(0.9, 0.3);
        let ab = joint_angle(&a, &b, &c).unwrap();
        let ba = joint_angle(&c, &b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-4);
    }

    #[test]
    fn test_range_0_to_180() {
        // レイ角差が180度を超えるケースでも折り返しで範囲内に収まる
        for i in 0..36 {
            let theta = i as f32 * 10.0f32.to_radians();
            let a = kp(0.5 + theta.cos(), 0.5 + theta.sin());
            let b = kp(0.5, 0.5);
            let c = kp(1.0, 0.5);
            let angle = joint_angle(&a, &b, &c).unwrap();
            assert!((0.0..=180.0).contains(&angle), "angle={}", angle);
        }
    }

    #[test]
    fn test_degenerate_points_are_none() {
        let a = kp(0.5, 0.5);
        let b = kp(0.5, 0.5);
        let c = kp(1.0, 1.0);
        assert!(joint_angle(&a, &b, &c).is_none());
        assert!(joint_angle(&c, &a, &b).is_none());
    }

    #[test]
    fn test_shoulder_abduction_unknown_on_degenerate_geometry() {
        let mut pose = crate::testutil::standing_pose();
        assert!(shoulder_abduction_mean(&pose).is_some());

        // 股関節が肩と一致すると左右平均ごと不明になる
        let shoulder = *pose.get(LandmarkIndex::LeftShoulder);
        *pose.get_mut(LandmarkIndex::LeftHip) = shoulder;
        assert!(shoulder_abduction_mean(&pose).is_none());
    }

    #[test]
    fn test_joint_angles_unknown_on_default_pose() {
        // 全キーポイントが(0,0)のPose: 退化ジオメトリはすべてNone
        let pose = Pose::default();
        let angles = joint_angles(&pose);
        assert!(angles.left_knee.is_none());
        assert!(angles.right_hip.is_none());
        // 不明側は直立扱い
        assert_eq!(angles.knee_mean(), 180.0);
    }

    #[test]
    fn test_straight_leg_knee_angle() {
        use LandmarkIndex::*;
        let mut pose = Pose::default();
        *pose.get_mut(LeftHip) = kp(0.45, 0.60);
        *pose.get_mut(LeftKnee) = kp(0.45, 0.80);
        *pose.get_mut(LeftAnkle) = kp(0.45, 0.98);

        let angles = joint_angles(&pose);
        let knee = angles.left_knee.unwrap();
        assert!((knee - 180.0).abs() < 0.01, "knee={}", knee);
    }
}
