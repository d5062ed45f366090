//! テスト用のPoseフィクスチャ

use crate::pose::{Keypoint, LandmarkIndex, Pose};

/// 直立した中立姿勢（全ランドマーク可視性1.0）
///
/// 座標はコーチの基準立位と同じ配置
pub fn standing_pose() -> Pose {
    use LandmarkIndex::*;

    let mut pose = Pose::default();
    for kp in pose.keypoints.iter_mut() {
        kp.visibility = 1.0;
    }

    let place = |pose: &mut Pose, idx: LandmarkIndex, x: f32, y: f32| {
        *pose.get_mut(idx) = Keypoint::new(x, y, 0.0, 1.0);
    };

    place(&mut pose, Nose, 0.5, 0.15);
    place(&mut pose, LeftShoulder, 0.42, 0.25);
    place(&mut pose, RightShoulder, 0.58, 0.25);
    place(&mut pose, LeftElbow, 0.38, 0.45);
    place(&mut pose, RightElbow, 0.62, 0.45);
    place(&mut pose, LeftWrist, 0.44, 0.58);
    place(&mut pose, RightWrist, 0.56, 0.58);
    place(&mut pose, LeftHip, 0.45, 0.60);
    place(&mut pose, RightHip, 0.55, 0.60);
    place(&mut pose, LeftKnee, 0.45, 0.80);
    place(&mut pose, RightKnee, 0.55, 0.80);
    place(&mut pose, LeftAnkle, 0.45, 0.98);
    place(&mut pose, RightAnkle, 0.55, 0.98);

    pose
}

/// 指定した膝角度になるよう足首と肩を回した立位Pose
///
/// 膝を頂点に、股関節は真上、足首を angle 度の位置に置く。
/// 股関節角度も同じ値に合わせ、自然なしゃがみ姿勢（前傾なし扱い）にする。
pub fn pose_with_knee_angle(degrees: f32) -> Pose {
    use LandmarkIndex::*;

    let mut pose = standing_pose();
    let shank = 0.18f32;
    let torso = 0.35f32;

    // angle(hip, knee, ankle): hipは膝の真上なので、足首レイを
    // 真下(+y)から (180 - degrees) だけ回す
    let theta = (180.0 - degrees).to_radians();
    for (knee, ankle) in [(LeftKnee, LeftAnkle), (RightKnee, RightAnkle)] {
        let k = *pose.get(knee);
        let ax = k.x + shank * theta.sin();
        let ay = k.y + shank * theta.cos();
        *pose.get_mut(ankle) = Keypoint::new(ax, ay, 0.0, 1.0);
    }

    // angle(shoulder, hip, knee) も degrees に合わせる（膝は股関節の真下）
    let phi = (90.0 - degrees).to_radians();
    for (hip, shoulder) in [(LeftHip, LeftShoulder), (RightHip, RightShoulder)] {
        let h = *pose.get(hip);
        let sx = h.x + torso * phi.cos();
        let sy = h.y + torso * phi.sin();
        *pose.get_mut(shoulder) = Keypoint::new(sx, sy, 0.0, 1.0);
    }

    pose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomech::joint_angles;

    #[test]
    fn test_pose_with_knee_angle_matches_request() {
        for target in [170.0f32, 140.0, 125.0] {
            let pose = pose_with_knee_angle(target);
            let angles = joint_angles(&pose);
            let knee = angles.knee_mean();
            assert!(
                (knee - target).abs() < 1.0,
                "target={} got={}",
                target,
                knee
            );
        }
    }
}
