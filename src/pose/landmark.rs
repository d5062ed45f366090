use serde::{Deserialize, Serialize};

/// BlazePose (MediaPipe Pose) の 33 ランドマークインデックス
///
/// インデックスの意味は検出器・レンダラーと共有する固定契約
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEyeInner),
            2 => Some(Self::LeftEye),
            3 => Some(Self::LeftEyeOuter),
            4 => Some(Self::RightEyeInner),
            5 => Some(Self::RightEye),
            6 => Some(Self::RightEyeOuter),
            7 => Some(Self::LeftEar),
            8 => Some(Self::RightEar),
            9 => Some(Self::MouthLeft),
            10 => Some(Self::MouthRight),
            11 => Some(Self::LeftShoulder),
            12 => Some(Self::RightShoulder),
            13 => Some(Self::LeftElbow),
            14 => Some(Self::RightElbow),
            15 => Some(Self::LeftWrist),
            16 => Some(Self::RightWrist),
            17 => Some(Self::LeftPinky),
            18 => Some(Self::RightPinky),
            19 => Some(Self::LeftIndex),
            20 => Some(Self::RightIndex),
            21 => Some(Self::LeftThumb),
            22 => Some(Self::RightThumb),
            23 => Some(Self::LeftHip),
            24 => Some(Self::RightHip),
            25 => Some(Self::LeftKnee),
            26 => Some(Self::RightKnee),
            27 => Some(Self::LeftAnkle),
            28 => Some(Self::RightAnkle),
            29 => Some(Self::LeftHeel),
            30 => Some(Self::RightHeel),
            31 => Some(Self::LeftFootIndex),
            32 => Some(Self::RightFootIndex),
            _ => None,
        }
    }
}

/// 下半身ランドマーク一式（可視性判定と補正バイアスで共用）
pub const LOWER_BODY: &[LandmarkIndex] = &[
    LandmarkIndex::LeftHip,
    LandmarkIndex::RightHip,
    LandmarkIndex::LeftKnee,
    LandmarkIndex::RightKnee,
    LandmarkIndex::LeftAnkle,
    LandmarkIndex::RightAnkle,
];

/// 上半身ランドマーク一式（肩・肘・手首）
pub const UPPER_BODY: &[LandmarkIndex] = &[
    LandmarkIndex::LeftShoulder,
    LandmarkIndex::RightShoulder,
    LandmarkIndex::LeftElbow,
    LandmarkIndex::RightElbow,
    LandmarkIndex::LeftWrist,
    LandmarkIndex::RightWrist,
];

/// 単一キーポイント
///
/// 座標はフレーム寸法で正規化 (0.0〜1.0)、原点は左上、yは下向きに増加
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// 可視性スコア (0.0〜1.0)
    pub visibility: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// 可視性が閾値以上か
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }
}

impl Default for Keypoint {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            visibility: 0.0,
        }
    }
}

/// 33キーポイントからなる姿勢
///
/// 検出なしは `Option<Pose>::None` で表現する（ゼロ埋めのPoseではない）
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub keypoints: [Keypoint; LandmarkIndex::COUNT],
}

impl Pose {
    pub fn new(keypoints: [Keypoint; LandmarkIndex::COUNT]) -> Self {
        Self { keypoints }
    }

    pub fn get(&self, index: LandmarkIndex) -> &Keypoint {
        &self.keypoints[index as usize]
    }

    pub fn get_mut(&mut self, index: LandmarkIndex) -> &mut Keypoint {
        &mut self.keypoints[index as usize]
    }

    /// 指定ランドマーク群がすべて閾値以上の可視性を持つか
    pub fn all_visible(&self, indices: &[LandmarkIndex], threshold: f32) -> bool {
        indices
            .iter()
            .all(|&i| self.keypoints[i as usize].is_visible(threshold))
    }

    /// 腰中心を原点とする正規化Pose（スケール・平行移動不変の比較用）
    pub fn hip_centered(&self) -> Pose {
        let left = self.get(LandmarkIndex::LeftHip);
        let right = self.get(LandmarkIndex::RightHip);
        let cx = (left.x + right.x) / 2.0;
        let cy = (left.y + right.y) / 2.0;
        let cz = (left.z + right.z) / 2.0;

        let mut centered = self.clone();
        for kp in centered.keypoints.iter_mut() {
            kp.x -= cx;
            kp.y -= cy;
            kp.z -= cz;
        }
        centered
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            keypoints: [Keypoint::default(); LandmarkIndex::COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_index_count() {
        assert_eq!(LandmarkIndex::COUNT, 33);
    }

    #[test]
    fn test_landmark_index_from_index() {
        assert_eq!(LandmarkIndex::from_index(0), Some(LandmarkIndex::Nose));
        assert_eq!(
            LandmarkIndex::from_index(11),
            Some(LandmarkIndex::LeftShoulder)
        );
        assert_eq!(
            LandmarkIndex::from_index(32),
            Some(LandmarkIndex::RightFootIndex)
        );
        assert_eq!(LandmarkIndex::from_index(33), None);
    }

    #[test]
    fn test_keypoint_is_visible() {
        let kp = Keypoint::new(0.5, 0.5, 0.0, 0.65);
        assert!(kp.is_visible(0.6));
        assert!(!kp.is_visible(0.7));
    }

    #[test]
    fn test_pose_get() {
        let mut keypoints = [Keypoint::default(); LandmarkIndex::COUNT];
        keypoints[LandmarkIndex::LeftKnee as usize] = Keypoint::new(0.45, 0.8, 0.0, 0.9);

        let pose = Pose::new(keypoints);
        let knee = pose.get(LandmarkIndex::LeftKnee);
        assert_eq!(knee.x, 0.45);
        assert_eq!(knee.y, 0.8);
    }

    #[test]
    fn test_all_visible() {
        let mut pose = Pose::default();
        let set = [LandmarkIndex::LeftHip, LandmarkIndex::RightHip];
        assert!(!pose.all_visible(&set, 0.7));

        pose.get_mut(LandmarkIndex::LeftHip).visibility = 0.9;
        pose.get_mut(LandmarkIndex::RightHip).visibility = 0.8;
        assert!(pose.all_visible(&set, 0.7));
    }

    #[test]
    fn test_hip_centered_origin() {
        let mut pose = Pose::default();
        *pose.get_mut(LandmarkIndex::LeftHip) = Keypoint::new(0.4, 0.6, 0.0, 1.0);
        *pose.get_mut(LandmarkIndex::RightHip) = Keypoint::new(0.6, 0.6, 0.0, 1.0);

        let centered = pose.hip_centered();
        let left = centered.get(LandmarkIndex::LeftHip);
        let right = centered.get(LandmarkIndex::RightHip);
        assert!((left.x + right.x).abs() < 1e-6);
        assert!(left.y.abs() < 1e-6 && right.y.abs() < 1e-6);
    }
}
