//! コーチ参照姿勢の手続き生成
//!
//! 種目ごとの閉形式キネマティクスで、基準立位から位相に応じた変形を
//! 適用する。永続状態は持たない純関数群。
//!
//! 位相: 進捗値(0..1)が与えられればそれを直接使う（同期モード）。
//! なければ4000ms周期のコサインカーブ（デモモード）。左右交互の種目は
//! スカラー位相で左右を区別できないため、進捗値の有無に関わらず
//! 2000ms（ツイストは4000ms）の時刻駆動で動く。

use std::f32::consts::PI;

use crate::exercise::ExerciseType;
use crate::pose::{Keypoint, LandmarkIndex, Pose};

/// デモモードの基本周期（ミリ秒）
pub const DEMO_PERIOD_MS: u64 = 4000;
/// 左右交互種目の周期（ミリ秒）
pub const ALTERNATE_PERIOD_MS: u64 = 2000;

use LandmarkIndex::*;

/// コーチが動かすランドマーク
const ANIMATED: [LandmarkIndex; 13] = [
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
];

/// 解剖学的にもっともらしい基準立位（腕は腰に当てた構え）
fn neutral_pose() -> Pose {
    let mut pose = Pose::default();
    let mut set = |idx: LandmarkIndex, x: f32, y: f32| {
        *pose.get_mut(idx) = Keypoint::new(x, y, 0.0, 1.0);
    };

    set(Nose, 0.5, 0.15);
    set(LeftShoulder, 0.42, 0.25);
    set(RightShoulder, 0.58, 0.25);
    // 肘はやや外、手首は腰の上
    set(LeftElbow, 0.38, 0.45);
    set(RightElbow, 0.62, 0.45);
    set(LeftWrist, 0.44, 0.58);
    set(RightWrist, 0.56, 0.58);
    set(LeftHip, 0.45, 0.60);
    set(RightHip, 0.55, 0.60);
    set(LeftKnee, 0.45, 0.80);
    set(RightKnee, 0.55, 0.80);
    set(LeftAnkle, 0.45, 0.98);
    set(RightAnkle, 0.55, 0.98);

    pose
}

/// デモモードの位相: 0→1→0 の滑らかな周期カーブ
fn demo_phase(timestamp_ms: u64) -> f32 {
    let t = (timestamp_ms % DEMO_PERIOD_MS) as f32 / DEMO_PERIOD_MS as f32;
    (1.0 - (t * 2.0 * PI).cos()) / 2.0
}

/// 符号付き交互位相: -1..+1 の正弦（正=左、負=右）
fn alternate_phase(timestamp_ms: u64) -> f32 {
    let t = (timestamp_ms % ALTERNATE_PERIOD_MS) as f32 / ALTERNATE_PERIOD_MS as f32;
    (t * 2.0 * PI).sin()
}

/// 上半身（頭・肩・肘・手首）をまとめて平行移動
fn shift_upper_body(pose: &mut Pose, dx: f32, dy: f32) {
    for idx in [Nose, LeftShoulder, RightShoulder, LeftElbow, RightElbow, LeftWrist, RightWrist] {
        let kp = pose.get_mut(idx);
        kp.x += dx;
        kp.y += dy;
    }
}

/// 種目と位相ソースから参照姿勢を生成する
///
/// progress が Some なら同期モード（ユーザーの深度に追従）、
/// None ならデモモード（時刻駆動のループ）。
pub fn reference_pose(exercise: ExerciseType, timestamp_ms: u64, progress: Option<f32>) -> Pose {
    let mut pose = neutral_pose();
    let phase = match progress {
        Some(p) => p.clamp(0.0, 1.0),
        None => demo_phase(timestamp_ms),
    };

    match exercise {
        ExerciseType::Squat => {
            let depth = 0.25;
            // 腰が下がり、膝が曲がり、上体が追従する
            pose.get_mut(LeftHip).y += depth * phase;
            pose.get_mut(RightHip).y += depth * phase;
            pose.get_mut(LeftKnee).y += depth * 0.45 * phase;
            pose.get_mut(RightKnee).y += depth * 0.45 * phase;
            shift_upper_body(&mut pose, 0.0, depth * 0.8 * phase);
        }

        ExerciseType::Lunge => {
            let depth = 0.22;
            // 右脚前のランジ: 右膝・右足首が前へ、左膝が沈む
            pose.get_mut(RightKnee).x += 0.05 * phase;
            pose.get_mut(RightKnee).y += 0.10 * phase;
            pose.get_mut(RightAnkle).x += 0.15 * phase;
            pose.get_mut(LeftKnee).y += 0.15 * phase;
            pose.get_mut(LeftHip).y += depth * phase;
            pose.get_mut(RightHip).y += depth * phase;
            shift_upper_body(&mut pose, 0.0, depth * 0.95 * phase);
        }

        ExerciseType::JumpingJacks => {
            // 開始姿勢: 腕は体側
            *pose.get_mut(LeftElbow) = Keypoint::new(0.40, 0.45, 0.0, 1.0);
            *pose.get_mut(RightElbow) = Keypoint::new(0.60, 0.45, 0.0, 1.0);
            *pose.get_mut(LeftWrist) = Keypoint::new(0.40, 0.60, 0.0, 1.0);
            *pose.get_mut(RightWrist) = Keypoint::new(0.60, 0.60, 0.0, 1.0);

            // 腕のアーク: -90度（体側）→ +90度（頭上）
            let radius = 0.35;
            let angle = -PI / 2.0 + phase * PI;
            let (l_sh, r_sh) = (*pose.get(LeftShoulder), *pose.get(RightShoulder));
            let l_wrist = pose.get_mut(LeftWrist);
            l_wrist.x = l_sh.x - radius * angle.cos();
            l_wrist.y = l_sh.y - radius * angle.sin();
            let r_wrist = pose.get_mut(RightWrist);
            r_wrist.x = r_sh.x + radius * angle.cos();
            r_wrist.y = r_sh.y - radius * angle.sin();

            // 脚は左右へ開く
            pose.get_mut(LeftAnkle).x -= 0.15 * phase;
            pose.get_mut(RightAnkle).x += 0.15 * phase;
        }

        ExerciseType::HighKnees => {
            // 交互種目: スカラー位相では左右を表現できないため常に時刻駆動
            let alt = alternate_phase(timestamp_ms);
            if alt > 0.0 {
                // 左膝上げ
                pose.get_mut(LeftKnee).y -= 0.30 * alt;
                let ankle = pose.get_mut(LeftAnkle);
                ankle.y -= 0.25 * alt;
                ankle.x += 0.05 * alt;
            } else {
                let a = -alt;
                pose.get_mut(RightKnee).y -= 0.30 * a;
                let ankle = pose.get_mut(RightAnkle);
                ankle.y -= 0.25 * a;
                ankle.x -= 0.05 * a;
            }
        }

        ExerciseType::BicepCurl => {
            // 肘を体側にタック
            *pose.get_mut(LeftElbow) = Keypoint::new(0.42, 0.42, 0.0, 1.0);
            *pose.get_mut(RightElbow) = Keypoint::new(0.58, 0.42, 0.0, 1.0);

            // 手首は肘まわりの円弧を掃く。位相0=下ろし切り、1=巻き上げ
            let radius = 0.18;
            let angle = (PI / 2.0 - phase * 1.2 * PI).clamp(-PI / 3.0, PI / 2.0);
            let (l_el, r_el) = (*pose.get(LeftElbow), *pose.get(RightElbow));
            let l_wrist = pose.get_mut(LeftWrist);
            l_wrist.x = l_el.x - radius * angle.cos();
            l_wrist.y = l_el.y + radius * angle.sin();
            let r_wrist = pose.get_mut(RightWrist);
            r_wrist.x = r_el.x + radius * angle.cos();
            r_wrist.y = r_el.y + radius * angle.sin();
        }

        ExerciseType::ShoulderPress => {
            // 肩の高さ(肘90度)から頭上フル伸展まで線形補間
            *pose.get_mut(LeftElbow) = Keypoint::new(0.35, 0.25 - 0.20 * phase, 0.0, 1.0);
            *pose.get_mut(RightElbow) = Keypoint::new(0.65, 0.25 - 0.20 * phase, 0.0, 1.0);
            *pose.get_mut(LeftWrist) = Keypoint::new(0.35, 0.25 - 0.35 * phase, 0.0, 1.0);
            *pose.get_mut(RightWrist) = Keypoint::new(0.65, 0.25 - 0.35 * phase, 0.0, 1.0);
        }

        ExerciseType::SideLegRaise => {
            // 右脚を側方へ
            pose.get_mut(RightKnee).x += 0.25 * phase;
            pose.get_mut(RightKnee).y -= 0.10 * phase;
            pose.get_mut(RightAnkle).x += 0.35 * phase;
            pose.get_mut(RightAnkle).y -= 0.15 * phase;
            // バランスのため上体はわずかに逆側へ
            shift_upper_body(&mut pose, -0.05 * phase, 0.0);
        }

        ExerciseType::CalfRaises => {
            let rise = 0.08;
            for idx in ANIMATED {
                if idx != LeftAnkle && idx != RightAnkle {
                    pose.get_mut(idx).y -= rise * phase;
                }
            }
            // 足首は接地のまま「伸びる」
            pose.get_mut(LeftAnkle).y = 0.98 - rise * 0.2 * phase;
            pose.get_mut(RightAnkle).y = 0.98 - rise * 0.2 * phase;
        }

        ExerciseType::ArmCircles => {
            // 時刻駆動: 腕を水平に保持し、手首が小円を描く
            let t = (timestamp_ms % ALTERNATE_PERIOD_MS) as f32 / ALTERNATE_PERIOD_MS as f32;
            let radius = 0.12;
            let (l_sh, r_sh) = (*pose.get(LeftShoulder), *pose.get(RightShoulder));
            *pose.get_mut(LeftElbow) = Keypoint::new(l_sh.x - 0.15, l_sh.y, 0.0, 1.0);
            *pose.get_mut(RightElbow) = Keypoint::new(r_sh.x + 0.15, r_sh.y, 0.0, 1.0);

            let (l_el, r_el) = (*pose.get(LeftElbow), *pose.get(RightElbow));
            let theta = t * 2.0 * PI;
            let l_wrist = pose.get_mut(LeftWrist);
            l_wrist.x = l_el.x + radius * theta.cos();
            l_wrist.y = l_el.y + radius * theta.sin();
            let r_wrist = pose.get_mut(RightWrist);
            r_wrist.x = r_el.x - radius * theta.cos();
            r_wrist.y = r_el.y + radius * theta.sin();
        }

        ExerciseType::TorsoTwist => {
            // 線形進捗ではひねり方向を表現できないため常に時刻駆動
            let t = (timestamp_ms % DEMO_PERIOD_MS) as f32 / DEMO_PERIOD_MS as f32;
            let rotation = 0.1 * (t * 2.0 * PI).sin();
            pose.get_mut(LeftShoulder).x += rotation;
            pose.get_mut(RightShoulder).x += rotation;
            pose.get_mut(Nose).x += rotation * 1.5;
            // 腰に当てた手も一緒に流れる
            pose.get_mut(LeftWrist).x += rotation * 1.5;
            pose.get_mut(RightWrist).x += rotation * 1.5;
        }
    }

    pose
}
