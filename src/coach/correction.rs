//! 姿勢補正エンジン
//!
//! ユーザーと参照姿勢のランドマーク変位場を計算し、深度エラーの方向を
//! 強調するよう参照姿勢にバイアスをかける。フレーム間の状態は持たない。

use crate::biomech::JointAngles;
use crate::pose::{LandmarkIndex, Pose, LOWER_BODY};

/// 補正バイアスが乗る角度エラーの下限（度）
const ANGLE_ERROR_MARGIN: f32 = 10.0;
/// バイアス量（正規化座標）
const CORRECTION_Y: f32 = 0.05;

pub struct CorrectionEngine;

impl CorrectionEngine {
    /// ランドマークごとの変位ベクトル (target - user) を返す
    ///
    /// ユーザーが「いるべき位置」への2Dガイダンスベクトル
    pub fn displacement_field(
        user: &Pose,
        target: &Pose,
    ) -> [[f32; 2]; LandmarkIndex::COUNT] {
        let mut field = [[0.0f32; 2]; LandmarkIndex::COUNT];
        for (i, out) in field.iter_mut().enumerate() {
            let u = &user.keypoints[i];
            let t = &target.keypoints[i];
            out[0] = t.x - u.x;
            out[1] = t.y - u.y;
        }
        field
    }

    /// 膝角度エラーに応じて参照姿勢へ比例バイアスをかける
    ///
    /// ユーザーが目標より浅い（角度が大きい）なら下半身を下げて
    /// 「もっと低く」を強調する。深すぎれば逆方向。
    pub fn corrected_ghost(ghost: &Pose, angles: &JointAngles, target_knee: f32) -> Pose {
        let error = angles.knee_mean() - target_knee;

        let bias = if error > ANGLE_ERROR_MARGIN {
            CORRECTION_Y
        } else if error < -ANGLE_ERROR_MARGIN {
            -CORRECTION_Y
        } else {
            return ghost.clone();
        };

        let mut corrected = ghost.clone();
        for &idx in LOWER_BODY {
            corrected.get_mut(idx).y += bias;
        }
        corrected
    }
}
