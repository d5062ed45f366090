//! 種目ごとの静的仕様テーブル
//!
//! ゲーティング信号・閾値・デバウンス・可視性ランドマーク・フォームゲート
//! をここに集約する。種目別ロジックのif/else分岐をコード中に散らさない。

use super::ExerciseType;
use crate::pose::{LandmarkIndex, LOWER_BODY, UPPER_BODY};

/// レップ判定を駆動するスカラー信号の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatingSignal {
    /// 左右膝角度の平均（スクワット）
    KneeMean,
    /// 左右膝角度の小さい方（ランジ: 前脚の屈曲）
    KneeMin,
    /// 肩外転角度の平均（ジャンピングジャック・ショルダープレス）
    ShoulderAbduction,
    /// 股関節屈曲の大きい方 180 - hip（ハイニー）
    HipFlexionMax,
    /// 肘角度の平均（カール）
    ElbowMean,
    /// 右股関節角度（サイドレッグレイズ）
    RightHip,
    /// 肩基準高からの上昇量（カーフレイズ: 基準はセッション状態で保持）
    ShoulderRise,
    /// 手首-肩間距離の累積（アームサークル）
    WristTravel,
    /// 見かけの肩幅 |x11 - x12|（トーソツイスト）
    ShoulderWidth,
}

/// ヒステリシスの向き
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// 信号がbottomを下回ったらボトム入り、topを上回ったらレップ成立
    Below { bottom: f32, top: f32 },
    /// 信号がbottomを上回ったらボトム入り、topを下回ったらレップ成立
    Above { bottom: f32, top: f32 },
    /// 累積値がthresholdを超えたらレップ成立・リセット（ヒステリシスなし）
    Accumulate { threshold: f32 },
}

/// 深度(0..1)への線形リマップ
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthRemap {
    /// depth = clamp((signal - zero) / (full - zero))
    Linear { zero: f32, full: f32 },
    /// 深度概念のない種目は定数0.5を報告
    Neutral,
}

impl DepthRemap {
    pub fn apply(&self, signal: f32) -> f32 {
        match *self {
            DepthRemap::Linear { zero, full } => ((signal - zero) / (full - zero)).clamp(0.0, 1.0),
            DepthRemap::Neutral => 0.5,
        }
    }
}

/// 種目ごとの静的レコード
#[derive(Debug, Clone)]
pub struct ExerciseSpec {
    pub gating: GatingSignal,
    pub trigger: Trigger,
    /// 連続カウント間の最小間隔（ミリ秒）
    pub debounce_ms: u64,
    pub depth: DepthRemap,
    /// 可視性必須ランドマーク
    pub critical_landmarks: &'static [LandmarkIndex],
    /// 可視性閾値
    pub visibility_threshold: f32,
    /// ボトム入りにフォーム正当性を要求するか
    pub form_gated_bottom: bool,
    /// レップ成立時にもフォーム正当性を要求するか
    pub form_gated_close: bool,
}

impl ExerciseSpec {
    pub fn of(exercise: ExerciseType) -> &'static ExerciseSpec {
        &SPECS[exercise as usize]
    }
}

static SPECS: [ExerciseSpec; ExerciseType::COUNT] = [
    // Squat
    ExerciseSpec {
        gating: GatingSignal::KneeMean,
        trigger: Trigger::Below { bottom: 135.0, top: 160.0 },
        debounce_ms: 1200,
        depth: DepthRemap::Linear { zero: 170.0, full: 110.0 },
        critical_landmarks: LOWER_BODY,
        visibility_threshold: 0.7,
        form_gated_bottom: true,
        form_gated_close: false,
    },
    // Lunge
    ExerciseSpec {
        gating: GatingSignal::KneeMin,
        trigger: Trigger::Below { bottom: 130.0, top: 165.0 },
        debounce_ms: 1500,
        depth: DepthRemap::Linear { zero: 170.0, full: 110.0 },
        critical_landmarks: LOWER_BODY,
        visibility_threshold: 0.7,
        form_gated_bottom: true,
        form_gated_close: false,
    },
    // JumpingJacks
    ExerciseSpec {
        gating: GatingSignal::ShoulderAbduction,
        trigger: Trigger::Above { bottom: 130.0, top: 50.0 },
        debounce_ms: 900,
        depth: DepthRemap::Linear { zero: 40.0, full: 150.0 },
        critical_landmarks: LOWER_BODY,
        visibility_threshold: 0.7,
        form_gated_bottom: true,
        form_gated_close: false,
    },
    // HighKnees
    ExerciseSpec {
        gating: GatingSignal::HipFlexionMax,
        trigger: Trigger::Above { bottom: 65.0, top: 30.0 },
        debounce_ms: 900,
        depth: DepthRemap::Linear { zero: 0.0, full: 70.0 },
        critical_landmarks: LOWER_BODY,
        visibility_threshold: 0.7,
        form_gated_bottom: true,
        form_gated_close: false,
    },
    // BicepCurl
    ExerciseSpec {
        gating: GatingSignal::ElbowMean,
        trigger: Trigger::Below { bottom: 60.0, top: 150.0 },
        debounce_ms: 1200,
        depth: DepthRemap::Linear { zero: 160.0, full: 60.0 },
        critical_landmarks: UPPER_BODY,
        visibility_threshold: 0.6,
        form_gated_bottom: true,
        form_gated_close: true,
    },
    // ShoulderPress
    ExerciseSpec {
        gating: GatingSignal::ShoulderAbduction,
        trigger: Trigger::Above { bottom: 150.0, top: 100.0 },
        debounce_ms: 1500,
        depth: DepthRemap::Linear { zero: 90.0, full: 180.0 },
        critical_landmarks: UPPER_BODY,
        visibility_threshold: 0.6,
        form_gated_bottom: true,
        form_gated_close: true,
    },
    // SideLegRaise
    ExerciseSpec {
        gating: GatingSignal::RightHip,
        trigger: Trigger::Below { bottom: 155.0, top: 170.0 },
        debounce_ms: 1500,
        depth: DepthRemap::Linear { zero: 180.0, full: 140.0 },
        critical_landmarks: LOWER_BODY,
        visibility_threshold: 0.7,
        form_gated_bottom: false,
        form_gated_close: false,
    },
    // CalfRaises
    ExerciseSpec {
        gating: GatingSignal::ShoulderRise,
        trigger: Trigger::Above { bottom: 0.03, top: 0.005 },
        debounce_ms: 1200,
        depth: DepthRemap::Linear { zero: 0.0, full: 0.08 },
        critical_landmarks: LOWER_BODY,
        visibility_threshold: 0.7,
        form_gated_bottom: false,
        form_gated_close: false,
    },
    // ArmCircles
    ExerciseSpec {
        gating: GatingSignal::WristTravel,
        trigger: Trigger::Accumulate { threshold: 15.0 },
        debounce_ms: 1800,
        depth: DepthRemap::Neutral,
        critical_landmarks: UPPER_BODY,
        visibility_threshold: 0.6,
        form_gated_bottom: false,
        form_gated_close: false,
    },
    // TorsoTwist
    ExerciseSpec {
        gating: GatingSignal::ShoulderWidth,
        trigger: Trigger::Below { bottom: 0.10, top: 0.15 },
        debounce_ms: 1200,
        depth: DepthRemap::Neutral,
        critical_landmarks: UPPER_BODY,
        visibility_threshold: 0.6,
        form_gated_bottom: false,
        form_gated_close: false,
    },
];
