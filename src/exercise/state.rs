//! レップカウントの状態機械
//!
//! ヒステリシス（ボトム/トップ2閾値）とデバウンス（最小カウント間隔）で
//! ノイズによる二重カウントを防ぐ。状態は種目ごとに完全に独立。

use super::spec::{ExerciseSpec, GatingSignal, Trigger};
use super::ExerciseType;
use crate::biomech::{elbow_angle, shoulder_abduction_mean, JointAngles};
use crate::pose::{LandmarkIndex, Pose};

/// 種目ひとつ分の可変状態
///
/// 暗黙のstaticは持たない。セッション開始時に全種目分を初期化し、
/// 種目切替・可視性喪失でリセットする。
#[derive(Debug, Clone, Copy)]
struct ExerciseState {
    reps: u32,
    bottomed: bool,
    last_rep_ms: u64,
    /// カーフレイズの基準肩高（最初の有効フレームで確定）
    baseline_y: Option<f32>,
    /// アームサークルの累積距離
    travel: f32,
}

impl ExerciseState {
    fn new() -> Self {
        Self {
            reps: 0,
            bottomed: false,
            last_rep_ms: 0,
            baseline_y: None,
            travel: 0.0,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// 1フレーム分の更新結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 正規化された深度/進捗 (0.0〜1.0)
    pub depth: f32,
    /// このフレームでレップが成立したか
    pub counted: bool,
}

/// 全種目のレップ状態を所有するトラッカー
///
/// 状態の外部可変参照は公開しない。読み出し（カウント・深度）と
/// リセット（種目切替時）のみ。
pub struct RepTracker {
    states: [ExerciseState; ExerciseType::COUNT],
}

impl RepTracker {
    pub fn new() -> Self {
        Self {
            states: [ExerciseState::new(); ExerciseType::COUNT],
        }
    }

    pub fn rep_count(&self, exercise: ExerciseType) -> u32 {
        self.states[exercise as usize].reps
    }

    /// 種目切替。切替先の状態を全リセットして新しい計測窓を開始する
    pub fn select(&mut self, exercise: ExerciseType) {
        self.states[exercise as usize].reset();
    }

    /// アクティブ種目の1フレーム更新
    ///
    /// 分離不変条件: 他種目で蓄積した部分動作が切替後に勝手にレップ成立
    /// しないよう、毎フレーム先に他種目のbottomedを落とす。
    pub fn update(
        &mut self,
        exercise: ExerciseType,
        angles: &JointAngles,
        pose: &Pose,
        form_ok: bool,
        visible: bool,
        now_ms: u64,
    ) -> Progress {
        for (i, state) in self.states.iter_mut().enumerate() {
            if i != exercise as usize {
                state.bottomed = false;
            }
        }

        let spec = ExerciseSpec::of(exercise);
        let state = &mut self.states[exercise as usize];

        if !visible {
            // 低可視性ノイズでカウントしない。復帰後の stale な成立も防ぐ
            state.bottomed = false;
            state.baseline_y = None;
            return Progress { depth: 0.0, counted: false };
        }

        let signal = match Self::gating_signal(spec.gating, angles, pose, state) {
            Some(v) => v,
            None => {
                // 退化ジオメトリ等で信号が計算できないフレームは状態を動かさない
                return Progress { depth: 0.0, counted: false };
            }
        };

        let mut counted = false;
        match spec.trigger {
            Trigger::Below { bottom, top } => {
                if signal < bottom {
                    if form_ok || !spec.form_gated_bottom {
                        state.bottomed = true;
                    }
                } else if signal > top && state.bottomed {
                    counted = Self::try_close(state, spec, form_ok, now_ms);
                }
            }
            Trigger::Above { bottom, top } => {
                if signal > bottom {
                    if form_ok || !spec.form_gated_bottom {
                        state.bottomed = true;
                    }
                } else if signal < top && state.bottomed {
                    counted = Self::try_close(state, spec, form_ok, now_ms);
                }
            }
            Trigger::Accumulate { threshold } => {
                state.travel += signal;
                if state.travel > threshold
                    && now_ms.saturating_sub(state.last_rep_ms) >= spec.debounce_ms
                {
                    state.reps += 1;
                    state.last_rep_ms = now_ms;
                    state.travel = 0.0;
                    counted = true;
                }
            }
        }

        let depth = match spec.gating {
            // 累積信号の深度は定数（リズム種目）
            GatingSignal::WristTravel => spec.depth.apply(state.travel),
            _ => spec.depth.apply(signal),
        };

        Progress { depth, counted }
    }

    /// トップ閾値通過時のレップ成立判定
    ///
    /// デバウンス不成立時は bottomed を保持する。間隔が満ちた後の
    /// フレームで信号がまだトップ側にあれば、そのとき成立する。
    fn try_close(state: &mut ExerciseState, spec: &ExerciseSpec, form_ok: bool, now_ms: u64) -> bool {
        if spec.form_gated_close && !form_ok {
            return false;
        }
        if now_ms.saturating_sub(state.last_rep_ms) < spec.debounce_ms {
            return false;
        }
        state.reps += 1;
        state.last_rep_ms = now_ms;
        state.bottomed = false;
        true
    }

    fn gating_signal(
        gating: GatingSignal,
        angles: &JointAngles,
        pose: &Pose,
        state: &mut ExerciseState,
    ) -> Option<f32> {
        use LandmarkIndex::*;

        match gating {
            GatingSignal::KneeMean => Some(angles.knee_mean()),
            GatingSignal::KneeMin => {
                Some(f32::min(
                    angles.left_knee.unwrap_or(180.0),
                    angles.right_knee.unwrap_or(180.0),
                ))
            }
            GatingSignal::ShoulderAbduction => shoulder_abduction_mean(pose),
            GatingSignal::HipFlexionMax => {
                let left = 180.0 - angles.left_hip.unwrap_or(180.0);
                let right = 180.0 - angles.right_hip.unwrap_or(180.0);
                Some(left.max(right))
            }
            GatingSignal::ElbowMean => {
                let left = elbow_angle(pose, true)?;
                let right = elbow_angle(pose, false)?;
                Some((left + right) / 2.0)
            }
            GatingSignal::RightHip => Some(angles.right_hip.unwrap_or(180.0)),
            GatingSignal::ShoulderRise => {
                let shoulder_y = pose.get(LeftShoulder).y;
                let base = *state.baseline_y.get_or_insert(shoulder_y);
                Some(base - shoulder_y)
            }
            GatingSignal::WristTravel => {
                let wrist = pose.get(LeftWrist);
                let shoulder = pose.get(LeftShoulder);
                let dx = wrist.x - shoulder.x;
                let dy = wrist.y - shoulder.y;
                Some((dx * dx + dy * dy).sqrt())
            }
            GatingSignal::ShoulderWidth => {
                Some((pose.get(LeftShoulder).x - pose.get(RightShoulder).x).abs())
            }
        }
    }
}

impl Default for RepTracker {
    fn default() -> Self {
        Self::new()
    }
}
