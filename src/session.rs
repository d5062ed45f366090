//! セッションオーケストレータ
//!
//! 1フレーム分のパイプラインを固定順序で実行する:
//! 角度抽出 → フォーム検証 → レップ状態機械 → モード調停 → 姿勢合成 → 補正。
//! すべて同一フレームのスナップショットに対して動き、途中で他フレームの
//! データを参照しない。

use crate::biomech::joint_angles;
use crate::coach::synth::reference_pose;
use crate::coach::{CoachMode, CorrectionEngine, SyncArbitrator};
use crate::config::Config;
use crate::exercise::spec::ExerciseSpec;
use crate::exercise::{ExerciseType, FormValidator, RepTracker};
use crate::pose::Pose;
use crate::template::{TargetTemplate, TemplateStore};

/// 検出なしフレームの標準メッセージ
pub const MSG_NO_BODY: &str = "NO BODY DETECTED";

/// レンダラー/HUDへ渡す1フレーム分の出力タプル
///
/// 入力が完全に欠けていても必ず生成される
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// 合成・補正済みの参照姿勢（コーチ）
    pub reference: Pose,
    /// ユーザー姿勢のパススルー（レンダラー用）
    pub user: Option<Pose>,
    /// フォーム正誤
    pub correct: bool,
    /// 単一のフィードバックメッセージ
    pub feedback: &'static str,
    /// アクティブ種目のレップカウント
    pub reps: u32,
    /// 深度/進捗 (0.0〜1.0)
    pub depth: f32,
    /// コーチの駆動モード
    pub mode: CoachMode,
}

pub struct CoachSession {
    tracker: RepTracker,
    arbitrator: SyncArbitrator,
    templates: TemplateStore,
    template: TargetTemplate,
    active: ExerciseType,
}

impl CoachSession {
    pub fn new(config: &Config) -> Self {
        let templates = TemplateStore::new(&config.templates.dir);
        let template = templates.load(ExerciseType::Squat);
        Self {
            tracker: RepTracker::new(),
            arbitrator: SyncArbitrator::from_config(&config.coach),
            templates,
            template,
            active: ExerciseType::Squat,
        }
    }

    pub fn active_exercise(&self) -> ExerciseType {
        self.active
    }

    /// 序数で種目を切替える（キーバインド契約）
    ///
    /// 切替先の状態はリセットされ、テンプレートを読み直す
    pub fn select_exercise(&mut self, index: usize) -> Option<ExerciseType> {
        let exercise = ExerciseType::from_index(index)?;
        self.active = exercise;
        self.tracker.select(exercise);
        self.template = self.templates.load(exercise);
        Some(exercise)
    }

    /// 1フレーム処理
    ///
    /// 検出なし（pose=None）では状態を一切変更せず、固定の出力を返す
    pub fn process_frame(&mut self, pose: Option<&Pose>, now_ms: u64) -> FrameOutput {
        let exercise = self.active;

        let pose = match pose {
            Some(p) => p,
            None => {
                return FrameOutput {
                    reference: reference_pose(exercise, now_ms, None),
                    user: None,
                    correct: false,
                    feedback: MSG_NO_BODY,
                    reps: self.tracker.rep_count(exercise),
                    depth: 0.0,
                    mode: CoachMode::Demo,
                };
            }
        };

        let angles = joint_angles(pose);

        let spec = ExerciseSpec::of(exercise);
        let visible = pose.all_visible(spec.critical_landmarks, spec.visibility_threshold);
        let form = FormValidator::check(exercise, pose, &angles);

        let progress = self
            .tracker
            .update(exercise, &angles, pose, form.ok, visible, now_ms);

        let mode = self.arbitrator.update(progress.depth, now_ms);
        let mut reference = match mode {
            CoachMode::Sync => reference_pose(exercise, now_ms, Some(progress.depth)),
            CoachMode::Demo => reference_pose(exercise, now_ms, None),
        };

        // 膝角度ゲートの種目のみ深度エラーの強調バイアスをかける
        if matches!(exercise, ExerciseType::Squat | ExerciseType::Lunge) {
            reference =
                CorrectionEngine::corrected_ghost(&reference, &angles, self.template.knee_angle());
        }

        FrameOutput {
            reference,
            user: Some(pose.clone()),
            correct: form.ok,
            feedback: form.message,
            reps: self.tracker.rep_count(exercise),
            depth: progress.depth,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::form::{MSG_GOOD, MSG_STEP_BACK};
    use crate::pose::LandmarkIndex;
    use crate::testutil::{pose_with_knee_angle, standing_pose};

    fn session() -> CoachSession {
        CoachSession::new(&Config::default())
    }

    #[test]
    fn test_no_pose_output_is_well_defined() {
        let mut s = session();
        let out = s.process_frame(None, 0);
        assert!(!out.correct);
        assert_eq!(out.feedback, MSG_NO_BODY);
        assert_eq!(out.depth, 0.0);
        assert_eq!(out.reps, 0);
        assert_eq!(out.mode, CoachMode::Demo);
    }

    #[test]
    fn test_no_pose_does_not_mutate_state() {
        let mut s = session();
        // ボトムまで降りる
        let deep = pose_with_knee_angle(125.0);
        s.process_frame(Some(&deep), 0);
        // 検出なしフレームを挟む
        s.process_frame(None, 100);
        // トップ通過でレップが成立する（bottomedが維持されている）
        let up = pose_with_knee_angle(170.0);
        let out = s.process_frame(Some(&up), 1500);
        assert_eq!(out.reps, 1);
    }

    #[test]
    fn test_full_squat_rep_through_session() {
        let mut s = session();
        let mut now = 0u64;
        for knee in [170.0, 150.0, 125.0, 125.0, 150.0, 170.0] {
            now += 400;
            let pose = pose_with_knee_angle(knee);
            s.process_frame(Some(&pose), now);
        }
        let pose = pose_with_knee_angle(170.0);
        let out = s.process_frame(Some(&pose), now + 400);
        assert_eq!(out.reps, 1);
        assert_eq!(out.feedback, MSG_GOOD);
        assert!(out.correct);
    }

    #[test]
    fn test_low_visibility_feedback() {
        let mut s = session();
        let mut pose = standing_pose();
        pose.get_mut(LandmarkIndex::LeftAnkle).visibility = 0.3;

        let out = s.process_frame(Some(&pose), 0);
        assert!(!out.correct);
        assert_eq!(out.feedback, MSG_STEP_BACK);
    }

    #[test]
    fn test_switch_resets_counter() {
        let mut s = session();
        // 1レップ完了
        let mut now = 0u64;
        for knee in [170.0, 125.0, 170.0] {
            now += 700;
            let pose = pose_with_knee_angle(knee);
            s.process_frame(Some(&pose), now);
        }
        assert_eq!(s.tracker.rep_count(ExerciseType::Squat), 1);

        // ランジへ切替、立位のまま数フレーム
        assert!(s.select_exercise(ExerciseType::Lunge as usize).is_some());
        let standing = standing_pose();
        for _ in 0..3 {
            now += 33;
            s.process_frame(Some(&standing), now);
        }

        // スクワットへ戻る: 切替でスクワット状態はリセットされる
        assert!(s.select_exercise(ExerciseType::Squat as usize).is_some());
        let out = s.process_frame(Some(&standing), now + 33);
        assert_eq!(out.reps, 0);
    }

    #[test]
    fn test_deep_user_switches_coach_to_sync() {
        let mut s = session();
        let deep = pose_with_knee_angle(125.0);
        let out = s.process_frame(Some(&deep), 0);
        assert!(out.depth > 0.1);
        assert_eq!(out.mode, CoachMode::Sync);
    }

    #[test]
    fn test_idle_user_gets_demo_coach() {
        let mut s = session();
        let standing = standing_pose();
        let out = s.process_frame(Some(&standing), 0);
        assert_eq!(out.mode, CoachMode::Demo);
    }

    #[test]
    fn test_invalid_exercise_index_rejected() {
        let mut s = session();
        assert!(s.select_exercise(99).is_none());
        assert_eq!(s.active_exercise(), ExerciseType::Squat);
    }
}
