//! デモ/同期モードの調停
//!
//! 直近のユーザー活動からコーチの駆動源を決める2状態機械。
//! 深度が閾値を超えたら即MOVING、一定時間静止でIDLEに戻る。
//! 遷移はこの2本のみ。

use crate::config::CoachConfig;

/// コーチの駆動モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachMode {
    /// 時刻駆動のループ再生（ユーザー静止中のお手本）
    Demo,
    /// ユーザーの測定進捗に追従
    Sync,
}

/// ユーザー活動履歴とモード判定
pub struct SyncArbitrator {
    activity_threshold: f32,
    idle_timeout_ms: u64,
    last_move_ms: u64,
    moving: bool,
}

impl SyncArbitrator {
    pub fn new(activity_threshold: f32, idle_timeout_ms: u64) -> Self {
        Self {
            activity_threshold,
            idle_timeout_ms,
            last_move_ms: 0,
            moving: false,
        }
    }

    pub fn from_config(config: &CoachConfig) -> Self {
        Self::new(config.activity_threshold, config.idle_timeout_ms)
    }

    /// 現フレームの深度でモードを更新して返す
    pub fn update(&mut self, depth: f32, now_ms: u64) -> CoachMode {
        if depth > self.activity_threshold {
            self.last_move_ms = now_ms;
            self.moving = true;
        } else if self.moving && now_ms.saturating_sub(self.last_move_ms) > self.idle_timeout_ms {
            self.moving = false;
        }

        if self.moving {
            CoachMode::Sync
        } else {
            CoachMode::Demo
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }
}

impl Default for SyncArbitrator {
    fn default() -> Self {
        Self::from_config(&CoachConfig::default())
    }
}
