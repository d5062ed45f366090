//! 種目別ターゲットテンプレートのローダー
//!
//! `templates/<種目名>.json` から目標角度と許容誤差を読む。
//! 見つからない・壊れている場合は文書化されたフォールバック
//! （knee_angle=100, tolerance=20）を返し、決して失敗しない。

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::exercise::ExerciseType;

/// フォールバックの目標膝角度（度）
pub const DEFAULT_KNEE_ANGLE: f32 = 100.0;
/// フォールバックの許容誤差（度）
pub const DEFAULT_TOLERANCE: f32 = 20.0;

#[derive(Debug, Clone, Deserialize)]
pub struct TargetTemplate {
    #[serde(default)]
    pub target_angles: HashMap<String, f32>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

fn default_tolerance() -> f32 {
    DEFAULT_TOLERANCE
}

impl TargetTemplate {
    pub fn fallback() -> Self {
        let mut target_angles = HashMap::new();
        target_angles.insert("knee_angle".to_string(), DEFAULT_KNEE_ANGLE);
        Self {
            target_angles,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// 目標膝角度（テンプレートに無ければフォールバック値）
    pub fn knee_angle(&self) -> f32 {
        self.target_angles
            .get("knee_angle")
            .copied()
            .unwrap_or(DEFAULT_KNEE_ANGLE)
    }
}

/// テンプレートディレクトリを指すストア
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 種目のテンプレートを読む。失敗時はフォールバック
    pub fn load(&self, exercise: ExerciseType) -> TargetTemplate {
        let path = self.dir.join(format!("{}.json", exercise.name()));
        fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_else(TargetTemplate::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_template_falls_back() {
        let store = TemplateStore::new("no_such_dir");
        let template = store.load(ExerciseType::Squat);
        assert_eq!(template.knee_angle(), DEFAULT_KNEE_ANGLE);
        assert_eq!(template.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_parse_template_json() {
        let template: TargetTemplate =
            serde_json::from_str(r#"{"target_angles": {"knee_angle": 95.0}, "tolerance": 15.0}"#)
                .unwrap();
        assert_eq!(template.knee_angle(), 95.0);
        assert_eq!(template.tolerance, 15.0);
    }

    #[test]
    fn test_partial_template_uses_defaults() {
        let template: TargetTemplate = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(template.knee_angle(), DEFAULT_KNEE_ANGLE);
        assert_eq!(template.tolerance, DEFAULT_TOLERANCE);
    }
}
