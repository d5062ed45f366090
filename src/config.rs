use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub coach: CoachConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// 目標フレームレート（リプレイのタイムスタンプ刻みに使用）
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CoachConfig {
    /// 同期モードに入る深度閾値
    #[serde(default = "default_activity_threshold")]
    pub activity_threshold: f32,
    /// この時間動きがなければデモモードへ戻る（ミリ秒）
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateConfig {
    /// 種目別ターゲットテンプレートのディレクトリ
    #[serde(default = "default_template_dir")]
    pub dir: String,
}

fn default_target_fps() -> u32 { 30 }
fn default_activity_threshold() -> f32 { 0.1 }
fn default_idle_timeout() -> u64 { 2000 }
fn default_template_dir() -> String { "templates".to_string() }

impl Default for AppConfig {
    fn default() -> Self {
        Self { target_fps: default_target_fps() }
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            activity_threshold: default_activity_threshold(),
            idle_timeout_ms: default_idle_timeout(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self { dir: default_template_dir() }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがない・壊れている場合はデフォルトで起動する
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
