//! 运行环境 - 基础设施层
//!
//! 只暴露"环境偏好哪种配色"的能力，主题的读写走 [`KeyValueStore`](super::KeyValueStore)

use crate::models::ThemeMode;

/// 运行环境
pub trait Environment {
    /// 环境偏好的主题，无法判断时返回 None
    fn ambient_preference(&self) -> Option<ThemeMode>;
}

/// 真实终端环境
///
/// 优先使用配置里的 `prefers_color_scheme`，否则读取 `COLORFGBG`
/// （形如 `15;0`，背景色号小于 7 视为深色终端）
#[derive(Debug, Clone, Default)]
pub struct SystemEnvironment {
    configured: Option<String>,
}

impl SystemEnvironment {
    pub fn new(configured: Option<String>) -> Self {
        Self { configured }
    }

    fn from_colorfgbg(value: &str) -> Option<ThemeMode> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(if background < 7 || background == 8 {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        })
    }
}

impl Environment for SystemEnvironment {
    fn ambient_preference(&self) -> Option<ThemeMode> {
        if let Some(mode) = self.configured.as_deref().and_then(ThemeMode::parse) {
            return Some(mode);
        }
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Self::from_colorfgbg(&v))
    }
}

/// 固定偏好的环境
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedEnvironment(pub Option<ThemeMode>);

impl Environment for FixedEnvironment {
    fn ambient_preference(&self) -> Option<ThemeMode> {
        self.0
    }
}
