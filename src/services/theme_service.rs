//! 主题服务 - 业务能力层

use crate::error::StorageError;
use crate::infrastructure::{Environment, KeyValueStore};
use crate::models::ThemeMode;
use tracing::{debug, warn};

/// 主题在存储中的键
pub const THEME_KEY: &str = "theme";

/// 主题服务
///
/// 初始主题：存储里有合法值就用它，否则看环境偏好，都没有则为浅色
pub struct ThemeService<E> {
    environment: E,
}

impl<E: Environment> ThemeService<E> {
    pub fn new(environment: E) -> Self {
        Self { environment }
    }

    pub fn initial(&self, store: &impl KeyValueStore) -> ThemeMode {
        match store.get(THEME_KEY) {
            Some(raw) => match ThemeMode::parse(&raw) {
                Some(mode) => return mode,
                None => warn!("⚠️ 无法识别的主题值 {:?}，改用环境偏好", raw),
            },
            None => debug!("未保存主题，使用环境偏好"),
        }
        self.environment.ambient_preference().unwrap_or_default()
    }

    /// 切换主题并保存，返回新主题
    pub fn toggle(
        &self,
        current: ThemeMode,
        store: &mut impl KeyValueStore,
    ) -> Result<ThemeMode, StorageError> {
        let next = current.toggled();
        store.set(THEME_KEY, next.as_str().to_string())?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{FixedEnvironment, MemoryStore};

    #[test]
    fn persisted_choice_beats_ambient_preference() {
        let service = ThemeService::new(FixedEnvironment(Some(ThemeMode::Dark)));
        let store = MemoryStore::new().with_entry(THEME_KEY, "light");
        assert_eq!(service.initial(&store), ThemeMode::Light);
    }

    #[test]
    fn ambient_preference_used_without_choice() {
        let service = ThemeService::new(FixedEnvironment(Some(ThemeMode::Dark)));
        assert_eq!(service.initial(&MemoryStore::new()), ThemeMode::Dark);

        let unknown = ThemeService::new(FixedEnvironment(None));
        assert_eq!(unknown.initial(&MemoryStore::new()), ThemeMode::Light);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let service = ThemeService::new(FixedEnvironment(None));
        let mut store = MemoryStore::new();

        let next = service.toggle(ThemeMode::Light, &mut store).unwrap();
        assert_eq!(next, ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(service.initial(&store), ThemeMode::Dark);

        let back = service.toggle(next, &mut store).unwrap();
        assert_eq!(back, ThemeMode::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }
}
