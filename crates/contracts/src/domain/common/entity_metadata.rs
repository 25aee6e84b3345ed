use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (lifecycle tracking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Дата последнего обновления
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Мягкое удаление (soft delete)
    pub is_deleted: bool,
    /// Версия для optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    /// Создать новые метаданные для нового агрегата
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            version: 0,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    /// Увеличить версию (каждая запись агрегата)
    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Совпадает ли версия, которую видел клиент, с текущей (`None` - не проверять)
    pub fn is_current(&self, expected: Option<i32>) -> bool {
        expected.map_or(true, |v| v == self.version)
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_check() {
        let mut m = EntityMetadata::new();
        assert_eq!(m.version, 0);
        m.increment_version();
        assert!(m.is_current(None));
        assert!(m.is_current(Some(1)));
        assert!(!m.is_current(Some(0)));
    }
}
