use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Ord + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;

    /// Разобрать ID из параметра фильтра.
    ///
    /// Пустая строка означает "без фильтра"; некорректный UUID трактуется так же,
    /// как устаревший выбор, и тоже дает `None`.
    fn from_filter(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        Self::from_string(trimmed).ok()
    }
}

impl AggregateId for uuid::Uuid {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s).map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Строковая форма необязательного ID: `""` для `None`
pub fn id_or_empty<Id: AggregateId>(id: Option<Id>) -> String {
    id.map(|v| v.as_string()).unwrap_or_default()
}
