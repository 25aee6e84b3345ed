use serde::{Deserialize, Serialize};

/// Статус модерации бизнеса. В публичную часть попадают только одобренные.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl BusinessStatus {
    /// Код статуса (хранится в БД)
    pub fn code(&self) -> &'static str {
        match self {
            BusinessStatus::Pending => "pending",
            BusinessStatus::Approved => "approved",
            BusinessStatus::Rejected => "rejected",
        }
    }

    /// Человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            BusinessStatus::Pending => "На модерации",
            BusinessStatus::Approved => "Одобрен",
            BusinessStatus::Rejected => "Отклонен",
        }
    }

    pub fn all() -> Vec<BusinessStatus> {
        vec![
            BusinessStatus::Pending,
            BusinessStatus::Approved,
            BusinessStatus::Rejected,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(BusinessStatus::Pending),
            "approved" => Some(BusinessStatus::Approved),
            "rejected" => Some(BusinessStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_for_all() {
        for status in BusinessStatus::all() {
            assert_eq!(BusinessStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(BusinessStatus::from_code("archived"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&BusinessStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
