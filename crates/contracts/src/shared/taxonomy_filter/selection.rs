use super::active_set::{
    active_category_ids, active_location_ids, active_subcategory_ids, ActiveSets,
};
use super::link::HasTaxonomyLink;
use crate::domain::a001_category::aggregate::CategoryId;
use crate::domain::a002_subcategory::aggregate::SubcategoryId;
use crate::domain::a003_location::aggregate::LocationId;
use crate::domain::common::aggregate_id::{id_or_empty, AggregateId};
use serde::{Deserialize, Serialize};

/// Положение пользователя в дереве: категория → подкатегория → локация.
///
/// `None` на уровне означает "без фильтра". Если задана подкатегория, она
/// принадлежит выбранной категории; сброс категории сбрасывает оба дочерних уровня.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub location_id: Option<LocationId>,
}

/// Состояние выбора. Локация - уточнение, отдельного состояния не порождает.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoCategory,
    CategoryOnly,
    CategoryAndSub,
}

/// Результат починки выбора: какой уровень (вместе с потомками) был сброшен
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepairOutcome {
    #[default]
    Unchanged,
    LocationCleared,
    SubcategoryCleared,
    CategoryCleared,
}

impl RepairOutcome {
    pub fn is_changed(&self) -> bool {
        *self != RepairOutcome::Unchanged
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        match (self.category_id, self.subcategory_id) {
            (None, _) => SelectionState::NoCategory,
            (Some(_), None) => SelectionState::CategoryOnly,
            (Some(_), Some(_)) => SelectionState::CategoryAndSub,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.subcategory_id.is_none() && self.location_id.is_none()
    }

    // ========================================================================
    // Переходы
    // ========================================================================

    /// Выбрать категорию. Подкатегория и локация всегда сбрасываются.
    pub fn select_category(&mut self, id: CategoryId) {
        self.category_id = Some(id);
        self.subcategory_id = None;
        self.location_id = None;
    }

    /// Выбрать подкатегорию, сбросив локацию.
    ///
    /// Без выбранной категории переход не выполняется: подкатегории
    /// предлагаются только внутри категории. Возвращает `false` в этом случае.
    pub fn select_subcategory(&mut self, id: SubcategoryId) -> bool {
        if self.category_id.is_none() {
            return false;
        }
        self.subcategory_id = Some(id);
        self.location_id = None;
        true
    }

    pub fn select_location(&mut self, id: LocationId) {
        self.location_id = Some(id);
    }

    /// Сбросить все три уровня
    pub fn clear_category(&mut self) {
        self.category_id = None;
        self.subcategory_id = None;
        self.location_id = None;
    }

    /// Сбросить подкатегорию и локацию, категория остается
    pub fn clear_subcategory(&mut self) {
        self.subcategory_id = None;
        self.location_id = None;
    }

    pub fn clear_location(&mut self) {
        self.location_id = None;
    }

    // ========================================================================
    // Починка
    // ========================================================================

    /// Проверка выбора сверху вниз.
    ///
    /// Каждая проверка получает уже проверенные верхние уровни: сброс верхнего
    /// уровня меняет то, что считается допустимым ниже, поэтому порядок менять нельзя.
    pub fn repair_top_down<FC, FS, FL>(
        &mut self,
        category_ok: FC,
        subcategory_ok: FS,
        location_ok: FL,
    ) -> RepairOutcome
    where
        FC: FnOnce(CategoryId) -> bool,
        FS: FnOnce(Option<CategoryId>, SubcategoryId) -> bool,
        FL: FnOnce(Option<CategoryId>, Option<SubcategoryId>, LocationId) -> bool,
    {
        if let Some(category_id) = self.category_id {
            if !category_ok(category_id) {
                self.clear_category();
                return RepairOutcome::CategoryCleared;
            }
        }
        if let Some(subcategory_id) = self.subcategory_id {
            if !subcategory_ok(self.category_id, subcategory_id) {
                self.clear_subcategory();
                return RepairOutcome::SubcategoryCleared;
            }
        }
        if let Some(location_id) = self.location_id {
            if !location_ok(self.category_id, self.subcategory_id, location_id) {
                self.clear_location();
                return RepairOutcome::LocationCleared;
            }
        }
        RepairOutcome::Unchanged
    }

    /// Сбросить устаревший выбор по активным множествам снимка бизнесов
    pub fn repair<B: HasTaxonomyLink>(&mut self, businesses: &[B]) -> RepairOutcome {
        self.repair_top_down(
            |c| active_category_ids(businesses).contains(&c),
            |c, s| active_subcategory_ids(businesses, c).contains(&s),
            |c, s, l| active_location_ids(businesses, c, s).contains(&l),
        )
    }

    /// Починка по заранее посчитанным активным множествам.
    ///
    /// `active` должны быть получены для этого же выбора (`ActiveSets::derive`):
    /// после сброса уровня нижние уровни уже не проверяются, так что множества
    /// исходного выбора остаются корректными.
    pub fn repair_with(&mut self, active: &ActiveSets) -> RepairOutcome {
        self.repair_top_down(
            |c| active.categories.contains(&c),
            |_, s| active.subcategories.contains(&s),
            |_, _, l| active.locations.contains(&l),
        )
    }
}

/// Проводная форма выбора: пустая строка = "без фильтра"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionDto {
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub subcategory_id: String,
    #[serde(default)]
    pub location_id: String,
}

impl From<&SelectionDto> for Selection {
    /// Некорректные ID трактуются как устаревший выбор и превращаются в `None`.
    /// Подкатегория без категории отбрасывается.
    fn from(dto: &SelectionDto) -> Self {
        let category_id = CategoryId::from_filter(&dto.category_id);
        let subcategory_id = category_id.and(SubcategoryId::from_filter(&dto.subcategory_id));
        Self {
            category_id,
            subcategory_id,
            location_id: LocationId::from_filter(&dto.location_id),
        }
    }
}

impl From<Selection> for SelectionDto {
    fn from(s: Selection) -> Self {
        Self {
            category_id: id_or_empty(s.category_id),
            subcategory_id: id_or_empty(s.subcategory_id),
            location_id: id_or_empty(s.location_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::taxonomy_filter::fixtures::*;

    fn full_selection() -> Selection {
        let mut s = Selection::new();
        s.select_category(cat_id(1));
        assert!(s.select_subcategory(sub_id(1)));
        s.select_location(loc_id(1));
        s
    }

    #[test]
    fn test_state_machine_states() {
        let mut s = Selection::new();
        assert_eq!(s.state(), SelectionState::NoCategory);
        s.select_category(cat_id(1));
        assert_eq!(s.state(), SelectionState::CategoryOnly);
        s.select_subcategory(sub_id(1));
        assert_eq!(s.state(), SelectionState::CategoryAndSub);
        s.select_location(loc_id(1));
        assert_eq!(s.state(), SelectionState::CategoryAndSub);
    }

    #[test]
    fn test_select_category_clears_descendants() {
        let mut s = full_selection();
        s.select_category(cat_id(2));
        assert_eq!(s.category_id, Some(cat_id(2)));
        assert_eq!(s.subcategory_id, None);
        assert_eq!(s.location_id, None);

        // повторный выбор той же категории тоже сбрасывает потомков
        let mut s = full_selection();
        s.select_category(cat_id(1));
        assert_eq!(s.subcategory_id, None);
        assert_eq!(s.location_id, None);
    }

    #[test]
    fn test_select_subcategory_requires_category() {
        let mut s = Selection::new();
        s.select_location(loc_id(2));
        assert!(!s.select_subcategory(sub_id(1)));
        assert_eq!(s.subcategory_id, None);
        assert_eq!(s.location_id, Some(loc_id(2)));
    }

    #[test]
    fn test_select_subcategory_clears_location() {
        let mut s = full_selection();
        assert!(s.select_subcategory(sub_id(2)));
        assert_eq!(s.category_id, Some(cat_id(1)));
        assert_eq!(s.subcategory_id, Some(sub_id(2)));
        assert_eq!(s.location_id, None);
    }

    #[test]
    fn test_clear_transitions() {
        let mut s = full_selection();
        s.clear_location();
        assert_eq!(s.location_id, None);
        assert_eq!(s.subcategory_id, Some(sub_id(1)));

        let mut s = full_selection();
        s.clear_subcategory();
        assert_eq!(s.category_id, Some(cat_id(1)));
        assert_eq!(s.subcategory_id, None);
        assert_eq!(s.location_id, None);

        let mut s = full_selection();
        s.clear_category();
        assert!(s.is_empty());
    }

    #[test]
    fn test_repair_clears_stale_category_and_descendants() {
        let businesses = vec![link(2, 2, 2)];
        let mut s = full_selection();
        assert_eq!(s.repair(&businesses), RepairOutcome::CategoryCleared);
        assert!(s.is_empty());
    }

    #[test]
    fn test_repair_clears_stale_subcategory_keeps_category() {
        let businesses = vec![link(1, 2, 1)];
        let mut s = full_selection();
        assert_eq!(s.repair(&businesses), RepairOutcome::SubcategoryCleared);
        assert_eq!(s.category_id, Some(cat_id(1)));
        assert_eq!(s.subcategory_id, None);
        assert_eq!(s.location_id, None);
    }

    #[test]
    fn test_repair_clears_only_stale_location() {
        let businesses = vec![link(1, 1, 2)];
        let mut s = full_selection();
        assert_eq!(s.repair(&businesses), RepairOutcome::LocationCleared);
        assert_eq!(s.category_id, Some(cat_id(1)));
        assert_eq!(s.subcategory_id, Some(sub_id(1)));
        assert_eq!(s.location_id, None);
    }

    #[test]
    fn test_repair_location_checked_against_validated_upper_levels() {
        // локация 1 активна только у бизнеса другой подкатегории
        let businesses = vec![link(1, 1, 2), link(1, 3, 1)];
        let mut s = full_selection();
        assert_eq!(s.repair(&businesses), RepairOutcome::LocationCleared);
        assert_eq!(s.subcategory_id, Some(sub_id(1)));
    }

    #[test]
    fn test_repair_valid_selection_unchanged() {
        let businesses = vec![link(1, 1, 1)];
        let mut s = full_selection();
        assert_eq!(s.repair(&businesses), RepairOutcome::Unchanged);
        assert_eq!(s, full_selection());
    }

    #[test]
    fn test_repair_with_precomputed_sets_matches_repair() {
        let snapshots = [
            vec![link(1, 1, 1)],
            vec![link(1, 2, 1)],
            vec![link(1, 1, 2), link(1, 3, 1)],
            vec![link(2, 2, 2)],
        ];
        for businesses in snapshots {
            let mut direct = full_selection();
            let mut precomputed = full_selection();
            let active = ActiveSets::derive(&businesses, &precomputed);
            assert_eq!(direct.repair(&businesses), precomputed.repair_with(&active));
            assert_eq!(direct, precomputed);
        }
    }

    #[test]
    fn test_dto_conversion() {
        let dto = SelectionDto {
            category_id: cat_id(1).as_string(),
            subcategory_id: "".into(),
            location_id: "broken".into(),
        };
        let s = Selection::from(&dto);
        assert_eq!(s.category_id, Some(cat_id(1)));
        assert_eq!(s.subcategory_id, None);
        assert_eq!(s.location_id, None);

        let back = SelectionDto::from(s);
        assert_eq!(back.category_id, cat_id(1).as_string());
        assert_eq!(back.subcategory_id, "");
        assert_eq!(back.location_id, "");
    }

    #[test]
    fn test_dto_drops_subcategory_without_category() {
        let dto = SelectionDto {
            category_id: "".into(),
            subcategory_id: sub_id(1).as_string(),
            location_id: "".into(),
        };
        assert_eq!(Selection::from(&dto), Selection::default());
    }
}
