use crate::domain::common::{AggregateId, TaxonomyNode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Новый порядок узлов (POST /api/<node>/reorder)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

/// Флаг скрытия узла (POST /api/<node>/:id/hidden)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HiddenRequest {
    pub hidden: bool,
}

/// Рассчитать новые значения `sort_order`: позиция в списке = порядок.
///
/// Ничего не пишет; возвращает ошибку, если ID некорректен, повторяется
/// или не найден среди `existing`.
pub fn plan_reorder<N: TaxonomyNode>(
    existing: &[N],
    ids: &[String],
) -> Result<Vec<(N::NodeId, i32)>, String> {
    if ids.is_empty() {
        return Err("Список для сортировки пуст".into());
    }
    let known: HashSet<N::NodeId> = existing.iter().map(|n| n.node_id()).collect();
    let mut seen = HashSet::new();
    let mut plan = Vec::with_capacity(ids.len());
    for (index, raw) in ids.iter().enumerate() {
        let id = <N::NodeId as AggregateId>::from_string(raw.trim())?;
        if !known.contains(&id) {
            return Err(format!("Элемент не найден: {}", raw));
        }
        if !seen.insert(id) {
            return Err(format!("Элемент указан дважды: {}", raw));
        }
        plan.push((id, index as i32));
    }
    Ok(plan)
}

/// Переместить элемент на одну позицию вверх (`-1`) или вниз (`+1`).
/// Возвращает `None`, если двигать некуда.
pub fn move_by_one<T: Clone>(items: &[T], index: usize, up: bool) -> Option<Vec<T>> {
    let target = if up { index.checked_sub(1)? } else { index + 1 };
    if index >= items.len() || target >= items.len() {
        return None;
    }
    let mut out = items.to_vec();
    out.swap(index, target);
    Some(out)
}
