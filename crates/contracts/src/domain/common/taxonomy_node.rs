use super::AggregateId;

/// Узел таксономии: категория, подкатегория или локация
pub trait TaxonomyNode: Clone {
    type NodeId: AggregateId;

    /// ID узла
    fn node_id(&self) -> Self::NodeId;

    /// Отображаемое название узла
    fn node_name(&self) -> &str;

    /// Порядок сортировки, заданный администратором
    fn sort_order(&self) -> i32;

    /// Скрыт ли узел из публичной части
    fn is_hidden(&self) -> bool;
}

/// Сортировка узлов: сначала `sort_order`, затем название без учета регистра.
///
/// Это порядок, в котором бэкенд отдает таксономию; фильтр видимости его не меняет.
pub fn sort_nodes<N: TaxonomyNode>(nodes: &mut [N]) {
    nodes.sort_by(|a, b| {
        a.sort_order()
            .cmp(&b.sort_order())
            .then_with(|| a.node_name().to_lowercase().cmp(&b.node_name().to_lowercase()))
    });
}
