//! Состояние панели карточки товара.
//!
//! `committed` это id, который сейчас запрошен. `persisted` это последняя
//! успешно загруженная карточка: она остаётся на экране при ошибке
//! следующей загрузки.

use contracts::domain::a001_product::aggregate::{ProductDetail, ProductId};
use contracts::domain::common::AggregateId;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    /// Ничего не выбрано
    Idle,
    /// Идёт первая загрузка, показать нечего
    Loading,
    /// Карточка на экране (возможно, грузится следующая)
    Ready,
}

/// Чем закончилась загрузка
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// На экране новый товар: параметры графика надо сбросить
    Replaced,
    /// Тот же товар, что и был (в том числе неудачная перезагрузка
    /// показанной карточки: она остаётся, баннера нет)
    Unchanged,
    /// Ошибка: показать баннер, на экране остаётся прежнее
    Failed(String),
    /// Ответ по id, который уже не запрошен
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPanelState {
    committed: Option<ProductId>,
    persisted: Option<(ProductId, Arc<ProductDetail>)>,
}

impl DetailPanelState {
    pub fn committed(&self) -> Option<&ProductId> {
        self.committed.as_ref()
    }

    pub fn persisted_id(&self) -> Option<&ProductId> {
        self.persisted.as_ref().map(|(id, _)| id)
    }

    pub fn detail(&self) -> Option<Arc<ProductDetail>> {
        self.persisted.as_ref().map(|(_, detail)| detail.clone())
    }

    pub fn phase(&self) -> DetailPhase {
        match (&self.persisted, &self.committed) {
            (Some(_), _) => DetailPhase::Ready,
            (None, Some(_)) => DetailPhase::Loading,
            (None, None) => DetailPhase::Idle,
        }
    }

    /// Запрошен ли товар, отличный от показанного
    pub fn is_switching(&self) -> bool {
        self.committed.is_some() && self.committed.as_ref() != self.persisted_id()
    }

    /// Зафиксировать введённый id (или SKU). Пустой ввод игнорируется.
    pub fn submit(&mut self, raw: &str) -> Option<ProductId> {
        let id = ProductId::from_string(raw).ok()?;
        self.committed = Some(id.clone());
        Some(id)
    }

    /// Разобрать результат загрузки карточки `id`
    pub fn resolve(&mut self, id: &ProductId, result: Result<Arc<ProductDetail>, String>) -> Resolution {
        if self.committed.as_ref() != Some(id) {
            return Resolution::Ignored;
        }
        if self.persisted_id() == Some(id) {
            return Resolution::Unchanged;
        }
        match result {
            Ok(detail) => {
                self.persisted = Some((id.clone(), detail));
                Resolution::Replaced
            }
            Err(message) => {
                self.committed = self.persisted_id().cloned();
                Resolution::Failed(message)
            }
        }
    }

    /// Закрыть панель
    pub fn close(&mut self) {
        self.committed = None;
        self.persisted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str) -> Arc<ProductDetail> {
        Arc::new(ProductDetail {
            id: id.to_string(),
            config_sku: Some(format!("SKU-{id}")),
            title: format!("Товар {id}"),
            brand: None,
            category_id: "Smartphones".to_string(),
            shop_link: format!("/p/{id}/"),
            images: vec![],
            category_codes: vec![],
            categories: vec![],
        })
    }

    fn pid(raw: &str) -> ProductId {
        ProductId::from_string(raw).unwrap()
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut state = DetailPanelState::default();
        assert_eq!(state.submit("   "), None);
        assert_eq!(state.phase(), DetailPhase::Idle);
    }

    #[test]
    fn submit_then_success_is_ready() {
        let mut state = DetailPanelState::default();
        let id = state.submit(" 101 ").unwrap();
        assert_eq!(state.phase(), DetailPhase::Loading);

        assert_eq!(state.resolve(&id, Ok(detail("101"))), Resolution::Replaced);
        assert_eq!(state.phase(), DetailPhase::Ready);
        assert_eq!(state.detail().unwrap().id, "101");
    }

    #[test]
    fn same_id_success_does_not_replace() {
        let mut state = DetailPanelState::default();
        let id = state.submit("101").unwrap();
        state.resolve(&id, Ok(detail("101")));

        state.submit("101");
        assert!(!state.is_switching());
        assert_eq!(state.resolve(&id, Ok(detail("101"))), Resolution::Unchanged);
    }

    #[test]
    fn failure_keeps_previous_detail() {
        let mut state = DetailPanelState::default();
        let p = state.submit("101").unwrap();
        state.resolve(&p, Ok(detail("101")));

        let missing = state.submit("999").unwrap();
        assert!(state.is_switching());
        let resolution = state.resolve(&missing, Err("Product not found".into()));

        assert_eq!(resolution, Resolution::Failed("Product not found".into()));
        assert_eq!(state.phase(), DetailPhase::Ready);
        assert_eq!(state.detail().unwrap().id, "101");
        assert_eq!(state.committed(), Some(&p));
    }

    #[test]
    fn failed_reload_of_shown_detail_is_silent() {
        let mut state = DetailPanelState::default();
        let p = state.submit("101").unwrap();
        state.resolve(&p, Ok(detail("101")));

        let missing = state.submit("999").unwrap();
        state.resolve(&missing, Err("Product not found".into()));

        // Query is re-keyed back to 101; its refetch may fail too.
        let resolution = state.resolve(&p, Err("Network error".into()));
        assert_eq!(resolution, Resolution::Unchanged);
        assert_eq!(state.committed(), Some(&p));
        assert_eq!(state.detail().unwrap().id, "101");
    }

    #[test]
    fn failure_without_previous_detail_returns_to_idle() {
        let mut state = DetailPanelState::default();
        let id = state.submit("999").unwrap();
        let resolution = state.resolve(&id, Err("Product not found".into()));

        assert!(matches!(resolution, Resolution::Failed(_)));
        assert_eq!(state.phase(), DetailPhase::Idle);
    }

    #[test]
    fn late_answer_for_abandoned_id_is_ignored() {
        let mut state = DetailPanelState::default();
        let a = state.submit("A").unwrap();
        let b = state.submit("B").unwrap();

        assert_eq!(state.resolve(&a, Ok(detail("A"))), Resolution::Ignored);
        assert_eq!(state.phase(), DetailPhase::Loading);
        assert_eq!(state.resolve(&b, Ok(detail("B"))), Resolution::Replaced);
        assert_eq!(state.detail().unwrap().id, "B");
    }

    #[test]
    fn close_clears_everything() {
        let mut state = DetailPanelState::default();
        let id = state.submit("101").unwrap();
        state.resolve(&id, Ok(detail("101")));
        state.close();
        assert_eq!(state.phase(), DetailPhase::Idle);
        assert!(state.detail().is_none());
    }
}
