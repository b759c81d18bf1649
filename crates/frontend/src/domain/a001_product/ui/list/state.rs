use contracts::domain::a001_product::request::{ProductListQuery, DEFAULT_PAGE_SIZE};
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductListState {
    pub search: String,
    // Серверная пагинация, страницы с 1
    pub page: u32,
    pub page_size: u32,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductListState {
    /// Новый поиск всегда начинается с первой страницы
    pub fn set_search(&mut self, search: String) {
        if self.search.trim() != search.trim() {
            self.page = 1;
        }
        self.search = search;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        if page_size != self.page_size {
            self.page_size = page_size.max(1);
            self.page = 1;
        }
    }

    pub fn to_query(&self) -> ProductListQuery {
        ProductListQuery::new(self.page, self.page_size, &self.search)
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::default())
}
