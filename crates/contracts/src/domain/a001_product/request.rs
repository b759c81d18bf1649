use serde::{Deserialize, Serialize};

/// Размер страницы списка товаров по умолчанию
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Допустимые размеры страницы для переключателя
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// Параметры запроса `GET /api/products/list`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductListQuery {
    /// Номер страницы, начиная с 1
    pub page: u32,
    pub size: u32,
    /// Пустой поиск не отправляется
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProductListQuery {
    pub fn new(page: u32, size: u32, search: &str) -> Self {
        let search = search.trim();
        Self {
            page: page.max(1),
            size: size.max(1),
            search: if search.is_empty() {
                None
            } else {
                Some(search.to_string())
            },
        }
    }
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_unfiltered() {
        let q = ProductListQuery::new(0, 0, "   ");
        assert_eq!(q.page, 1);
        assert_eq!(q.size, 1);
        assert_eq!(q.search, None);
    }

    #[test]
    fn search_is_trimmed() {
        let q = ProductListQuery::new(2, 20, "  SKU-1 ");
        assert_eq!(q.search.as_deref(), Some("SKU-1"));
    }
}
