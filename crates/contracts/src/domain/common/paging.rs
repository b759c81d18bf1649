use serde::{Deserialize, Serialize};

/// Страница результата серверной пагинации
///
/// `page` считается с 1, как на бэкенде.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub total: u64,
    pub page: u32,
    pub size: u32,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> PaginatedResult<T> {
    /// Общее число страниц при текущем размере страницы
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size)) as u32
    }
}
