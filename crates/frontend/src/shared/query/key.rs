use serde::Serialize;
use std::fmt;

/// Ключ записи кэша: имя операции + канонический набор параметров.
///
/// Параметры сериализуются в JSON уже в «проводном» виде, поэтому два
/// значения, которые уходят на бэкенд одинаково, дают один и тот же ключ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    operation: &'static str,
    params: String,
}

impl QueryKey {
    pub fn new<P: Serialize + ?Sized>(operation: &'static str, params: &P) -> Self {
        let params = serde_json::to_string(params).unwrap_or_else(|e| {
            log::error!("query key for {operation} is not serializable: {e}");
            String::from("null")
        });
        Self { operation, params }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operation, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Page {
        page: u32,
        search: Option<String>,
    }

    #[test]
    fn equal_params_equal_keys() {
        let a = QueryKey::new("products", &Page { page: 1, search: None });
        let b = QueryKey::new("products", &Page { page: 1, search: None });
        let c = QueryKey::new("products", &Page { page: 2, search: None });
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), r#"products{"page":1,"search":null}"#);
    }

    #[test]
    fn operation_is_part_of_key() {
        assert_ne!(QueryKey::new("a", "x"), QueryKey::new("b", "x"));
    }
}
