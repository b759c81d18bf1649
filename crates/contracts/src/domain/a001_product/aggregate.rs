use crate::domain::common::AggregateId;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор товара на площадке
///
/// Пустая строка не является идентификатором: отсутствие выбора
/// выражается через `Option<ProductId>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AggregateId for ProductId {
    fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Empty product id".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Read models
// ============================================================================

/// Краткая карточка товара (строка списка)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_sku: Option<String>,
    pub title: String,
    pub shop_link: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductSummary {
    /// Первая картинка для превью в таблице
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Детальная карточка товара
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_sku: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub category_id: String,
    pub shop_link: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category_codes: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ProductDetail {
    /// Полная ссылка на страницу товара на площадке
    ///
    /// `None`, если бэкенд не прислал ссылку.
    pub fn shop_url(&self, shop_base: &str) -> Option<String> {
        if self.shop_link.trim().is_empty() {
            return None;
        }
        Some(format!("{}{}", shop_base.trim_end_matches('/'), self.shop_link))
    }
}
