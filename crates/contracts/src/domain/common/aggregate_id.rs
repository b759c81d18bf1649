use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Идентификатор ресурса бэкенда.
///
/// Разбор из строки отвергает пустой ввод: «ничего не выбрано»
/// выражается через `Option`, а не через пустой id.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Создать ID из пользовательского ввода
    fn from_string(s: &str) -> Result<Self, String>;
}
