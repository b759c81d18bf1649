//! Копирование в буфер обмена и отметка «скопировано».

use crate::shared::transient::Transient;
use wasm_bindgen_futures::spawn_local;

/// Сколько держится галочка после копирования
pub const COPY_ACK_MS: u32 = 1600;

/// Copy text to clipboard with a callback on success
///
/// Ошибки Clipboard API (нет прав, нет фокуса) пишутся в лог.
pub fn copy_to_clipboard_with_callback<F>(text: &str, on_success: F)
where
    F: FnOnce() + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            return;
        };
        let clipboard = window.navigator().clipboard();
        match wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text)).await {
            Ok(_) => on_success(),
            Err(e) => log::warn!("clipboard write failed: {e:?}"),
        }
    });
}

/// Галочка показана именно для этой сущности.
///
/// Отметка хранит идентичность скопированного значения, поэтому при смене
/// сущности (другой товар в карточке) галочка не переезжает на новую.
pub fn is_acknowledged(ack: &Transient<String>, identity: &str) -> bool {
    ack.value().is_some_and(|copied| copied == identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledgement_belongs_to_copied_entity() {
        let mut ack = Transient::default();
        let generation = ack.show("SKU-1".to_string());
        assert!(is_acknowledged(&ack, "SKU-1"));

        // карточка переключилась на другой товар
        assert!(!is_acknowledged(&ack, "SKU-2"));
        ack.reset();
        assert!(!ack.expire(generation));
        assert!(!is_acknowledged(&ack, "SKU-1"));
    }

    #[test]
    fn acknowledgement_expires() {
        let mut ack = Transient::default();
        let generation = ack.show("42".to_string());
        ack.expire(generation);
        assert!(!is_acknowledged(&ack, "42"));
    }
}
