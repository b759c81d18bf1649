//! Временные сообщения в UI: отметка «скопировано», всплывающая ошибка.
//!
//! Значение показывается до истечения таймера. Каждый новый показ получает
//! своё поколение, поэтому таймер старого показа новый не скрывает.

use crate::shared::timer::Delay;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transient<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Default for Transient<T> {
    fn default() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }
}

impl<T> Transient<T> {
    /// Показать значение; возвращает поколение для таймера
    pub fn show(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.value = Some(value);
        self.generation
    }

    /// Таймер поколения `generation` сработал.
    /// Скрывает значение, только если его с тех пор не заменили.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.value.is_none() {
            return false;
        }
        self.value = None;
        true
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.value = None;
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_shown(&self) -> bool {
        self.value.is_some()
    }
}

/// `Transient` в сигнале вместе с таймером скрытия.
///
/// Таймер хранится рядом и сбрасывается при новом показе, `reset`
/// и уничтожении владельца.
pub struct TransientSignal<T: Send + Sync + 'static> {
    state: RwSignal<Transient<T>>,
    timer: StoredValue<Option<Delay>, LocalStorage>,
    millis: u32,
}

impl<T: Send + Sync + 'static> Clone for TransientSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for TransientSignal<T> {}

impl<T: Clone + Send + Sync + 'static> TransientSignal<T> {
    pub fn new(millis: u32) -> Self {
        Self {
            state: RwSignal::new(Transient::default()),
            timer: StoredValue::new_local(None),
            millis,
        }
    }

    pub fn show(&self, value: T) {
        let state = self.state;
        let Some(generation) = state.try_update(|s| s.show(value)) else {
            return;
        };
        let delay = Delay::new(self.millis, move || {
            let _ = state.try_update(|s| s.expire(generation));
        });
        let _ = self.timer.try_update_value(|timer| *timer = Some(delay));
    }

    pub fn reset(&self) {
        let _ = self.timer.try_update_value(|timer| *timer = None);
        let _ = self.state.try_update(|s| s.reset());
    }

    /// Текущее значение (реактивно)
    pub fn get(&self) -> Option<T> {
        self.state.with(|s| s.value().cloned())
    }

    pub fn is_shown(&self) -> bool {
        self.state.with(|s| s.is_shown())
    }

    pub fn with_state<U>(&self, f: impl FnOnce(&Transient<T>) -> U) -> U {
        self.state.with(f)
    }
}
