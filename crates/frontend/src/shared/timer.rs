//! Таймеры браузера (`gloo_timers`) с пустыми заглушками вне wasm,
//! чтобы логика, которая их заводит, собиралась и тестировалась нативно.

#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::{Interval, Timeout};

/// Отложенный вызов. Drop отменяет таймер.
#[must_use = "dropping a Delay cancels it"]
pub struct Delay {
    #[cfg(target_arch = "wasm32")]
    _timeout: Timeout,
}

impl Delay {
    #[cfg(target_arch = "wasm32")]
    pub fn new(millis: u32, callback: impl FnOnce() + 'static) -> Self {
        Self {
            _timeout: Timeout::new(millis, callback),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(_millis: u32, _callback: impl FnOnce() + 'static) -> Self {
        Self {}
    }
}

/// Периодический вызов. Drop останавливает таймер.
#[must_use = "dropping a Ticker stops it"]
pub struct Ticker {
    #[cfg(target_arch = "wasm32")]
    interval: Interval,
}

impl Ticker {
    #[cfg(target_arch = "wasm32")]
    pub fn new(millis: u32, callback: impl FnMut() + 'static) -> Self {
        Self {
            interval: Interval::new(millis, callback),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(_millis: u32, _callback: impl FnMut() + 'static) -> Self {
        Self {}
    }

    /// Оставить таймер работать до закрытия страницы
    pub fn forget(self) {
        #[cfg(target_arch = "wasm32")]
        self.interval.forget();
    }
}
