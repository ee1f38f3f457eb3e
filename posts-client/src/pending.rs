use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Чем закончилась запущенная загрузка.
pub enum LoadOutcome {
    /// Результат (успех или ошибка) записан в состояние.
    Applied,
    /// Загрузку вытеснил более новый запрос или teardown; состояние не тронуто.
    Superseded,
}

#[derive(Debug)]
/// Хэндл запущенной загрузки.
///
/// Дожидаться его не обязательно: состояние обновится и без `wait`.
pub struct PendingLoad {
    handle: JoinHandle<LoadOutcome>,
}

impl PendingLoad {
    pub(crate) fn new(handle: JoinHandle<LoadOutcome>) -> Self {
        Self { handle }
    }

    /// Ждёт завершения загрузки.
    pub async fn wait(self) -> LoadOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => LoadOutcome::Superseded,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}

/// Поколения запросов одного view.
///
/// Результат применяется только если его поколение всё ещё текущее; новый
/// запрос сначала отменяет задачу предыдущего.
#[derive(Debug, Default)]
pub(crate) struct RequestTracker {
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl RequestTracker {
    /// Отменяет текущий запрос и открывает новое поколение.
    pub(crate) fn supersede(&mut self) -> u64 {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub(crate) fn track(&mut self, generation: u64, handle: AbortHandle) {
        if self.generation == generation {
            self.in_flight = Some(handle);
        }
    }

    /// Отмечает запрос завершённым; `false`, если результат устарел.
    pub(crate) fn complete(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.in_flight = None;
        true
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
