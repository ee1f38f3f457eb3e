use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::POSTS_PER_PAGE;
use crate::error::PostsClientResult;
use crate::models::{PostPage, PostRecord};
use crate::pending::{LoadOutcome, PendingLoad, RequestTracker, lock};
use crate::source::PostSource;

/// Сообщение, которое видит пользователь при ошибке загрузки списка.
pub const LIST_ERROR_MESSAGE: &str =
    "Unable to load the latest posts right now. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Состояние списка постов для отрисовки.
pub struct ListFetchState {
    /// Текущая страница, начиная с 1.
    pub current_page: u32,
    /// Общее число страниц по последнему успешному ответу.
    pub total_pages: u32,
    /// Посты текущей страницы.
    pub posts: Vec<PostRecord>,
    /// Идёт загрузка текущей страницы.
    pub is_loading: bool,
    /// Ошибка последней загрузки.
    pub error_message: Option<String>,
}

impl Default for ListFetchState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            posts: Vec::new(),
            is_loading: false,
            error_message: None,
        }
    }
}

impl ListFetchState {
    /// Можно ли перейти на предыдущую страницу.
    pub fn can_go_previous(&self) -> bool {
        !self.is_loading && self.current_page > 1
    }

    /// Можно ли перейти на следующую страницу.
    pub fn can_go_next(&self) -> bool {
        !self.is_loading && self.current_page < self.total_pages
    }

    fn begin(&mut self, page: u32) {
        self.current_page = page;
        self.is_loading = true;
        self.error_message = None;
    }

    // При ошибке посты прошлой страницы остаются на месте.
    fn apply(&mut self, result: PostsClientResult<PostPage>) {
        match result {
            Ok(page) => {
                self.posts = page.posts;
                self.total_pages = page.total_pages.max(1);
                self.error_message = None;
            }
            Err(err) => {
                warn!(page = self.current_page, error = %err, "failed to load posts page");
                self.error_message = Some(LIST_ERROR_MESSAGE.to_string());
            }
        }
        self.is_loading = false;
    }
}

#[derive(Debug, Default)]
struct ListInner {
    state: ListFetchState,
    requests: RequestTracker,
}

/// Загрузчик постраничного списка постов.
///
/// Каждая смена страницы запускает ровно один запрос в отдельной tokio-задаче.
/// Более новый запрос отменяет предыдущий, и результат вытесненного запроса
/// никогда не попадает в состояние. Требует запущенный tokio runtime.
pub struct PostListFetcher<S> {
    source: Arc<S>,
    inner: Arc<Mutex<ListInner>>,
}

impl<S> PostListFetcher<S> {
    /// Снимок состояния для отрисовки.
    pub fn snapshot(&self) -> ListFetchState {
        lock(&self.inner).state.clone()
    }

    /// Отменяет текущий запрос; его результат уже не изменит состояние.
    pub fn teardown(&self) {
        let mut inner = lock(&self.inner);
        inner.requests.supersede();
        inner.state.is_loading = false;
    }
}

impl<S: PostSource + 'static> PostListFetcher<S> {
    /// Создаёт загрузчик; каждый запрос уходит с `POSTS_PER_PAGE` постами.
    ///
    /// Первая страница не загружается сама: вызовите `request_page(1)`.
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            inner: Arc::new(Mutex::new(ListInner::default())),
        }
    }

    /// Запускает загрузку страницы `page` (0 трактуется как 1).
    pub fn request_page(&self, page: u32) -> PendingLoad {
        let page = page.max(1);
        let generation = {
            let mut inner = lock(&self.inner);
            let generation = inner.requests.supersede();
            inner.state.begin(page);
            generation
        };

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.inner);

        let handle = tokio::spawn(async move {
            let result = source.list_posts(page, POSTS_PER_PAGE).await;

            let mut inner = lock(&shared);
            if !inner.requests.complete(generation) {
                debug!(page, "discarding stale posts page");
                return LoadOutcome::Superseded;
            }
            inner.state.apply(result);
            LoadOutcome::Applied
        });

        lock(&self.inner)
            .requests
            .track(generation, handle.abort_handle());
        PendingLoad::new(handle)
    }

    /// Переходит на предыдущую страницу; `None`, если переход недоступен.
    pub fn go_to_previous_page(&self) -> Option<PendingLoad> {
        let state = self.snapshot();
        if !state.can_go_previous() {
            return None;
        }
        Some(self.request_page(state.current_page - 1))
    }

    /// Переходит на следующую страницу; `None`, если переход недоступен.
    pub fn go_to_next_page(&self) -> Option<PendingLoad> {
        let state = self.snapshot();
        if !state.can_go_next() {
            return None;
        }
        Some(self.request_page(state.current_page + 1))
    }
}

impl<S> Drop for PostListFetcher<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
