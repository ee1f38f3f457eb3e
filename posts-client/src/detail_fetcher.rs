use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PostsClientResult;
use crate::models::PostRecord;
use crate::pending::{LoadOutcome, PendingLoad, RequestTracker, lock};
use crate::source::PostSource;

/// Сообщение, которое видит пользователь при ошибке загрузки поста.
pub const DETAIL_ERROR_MESSAGE: &str =
    "Unable to load this post right now. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Состояние страницы одного поста.
pub struct DetailFetchState {
    /// Идентификатор последнего запрошенного поста.
    pub post_id: Option<u64>,
    /// Загруженный пост.
    pub post: Option<PostRecord>,
    /// Идёт загрузка.
    pub is_loading: bool,
    /// Ошибка последней загрузки.
    pub error_message: Option<String>,
}

impl DetailFetchState {
    fn begin(&mut self, post_id: u64) {
        self.post_id = Some(post_id);
        self.post = None;
        self.is_loading = true;
        self.error_message = None;
    }

    fn apply(&mut self, result: PostsClientResult<PostRecord>) {
        match result {
            Ok(post) => {
                self.post = Some(post);
                self.error_message = None;
            }
            Err(err) => {
                warn!(post_id = ?self.post_id, error = %err, "failed to load post");
                self.post = None;
                self.error_message = Some(DETAIL_ERROR_MESSAGE.to_string());
            }
        }
        self.is_loading = false;
    }
}

fn parse_post_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|id| *id > 0)
}

#[derive(Debug, Default)]
struct DetailInner {
    state: DetailFetchState,
    requests: RequestTracker,
}

/// Загрузчик одного поста по идентификатору из маршрута.
///
/// Запрос уходит один раз на каждый новый идентификатор. Смена идентификатора
/// или teardown отменяют незавершённый запрос. Требует запущенный tokio runtime.
pub struct PostDetailFetcher<S> {
    source: Arc<S>,
    inner: Arc<Mutex<DetailInner>>,
}

impl<S> PostDetailFetcher<S> {
    /// Снимок состояния для отрисовки.
    pub fn snapshot(&self) -> DetailFetchState {
        lock(&self.inner).state.clone()
    }

    /// Отменяет текущий запрос; его результат уже не изменит состояние.
    ///
    /// Прерванный запрос забывает идентификатор, чтобы его можно было
    /// запросить снова.
    pub fn teardown(&self) {
        let mut inner = lock(&self.inner);
        inner.requests.supersede();
        if inner.state.is_loading {
            inner.state.post_id = None;
            inner.state.is_loading = false;
        }
    }
}

impl<S: PostSource + 'static> PostDetailFetcher<S> {
    /// Создаёт загрузчик в состоянии ожидания.
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            inner: Arc::new(Mutex::new(DetailInner::default())),
        }
    }

    /// Запрашивает пост по сырому параметру маршрута.
    ///
    /// Пустой параметр сбрасывает view в ожидание без запроса. Нечисловой
    /// параметр сразу даёт ошибку без запроса. Повторный вызов с тем же
    /// идентификатором ничего не делает. `None`, если запрос не запускался.
    pub fn request_post(&self, raw_id: &str) -> Option<PendingLoad> {
        let raw_id = raw_id.trim();

        let (generation, post_id) = {
            let mut inner = lock(&self.inner);

            if raw_id.is_empty() {
                inner.requests.supersede();
                inner.state = DetailFetchState::default();
                return None;
            }

            let Some(post_id) = parse_post_id(raw_id) else {
                warn!(raw_id, "post id is not a positive integer");
                inner.requests.supersede();
                inner.state = DetailFetchState {
                    error_message: Some(DETAIL_ERROR_MESSAGE.to_string()),
                    ..DetailFetchState::default()
                };
                return None;
            };

            if inner.state.post_id == Some(post_id) {
                return None;
            }

            let generation = inner.requests.supersede();
            inner.state.begin(post_id);
            (generation, post_id)
        };

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.inner);

        let handle = tokio::spawn(async move {
            let result = source.get_post(post_id).await;

            let mut inner = lock(&shared);
            if !inner.requests.complete(generation) {
                debug!(post_id, "discarding stale post");
                return LoadOutcome::Superseded;
            }
            inner.state.apply(result);
            LoadOutcome::Applied
        });

        lock(&self.inner)
            .requests
            .track(generation, handle.abort_handle());
        Some(PendingLoad::new(handle))
    }
}

impl<S> Drop for PostDetailFetcher<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;
    use crate::error::PostsClientError;
    use crate::models::PostPage;

    fn sample_post(id: u64) -> PostRecord {
        PostRecord {
            id,
            published_at: "2024-05-01T10:00:00".to_string(),
            permalink: format!("https://example.com/p/{id}"),
            title: format!("Post {id}"),
            excerpt: String::new(),
            content: Some("<p>Body</p>".to_string()),
            featured_media: None,
        }
    }

    #[derive(Clone, Default)]
    struct FakeSource {
        posts: Arc<Mutex<HashMap<u64, PostRecord>>>,
        calls: Arc<Mutex<Vec<u64>>>,
    }

    impl FakeSource {
        fn with_posts(ids: &[u64]) -> Self {
            let source = Self::default();
            {
                let mut posts = source.posts.lock().expect("posts mutex poisoned");
                for id in ids {
                    posts.insert(*id, sample_post(*id));
                }
            }
            source
        }

        fn calls(&self) -> Vec<u64> {
            self.calls.lock().expect("calls mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl PostSource for FakeSource {
        async fn list_posts(&self, _page: u32, _per_page: u32) -> PostsClientResult<PostPage> {
            Ok(PostPage {
                posts: Vec::new(),
                total_pages: 1,
            })
        }

        async fn get_post(&self, id: u64) -> PostsClientResult<PostRecord> {
            self.calls.lock().expect("calls mutex poisoned").push(id);
            self.posts
                .lock()
                .expect("posts mutex poisoned")
                .get(&id)
                .cloned()
                .ok_or(PostsClientError::NotFound)
        }
    }

    struct GatedSource {
        gates: Mutex<HashMap<u64, oneshot::Receiver<PostsClientResult<PostRecord>>>>,
    }

    #[async_trait]
    impl PostSource for GatedSource {
        async fn list_posts(&self, _page: u32, _per_page: u32) -> PostsClientResult<PostPage> {
            Err(PostsClientError::NotFound)
        }

        async fn get_post(&self, id: u64) -> PostsClientResult<PostRecord> {
            let gate = self
                .gates
                .lock()
                .expect("gates mutex poisoned")
                .remove(&id)
                .expect("post must be gated");
            gate.await.unwrap_or(Err(PostsClientError::NotFound))
        }
    }

    #[tokio::test]
    async fn loads_post_by_id() {
        let source = FakeSource::with_posts(&[5]);
        let fetcher = PostDetailFetcher::new(source.clone());

        let pending = fetcher.request_post("5").expect("request must start");
        assert!(fetcher.snapshot().is_loading);
        assert_eq!(pending.wait().await, LoadOutcome::Applied);

        let state = fetcher.snapshot();
        assert_eq!(state.post.map(|post| post.id), Some(5));
        assert!(state.error_message.is_none());
        assert!(!state.is_loading);
        assert_eq!(source.calls(), vec![5]);
    }

    #[tokio::test]
    async fn missing_post_sets_fixed_message() {
        let fetcher = PostDetailFetcher::new(FakeSource::default());

        fetcher
            .request_post("999")
            .expect("request must start")
            .wait()
            .await;

        let state = fetcher.snapshot();
        assert!(state.post.is_none());
        assert_eq!(state.error_message.as_deref(), Some(DETAIL_ERROR_MESSAGE));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn blank_id_stays_idle_without_request() {
        let source = FakeSource::default();
        let fetcher = PostDetailFetcher::new(source.clone());

        assert!(fetcher.request_post("   ").is_none());
        assert_eq!(fetcher.snapshot(), DetailFetchState::default());
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_fails_without_request() {
        let source = FakeSource::default();
        let fetcher = PostDetailFetcher::new(source.clone());

        assert!(fetcher.request_post("hello-world").is_none());
        let state = fetcher.snapshot();
        assert_eq!(state.error_message.as_deref(), Some(DETAIL_ERROR_MESSAGE));
        assert!(!state.is_loading);
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn same_id_is_requested_once() {
        let source = FakeSource::with_posts(&[3]);
        let fetcher = PostDetailFetcher::new(source.clone());

        fetcher
            .request_post("3")
            .expect("request must start")
            .wait()
            .await;
        assert!(fetcher.request_post("3").is_none());
        assert_eq!(source.calls(), vec![3]);
    }

    #[tokio::test]
    async fn id_change_discards_previous_request() {
        let (tx_first, rx_first) = oneshot::channel();
        let (tx_second, rx_second) = oneshot::channel();
        let source = GatedSource {
            gates: Mutex::new(HashMap::from([(1, rx_first), (2, rx_second)])),
        };
        let fetcher = PostDetailFetcher::new(source);

        let first = fetcher.request_post("1").expect("first request must start");
        let second = fetcher.request_post("2").expect("second request must start");

        tx_second
            .send(Ok(sample_post(2)))
            .expect("receiver for post 2 alive");
        assert_eq!(second.wait().await, LoadOutcome::Applied);

        let _ = tx_first.send(Ok(sample_post(1)));
        assert_eq!(first.wait().await, LoadOutcome::Superseded);

        let state = fetcher.snapshot();
        assert_eq!(state.post_id, Some(2));
        assert_eq!(state.post.map(|post| post.id), Some(2));
    }

    #[tokio::test]
    async fn teardown_keeps_state_untouched() {
        let (tx, rx) = oneshot::channel();
        let source = GatedSource {
            gates: Mutex::new(HashMap::from([(7, rx)])),
        };
        let fetcher = PostDetailFetcher::new(source);

        let pending = fetcher.request_post("7").expect("request must start");
        fetcher.teardown();
        let _ = tx.send(Ok(sample_post(7)));

        assert_eq!(pending.wait().await, LoadOutcome::Superseded);
        let state = fetcher.snapshot();
        assert!(state.post.is_none());
        assert!(state.error_message.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn same_id_can_be_requested_again_after_teardown() {
        let source = FakeSource::with_posts(&[7]);
        let fetcher = PostDetailFetcher::new(source.clone());

        let first = fetcher.request_post("7").expect("first request must start");
        fetcher.teardown();
        assert_eq!(fetcher.snapshot().post_id, None);

        let again = fetcher
            .request_post("7")
            .expect("request must start again after teardown");
        assert_eq!(first.wait().await, LoadOutcome::Superseded);
        assert_eq!(again.wait().await, LoadOutcome::Applied);

        let state = fetcher.snapshot();
        assert_eq!(state.post_id, Some(7));
        assert_eq!(state.post.map(|post| post.id), Some(7));
        assert!(!state.is_loading);
        assert_eq!(source.calls(), vec![7]);
    }

    #[tokio::test]
    async fn teardown_after_load_keeps_post() {
        let fetcher = PostDetailFetcher::new(FakeSource::with_posts(&[4]));

        fetcher
            .request_post("4")
            .expect("request must start")
            .wait()
            .await;
        fetcher.teardown();

        assert!(fetcher.request_post("4").is_none());
        assert_eq!(fetcher.snapshot().post.map(|post| post.id), Some(4));
    }
}
