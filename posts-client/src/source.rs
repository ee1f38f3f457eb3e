use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PostsClientResult;
use crate::models::{PostPage, PostRecord};

/// Источник постов, из которого читают фетчеры.
///
/// Основная реализация: `HttpClient`; в тестах подставляются фейки.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Загружает одну страницу списка с встроенными медиа.
    async fn list_posts(&self, page: u32, per_page: u32) -> PostsClientResult<PostPage>;

    /// Загружает один пост по идентификатору вместе с `content`.
    async fn get_post(&self, id: u64) -> PostsClientResult<PostRecord>;
}

#[async_trait]
impl<S: PostSource + ?Sized> PostSource for Arc<S> {
    async fn list_posts(&self, page: u32, per_page: u32) -> PostsClientResult<PostPage> {
        (**self).list_posts(page, per_page).await
    }

    async fn get_post(&self, id: u64) -> PostsClientResult<PostRecord> {
        (**self).get_post(id).await
    }
}
