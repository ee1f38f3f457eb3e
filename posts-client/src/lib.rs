//! Клиентская библиотека для ленты постов блога из WordPress REST API.
//!
//! Состоит из трёх частей:
//! - `adapter`: чистые функции, готовящие пост к отображению (excerpt, дата,
//!   изображение);
//! - `HttpClient`: транспорт к контентному API (`reqwest`) за трейтом
//!   `PostSource`;
//! - `PostListFetcher` / `PostDetailFetcher`: состояние списка и страницы
//!   поста с отменой устаревших запросов.
#![warn(missing_docs)]

pub mod adapter;
mod config;
mod detail_fetcher;
mod error;
mod http_client;
mod list_fetcher;
mod models;
mod pending;
mod source;

pub use config::{ClientConfig, DEFAULT_API_BASE_URL, POSTS_PER_PAGE};
pub use detail_fetcher::{DETAIL_ERROR_MESSAGE, DetailFetchState, PostDetailFetcher};
pub use error::{PostsClientError, PostsClientResult};
pub use http_client::{HttpClient, TOTAL_PAGES_HEADER};
pub use list_fetcher::{LIST_ERROR_MESSAGE, ListFetchState, PostListFetcher};
pub use models::{FeaturedMedia, PostPage, PostRecord};
pub use pending::{LoadOutcome, PendingLoad};
pub use source::PostSource;
