//! Локальный mock контентного API в формате WordPress REST `wp/v2/posts`.
//!
//! Нужен интеграционным тестам `posts-client` и для локального запуска CLI
//! без доступа к настоящему сайту.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

mod fixtures;

pub use fixtures::sample_posts;

/// Путь коллекции постов, как у WordPress.
pub const POSTS_PATH: &str = "/wp-json/wp/v2/posts";

const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Изображение записи.
pub struct MockMedia {
    /// URL изображения.
    pub source_url: String,
    /// Альтернативный текст.
    pub alt_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Пост, который отдаёт mock.
pub struct MockPost {
    /// Идентификатор.
    pub id: u64,
    /// Дата публикации в формате WordPress (`2024-05-01T10:00:00`).
    pub date: String,
    /// Канонический адрес.
    pub link: String,
    /// Заголовок (HTML).
    pub title: String,
    /// Краткое описание (HTML).
    pub excerpt: String,
    /// Тело поста (HTML).
    pub content: String,
    /// Изображение записи.
    pub featured_media: Option<MockMedia>,
}

/// Посты в порядке выдачи (новые первыми).
pub type PostStore = Arc<Vec<MockPost>>;

#[derive(Debug, Deserialize)]
struct ListQuery {
    per_page: Option<u32>,
    page: Option<u32>,
    #[serde(rename = "_embed")]
    embed: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedQuery {
    #[serde(rename = "_embed")]
    embed: Option<String>,
}

/// Router mock-сервера поверх заданного набора постов.
pub fn app(posts: Vec<MockPost>) -> Router {
    let store: PostStore = Arc::new(posts);
    Router::new()
        .route(POSTS_PATH, get(list_posts))
        .route(&format!("{POSTS_PATH}/{{id}}"), get(get_post))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}

/// Запускает mock на готовом listener.
pub async fn run(listener: TcpListener, posts: Vec<MockPost>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(posts)).await
}

fn wp_error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "code": code,
        "message": message,
        "data": { "status": status.as_u16() },
    });
    (status, Json(body)).into_response()
}

fn post_json(post: &MockPost, embed: bool) -> Value {
    let media_id = post.featured_media.as_ref().map_or(0, |_| post.id * 100);
    let mut value = json!({
        "id": post.id,
        "date": post.date,
        "link": post.link,
        "title": { "rendered": post.title },
        "excerpt": { "rendered": post.excerpt, "protected": false },
        "content": { "rendered": post.content, "protected": false },
        "featured_media": media_id,
    });

    if embed {
        let media: Vec<Value> = post
            .featured_media
            .iter()
            .map(|media| {
                json!({
                    "source_url": media.source_url,
                    "alt_text": media.alt_text,
                })
            })
            .collect();
        let embedded = if media.is_empty() {
            json!({})
        } else {
            json!({ "wp:featuredmedia": media })
        };
        value["_embedded"] = embedded;
    }

    value
}

async fn list_posts(State(store): State<PostStore>, Query(query): Query<ListQuery>) -> Response {
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return wp_error(
            StatusCode::BAD_REQUEST,
            "rest_invalid_param",
            "Invalid parameter(s): per_page",
        );
    }
    let page = query.page.unwrap_or(1);
    if page == 0 {
        return wp_error(
            StatusCode::BAD_REQUEST,
            "rest_invalid_param",
            "Invalid parameter(s): page",
        );
    }

    let total = store.len();
    let total_pages = total.div_ceil(per_page as usize);
    if page as usize > total_pages.max(1) {
        return wp_error(
            StatusCode::BAD_REQUEST,
            "rest_post_invalid_page_number",
            "The page number requested is larger than the number of pages available.",
        );
    }

    let embed = query.embed.is_some();
    let items: Vec<Value> = store
        .iter()
        .skip((page as usize - 1) * per_page as usize)
        .take(per_page as usize)
        .map(|post| post_json(post, embed))
        .collect();

    (
        StatusCode::OK,
        [
            ("X-WP-Total", total.to_string()),
            ("X-WP-TotalPages", total_pages.to_string()),
        ],
        Json(items),
    )
        .into_response()
}

async fn get_post(
    State(store): State<PostStore>,
    Path(id): Path<String>,
    Query(query): Query<EmbedQuery>,
) -> Response {
    let post = id
        .parse::<u64>()
        .ok()
        .and_then(|id| store.iter().find(|post| post.id == id));

    match post {
        Some(post) => Json(post_json(post, query.embed.is_some())).into_response(),
        None => wp_error(StatusCode::NOT_FOUND, "rest_post_invalid_id", "Invalid post ID."),
    }
}
