use async_trait::async_trait;
use reqwest::{Client, Method, header::HeaderMap};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{PostsClientError, PostsClientResult};
use crate::models::{FeaturedMedia, PostPage, PostRecord};
use crate::source::PostSource;

/// Заголовок WordPress с общим числом страниц коллекции.
pub const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RenderedDto {
    #[serde(default)]
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct MediaDto {
    source_url: Option<String>,
    alt_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EmbeddedDto {
    #[serde(rename = "wp:featuredmedia", default)]
    featured_media: Vec<MediaDto>,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: u64,
    #[serde(default)]
    date: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: RenderedDto,
    #[serde(default)]
    excerpt: RenderedDto,
    content: Option<RenderedDto>,
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedDto>,
}

impl From<MediaDto> for FeaturedMedia {
    fn from(value: MediaDto) -> Self {
        Self {
            source_url: value.source_url.unwrap_or_default(),
            alt_text: value.alt_text,
        }
    }
}

impl From<PostDto> for PostRecord {
    fn from(value: PostDto) -> Self {
        let featured_media = value
            .embedded
            .and_then(|embedded| embedded.featured_media.into_iter().next())
            .map(FeaturedMedia::from);

        Self {
            id: value.id,
            published_at: value.date,
            permalink: value.link,
            title: value.title.rendered,
            excerpt: value.excerpt.rendered,
            content: value.content.map(|content| content.rendered),
            featured_media,
        }
    }
}

/// Разбирает `X-WP-TotalPages` как ведущее целое число.
///
/// Отсутствующее, нечисловое или нулевое значение даёт 1.
pub(crate) fn parse_total_pages(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 1;
    };

    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse::<u32>().map(|value| value.max(1)).unwrap_or(1)
}

fn total_pages_from_headers(headers: &HeaderMap) -> u32 {
    let raw = headers
        .get(TOTAL_PAGES_HEADER)
        .and_then(|value| value.to_str().ok());
    parse_total_pages(raw)
}

#[derive(Debug, Clone)]
/// HTTP-клиент контентного API (WordPress REST `wp/v2/posts`).
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент по конфигурации.
    pub fn new(config: ClientConfig) -> PostsClientResult<Self> {
        let mut builder = Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn list_url(&self, page: u32, per_page: u32) -> String {
        format!("{}?per_page={per_page}&page={page}&_embed", self.base_url)
    }

    fn post_url(&self, id: u64) -> String {
        format!("{}/{id}?_embed", self.base_url)
    }

    async fn decode_error(response: reqwest::Response) -> PostsClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .message
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        PostsClientError::from_http_status(status, Some(message))
    }

    async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> PostsClientResult<T> {
        let text = response
            .text()
            .await
            .map_err(PostsClientError::from_reqwest)?;

        serde_json::from_str::<T>(&text).map_err(|err| PostsClientError::Decode(err.to_string()))
    }

    async fn send_get(&self, url: String) -> PostsClientResult<reqwest::Response> {
        debug!(%url, "content api request");

        let response = self
            .client
            .request(Method::GET, url)
            .send()
            .await
            .map_err(PostsClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(response)
    }

    /// Возвращает страницу постов и общее число страниц.
    pub async fn list_posts(&self, page: u32, per_page: u32) -> PostsClientResult<PostPage> {
        if page == 0 || per_page == 0 {
            return Err(PostsClientError::InvalidRequest(
                "page and per_page must be positive".to_string(),
            ));
        }

        let response = self.send_get(self.list_url(page, per_page)).await?;
        let total_pages = total_pages_from_headers(response.headers());

        let dtos = Self::decode_body::<Vec<PostDto>>(response).await?;
        Ok(PostPage {
            posts: dtos.into_iter().map(PostRecord::from).collect(),
            total_pages,
        })
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, id: u64) -> PostsClientResult<PostRecord> {
        let response = self.send_get(self.post_url(id)).await?;
        let dto = Self::decode_body::<PostDto>(response).await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl PostSource for HttpClient {
    async fn list_posts(&self, page: u32, per_page: u32) -> PostsClientResult<PostPage> {
        HttpClient::list_posts(self, page, per_page).await
    }

    async fn get_post(&self, id: u64) -> PostsClientResult<PostRecord> {
        HttpClient::get_post(self, id).await
    }
}
