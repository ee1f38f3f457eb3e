use std::time::Duration;

/// Адрес коллекции постов WordPress REST API, который использует сайт.
pub const DEFAULT_API_BASE_URL: &str = "https://www.stepms.com/wp-json/wp/v2/posts";

/// Размер страницы списка постов.
pub const POSTS_PER_PAGE: u32 = 4;

#[derive(Debug, Clone)]
/// Параметры HTTP-клиента контентного API.
pub struct ClientConfig {
    /// Базовый URL коллекции постов, например `http://127.0.0.1:8090/wp-json/wp/v2/posts`.
    pub api_base_url: String,
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Общий таймаут запроса; при `None` ограничен только отменой и транспортом.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Конфигурация по умолчанию с указанным базовым URL.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}
