use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `posts-client`.
pub enum PostsClientError {
    /// Ошибка HTTP-транспорта (`reqwest`): сеть, DNS, таймаут соединения.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный пост не найден.
    #[error("not found")]
    NotFound,

    /// Сервер ответил неуспешным статусом (кроме 404).
    #[error("http status {status}: {message}")]
    Status {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение из тела ошибки или текст по умолчанию.
        message: String,
    },

    /// Тело ответа не удалось разобрать в ожидаемую структуру.
    #[error("decode error: {0}")]
    Decode(String),

    /// Некорректный запрос, отклонённый ещё до отправки.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `posts-client`.
pub type PostsClientResult<T> = Result<T, PostsClientError>;

impl PostsClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::Status {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
