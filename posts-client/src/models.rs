use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пост блога в том виде, в каком его отдаёт контентный API.
///
/// Библиотека только читает и отображает записи, но никогда их не изменяет.
pub struct PostRecord {
    /// Идентификатор поста, назначенный внешней системой.
    pub id: u64,
    /// Дата публикации (строка в ISO-8601-подобном формате).
    pub published_at: String,
    /// Абсолютная ссылка на канонический адрес поста.
    pub permalink: String,
    /// Заголовок (может содержать inline-разметку).
    pub title: String,
    /// Краткое описание (может содержать разметку).
    pub excerpt: String,
    /// Полный текст поста, если API его вернул.
    pub content: Option<String>,
    /// Изображение записи, если оно прикреплено.
    pub featured_media: Option<FeaturedMedia>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Встроенное изображение записи.
pub struct FeaturedMedia {
    /// URL изображения; пустая строка означает «нет изображения».
    pub source_url: String,
    /// Альтернативный текст.
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Одна страница списка постов.
pub struct PostPage {
    /// Посты текущей страницы в порядке, заданном сервером.
    pub posts: Vec<PostRecord>,
    /// Общее число страниц, не меньше 1.
    pub total_pages: u32,
}
