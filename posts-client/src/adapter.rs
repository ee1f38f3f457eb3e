//! Преобразование `PostRecord` в готовые к отображению значения.
//!
//! Все функции чистые: не выполняют ввод-вывод и не меняют запись.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;

use crate::models::PostRecord;

/// Максимальная длина excerpt в символах до добавления многоточия.
pub const EXCERPT_LIMIT: usize = 220;

/// Маркер обрезанного текста.
pub const ELLIPSIS: &str = "...";

/// Строка, которую возвращает `format_display_date` для неразбираемой даты.
pub const INVALID_DATE: &str = "Invalid Date";

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("markup tag pattern is valid"));

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Удаляет все теги разметки и обрезает пробелы по краям.
///
/// HTML-сущности (`&amp;`, `&#8217;` и т.п.) не декодируются и проходят как есть.
pub fn strip_markup(rich: &str) -> String {
    MARKUP_TAG.replace_all(rich, "").trim().to_string()
}

/// Обрезает текст до `limit` символов и добавляет `...`.
///
/// Рез жёсткий, по символам, без учёта границ слов. Текст не длиннее `limit`
/// возвращается без изменений.
pub fn truncate_excerpt(plain: &str, limit: usize) -> String {
    if plain.chars().count() <= limit {
        return plain.to_string();
    }

    let prefix: String = plain.chars().take(limit).collect();
    format!("{}{ELLIPSIS}", prefix.trim_end())
}

/// Форматирует дату публикации как `"May 1, 2024"`.
///
/// Понимает RFC 3339, «наивный» формат WordPress (`2024-05-01T10:00:00`) и
/// голую дату. Для всего остального возвращает `INVALID_DATE`.
pub fn format_display_date(timestamp: &str) -> String {
    match parse_publication_date(timestamp.trim()) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_publication_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.date_naive());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Возвращает URL изображения записи или пустую строку, если изображения нет.
///
/// Пустая строка означает «не показывать картинку», а не валидный URL.
pub fn extract_featured_image_url(post: &PostRecord) -> String {
    post.featured_media
        .as_ref()
        .map(|media| media.source_url.clone())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Карточка поста для списка на главной странице.
pub struct PostSummary {
    /// Идентификатор поста.
    pub id: u64,
    /// Заголовок с исходной разметкой.
    pub title: String,
    /// Дата публикации для отображения.
    pub date_label: String,
    /// Excerpt без разметки, обрезанный до `EXCERPT_LIMIT`.
    pub excerpt: String,
    /// URL изображения или пустая строка.
    pub image_url: String,
    /// Alt-текст изображения (заголовок поста).
    pub image_alt: String,
    /// Относительный путь страницы поста.
    pub detail_path: String,
}

/// Собирает карточку поста для списка.
pub fn summarize(post: &PostRecord) -> PostSummary {
    let excerpt = truncate_excerpt(&strip_markup(&post.excerpt), EXCERPT_LIMIT);

    PostSummary {
        id: post.id,
        title: post.title.clone(),
        date_label: format_display_date(&post.published_at),
        excerpt,
        image_url: extract_featured_image_url(post),
        image_alt: post.title.clone(),
        detail_path: format!("/posts/{}", post.id),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Полная статья для страницы поста.
pub struct PostArticle {
    /// Идентификатор поста.
    pub id: u64,
    /// Заголовок с исходной разметкой.
    pub title: String,
    /// Дата публикации для отображения.
    pub date_label: String,
    /// URL изображения или пустая строка.
    pub image_url: String,
    /// HTML тела поста; пустой, если API не вернул `content`.
    pub body_html: String,
    /// Канонический адрес поста.
    pub permalink: String,
}

/// Собирает статью для страницы поста.
pub fn present(post: &PostRecord) -> PostArticle {
    PostArticle {
        id: post.id,
        title: post.title.clone(),
        date_label: format_display_date(&post.published_at),
        image_url: extract_featured_image_url(post),
        body_html: post.content.clone().unwrap_or_default(),
        permalink: post.permalink.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeaturedMedia;

    fn sample_post(featured_media: Option<FeaturedMedia>) -> PostRecord {
        PostRecord {
            id: 42,
            published_at: "2024-05-01T10:00:00".to_string(),
            permalink: "https://example.com/2024/05/01/hello".to_string(),
            title: "Hello &amp; <em>welcome</em>".to_string(),
            excerpt: "<p>Short summary</p>\n".to_string(),
            content: Some("<p>Body</p>".to_string()),
            featured_media,
        }
    }

    #[test]
    fn strip_markup_removes_nested_tags() {
        assert_eq!(strip_markup("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn strip_markup_keeps_entities_verbatim() {
        assert_eq!(strip_markup("<p>Tom &amp; Jerry&#8217;s</p>"), "Tom &amp; Jerry&#8217;s");
    }

    #[test]
    fn strip_markup_trims_surrounding_whitespace() {
        assert_eq!(strip_markup("\n  <div> text </div>\n"), "text");
    }

    #[test]
    fn truncate_excerpt_keeps_text_up_to_limit() {
        let exact = "a".repeat(EXCERPT_LIMIT);
        assert_eq!(truncate_excerpt(&exact, EXCERPT_LIMIT), exact);
        assert_eq!(truncate_excerpt("short", EXCERPT_LIMIT), "short");
    }

    #[test]
    fn truncate_excerpt_cuts_long_text_and_appends_ellipsis() {
        let long = "b".repeat(EXCERPT_LIMIT + 30);
        let result = truncate_excerpt(&long, EXCERPT_LIMIT);

        assert_eq!(result.chars().count(), EXCERPT_LIMIT + ELLIPSIS.len());
        assert!(result.ends_with(ELLIPSIS));
        assert!(long.starts_with(result.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn truncate_excerpt_trims_whitespace_before_ellipsis() {
        let text = format!("{}    tail", "c".repeat(8));
        assert_eq!(truncate_excerpt(&text, 10), "cccccccc...");
    }

    #[test]
    fn truncate_excerpt_counts_characters_not_bytes() {
        let text = "ж".repeat(12);
        assert_eq!(truncate_excerpt(&text, 10), format!("{}...", "ж".repeat(10)));
    }

    #[test]
    fn format_display_date_handles_wordpress_naive_timestamp() {
        assert_eq!(format_display_date("2024-05-01T10:00:00"), "May 1, 2024");
    }

    #[test]
    fn format_display_date_handles_rfc3339_and_plain_date() {
        assert_eq!(format_display_date("2023-12-25T08:30:00+02:00"), "Dec 25, 2023");
        assert_eq!(format_display_date("2022-01-09"), "Jan 9, 2022");
    }

    #[test]
    fn format_display_date_falls_back_on_garbage() {
        assert_eq!(format_display_date("not a date"), INVALID_DATE);
        assert_eq!(format_display_date(""), INVALID_DATE);
    }

    #[test]
    fn featured_image_is_empty_without_media() {
        assert_eq!(extract_featured_image_url(&sample_post(None)), "");
    }

    #[test]
    fn featured_image_returns_source_url() {
        let post = sample_post(Some(FeaturedMedia {
            source_url: "https://x/img.jpg".to_string(),
            alt_text: None,
        }));
        assert_eq!(extract_featured_image_url(&post), "https://x/img.jpg");
    }

    #[test]
    fn summarize_builds_list_card() {
        let summary = summarize(&sample_post(None));

        assert_eq!(summary.id, 42);
        assert_eq!(summary.date_label, "May 1, 2024");
        assert_eq!(summary.excerpt, "Short summary");
        assert_eq!(summary.image_url, "");
        assert_eq!(summary.image_alt, summary.title);
        assert_eq!(summary.detail_path, "/posts/42");
    }

    #[test]
    fn present_uses_empty_body_when_content_missing() {
        let mut post = sample_post(None);
        post.content = None;

        let article = present(&post);
        assert_eq!(article.body_html, "");
        assert_eq!(article.permalink, "https://example.com/2024/05/01/hello");
    }
}
