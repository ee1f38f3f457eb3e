use std::fmt::Write as _;

use posts_client::adapter::{present, strip_markup, summarize};
use posts_client::{DetailFetchState, ListFetchState};

pub fn render_list(state: &ListFetchState) -> String {
    let mut out = String::new();

    if let Some(message) = &state.error_message {
        let _ = writeln!(out, "{message}");
        write_pager(&mut out, state);
        return out;
    }

    if state.posts.is_empty() {
        let _ = writeln!(out, "Постов пока нет.");
    }

    for post in &state.posts {
        let card = summarize(post);
        let _ = writeln!(out, "- [{}] {} ({})", card.id, strip_markup(&card.title), card.date_label);
        if !card.excerpt.is_empty() {
            let _ = writeln!(out, "    {}", card.excerpt);
        }
        if !card.image_url.is_empty() {
            let _ = writeln!(out, "    image: {}", card.image_url);
        }
        let _ = writeln!(out, "    {}", card.detail_path);
    }

    write_pager(&mut out, state);
    out
}

fn write_pager(out: &mut String, state: &ListFetchState) {
    let _ = writeln!(
        out,
        "Страница {} из {}  [prev: {}] [next: {}]",
        state.current_page,
        state.total_pages,
        on_off(state.can_go_previous()),
        on_off(state.can_go_next()),
    );
}

pub fn render_detail(state: &DetailFetchState) -> String {
    let mut out = String::new();

    if let Some(message) = &state.error_message {
        let _ = writeln!(out, "{message}");
        return out;
    }

    let Some(post) = &state.post else {
        let _ = writeln!(out, "Post not found.");
        return out;
    };

    let article = present(post);
    let _ = writeln!(out, "{}", strip_markup(&article.title));
    let _ = writeln!(out, "{}", article.date_label);
    let _ = writeln!(out, "{}", article.permalink);
    if !article.image_url.is_empty() {
        let _ = writeln!(out, "image: {}", article.image_url);
    }
    let body = strip_markup(&article.body_html);
    if !body.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{body}");
    }
    out
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
