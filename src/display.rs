use url::Url;

use crate::model::MovieRecord;

pub const NO_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Image";
pub const NO_ACTORS: &str = "Not specified";
pub const NO_QUOTES: &str = "No quotes added.";
pub const NO_MUSIC: &str = "No music available.";
pub const DEFAULT_PLATFORMS: &str = "Mostly streaming";
pub const NO_COMMENTS: &str = "No comments.";

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results";
const MAX_STARS: i64 = 5;

pub fn filter_by_title<'a>(movies: &'a [MovieRecord], term: &str) -> Vec<&'a MovieRecord> {
    let term = term.to_lowercase();
    movies
        .iter()
        .filter(|movie| movie.title.to_lowercase().contains(&term))
        .collect()
}

pub fn trailer_embed_url(trailer: &str) -> String {
    if trailer.contains("watch?v=") {
        trailer.replacen("watch?v=", "embed/", 1)
    } else if trailer.contains("youtu.be/") {
        trailer.replacen("youtu.be/", "youtube.com/embed/", 1)
    } else {
        trailer.to_string()
    }
}

pub fn trailer_search_url(title: &str) -> String {
    let query = format!("Bande annonce VF {}", title);
    match Url::parse_with_params(YOUTUBE_SEARCH_URL, &[("search_query", query.as_str())]) {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::warn!("Could not build trailer search link for '{}': {}", title, e);
            YOUTUBE_SEARCH_URL.to_string()
        }
    }
}

pub fn format_quote(quote: &str) -> String {
    if quote.starts_with('#') {
        quote.to_string()
    } else {
        format!("#{}", quote)
    }
}

pub fn stars(value: i64) -> String {
    let filled = value.clamp(0, MAX_STARS) as usize;
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(MAX_STARS as usize - filled)
    )
}

pub fn describe_media(value: &str) -> String {
    match value.strip_prefix("data:") {
        Some(rest) => {
            let mime = rest.split([';', ',']).next().unwrap_or_default();
            let mime = if mime.is_empty() { "text/plain" } else { mime };
            format!("embedded {} ({} bytes)", mime, value.len())
        }
        None => value.to_string(),
    }
}

pub fn describe_poster(poster: &str) -> String {
    describe_media(text_or(Some(poster), NO_POSTER))
}

/// Empty strings count as missing, as they do on the detail screen.
pub fn text_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => placeholder,
    }
}
