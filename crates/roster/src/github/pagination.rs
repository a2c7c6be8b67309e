//! Next-page extraction from GitHub's `Link` response header.
//!
//! GitHub paginates listings with a header like:
//! `<https://api.github.com/repositories/1/forks?per_page=100&page=2>; rel="next",
//!  <...&page=9>; rel="last"`
//!
//! The absence of a `rel="next"` link is the end-of-listing sentinel.

/// Parse the `Link` header and return the `rel="next"` page number.
#[must_use]
pub fn next_page(link_header: &str) -> Option<u32> {
    for part in link_header.split(',') {
        let part = part.trim();

        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(value) = segment.strip_prefix("rel=") {
                rel = Some(value.trim_matches('"'));
            }
        }

        if rel == Some("next")
            && let Some(url) = url
        {
            return page_param(url);
        }
    }

    None
}

/// Extract the `page` query parameter from a URL.
fn page_param(url: &str) -> Option<u32> {
    let query = &url[url.find('?')? + 1..];

    query
        .split('&')
        .find_map(|param| param.strip_prefix("page="))
        .and_then(|value| value.parse().ok())
}
