//! Tag construction.
//!
//! A movie's tag string is its synopsis followed by fused tokens for its
//! genres, keywords, cast and directors. Multi-word names are fused into one
//! lowercase token ("Sam Worthington" -> "samworthington") so two films that
//! merely share a first name do not look alike.

/// Lowercase each name and strip all whitespace from it.
///
/// Applying this to its own output returns the same list.
pub fn clean_tokens<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            name.as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect()
        })
        .collect()
}

/// The per-movie inputs to [`build_tags`], already decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagFields<'a> {
    pub overview: Option<&'a str>,
    pub genres: &'a [String],
    pub keywords: &'a [String],
    pub cast: &'a [String],
    pub directors: &'a [String],
}

/// Join synopsis, genres, keywords, cast and directors (in that order) with
/// single spaces. Empty parts are skipped, so a movie with nothing yields "".
pub fn build_tags(fields: &TagFields<'_>) -> String {
    let overview = fields.overview.unwrap_or_default().to_string();

    std::iter::once(overview)
        .chain(clean_tokens(fields.genres))
        .chain(clean_tokens(fields.keywords))
        .chain(clean_tokens(fields.cast))
        .chain(clean_tokens(fields.directors))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
