//! Keyword routing for free-text questions the model could not answer.

/// A menu selection recovered from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuRoute {
    pub domain: &'static str,
    pub sub: &'static str,
    /// The keyword that matched.
    pub keyword: &'static str,
}

/// Ordered keyword checks. Evaluated top to bottom, first match wins.
/// `footplate` is checked before the bare `kms` so footplate questions that
/// also mention kilometres route to the footplate summary.
const LADDER: [(&str, &str, &str); 5] = [
    ("total kms", "3", "1"),
    ("footplate", "3", "2"),
    ("kms", "3", "1"),
    ("leave", "1", "5"),
    ("night", "2", "7"),
];

/// Match free text against the ladder. Case-insensitive substring checks;
/// `None` means the question is uninterpretable.
pub fn route(text: &str) -> Option<MenuRoute> {
    let text = text.to_lowercase();
    LADDER
        .iter()
        .find(|&&(keyword, _, _)| text.contains(keyword))
        .map(|&(keyword, domain, sub)| MenuRoute {
            domain,
            sub,
            keyword,
        })
}
