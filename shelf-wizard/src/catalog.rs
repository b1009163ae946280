//! Closed genre vocabulary offered on step 4

/// Display names in presentation order
pub const GENRES: [&str; 20] = [
    "Fiction",
    "Fantasy",
    "Science Fiction",
    "Mystery",
    "Thriller",
    "Romance",
    "Historical Fiction",
    "Horror",
    "Young Adult",
    "Biography",
    "Self-Help",
    "Science",
    "History",
    "Travel",
    "Cooking",
    "Art",
    "Philosophy",
    "Poetry",
    "Drama",
    "Comics & Graphic Novels",
];

/// Most genres a reader may pick
pub const MAX_GENRES: usize = 3;

/// Stored form of a genre (lowercased display name)
pub fn genre_value(display: &str) -> String {
    display.to_lowercase()
}

/// Map user input onto the vocabulary, accepting either the display name or
/// the stored value in any case
pub fn canonical_genre(input: &str) -> Option<String> {
    let wanted = input.trim().to_lowercase();
    GENRES
        .iter()
        .map(|display| genre_value(display))
        .find(|value| *value == wanted)
}

/// `(stored value, display name)` pairs for rendering checkboxes
pub fn genre_options() -> Vec<(String, &'static str)> {
    GENRES
        .iter()
        .map(|display| (genre_value(display), *display))
        .collect()
}
