//! Built-in sample dataset: five well-known films and two community users.

use crate::types::{Dataset, ItemDefinition, RatingEntry};

fn movie(id: u32, title: &str, year: u16, genres: &[&str], tags: &[&str]) -> ItemDefinition {
    ItemDefinition {
        id,
        title: title.to_string(),
        year: Some(year),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

impl Dataset {
    /// The default catalog used when no dataset file is given.
    ///
    /// User 1 (alex) loves the first four films; user 2 (bianca) likes
    /// Parasite and Interstellar.
    pub fn sample() -> Self {
        let items = vec![
            movie(
                1,
                "Inception",
                2010,
                &["Action", "Sci-Fi", "Thriller"],
                &["dream", "heist", "mind-bending", "nolan"],
            ),
            movie(
                2,
                "The Dark Knight",
                2008,
                &["Action", "Crime", "Drama"],
                &["batman", "joker", "nolan"],
            ),
            movie(
                3,
                "Interstellar",
                2014,
                &["Adventure", "Drama", "Sci-Fi"],
                &["space", "time", "nolan", "wormhole"],
            ),
            movie(
                4,
                "The Matrix",
                1999,
                &["Action", "Sci-Fi"],
                &["simulation", "kung fu", "ai"],
            ),
            movie(
                5,
                "Parasite",
                2019,
                &["Drama", "Thriller"],
                &["class", "korean", "academy awards"],
            ),
        ];

        let alex = 1;
        let bianca = 2;
        let ratings = vec![
            RatingEntry::new(alex, 1, 5),
            RatingEntry::new(alex, 2, 5),
            RatingEntry::new(alex, 3, 5),
            RatingEntry::new(alex, 4, 5),
            RatingEntry::new(bianca, 5, 5),
            RatingEntry::new(bianca, 3, 4),
        ];

        Self { items, ratings }
    }
}
