use serde::{Deserialize, Serialize};

use super::rating::{Person, Rating, RatingField};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingField>,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, poster: impl Into<String>) -> Self {
        MovieRecord {
            title: title.into(),
            poster: poster.into(),
            trailer: None,
            music: None,
            actors: None,
            rating: None,
            quotes: vec![],
            platforms: None,
            comments: None,
        }
    }

    pub fn rating(&self) -> Rating {
        self.rating
            .as_ref()
            .map(RatingField::read)
            .unwrap_or_default()
    }

    pub fn score(&self, person: Person) -> i64 {
        self.rating().get(person)
    }

    pub fn set_score(&mut self, person: Person, value: i64) {
        let mut rating = self.rating();
        rating.set(person, value);
        self.rating = Some(RatingField::Scores(rating));
    }

    pub fn has_normalized_rating(&self) -> bool {
        self.rating
            .as_ref()
            .map(RatingField::is_normalized)
            .unwrap_or(false)
    }

    pub fn to_csvable_array(&self, person: Person) -> Vec<String> {
        let score = self.score(person);
        vec![
            self.title.clone(),
            if score > 0 {
                score.to_string()
            } else {
                "".to_string()
            },
        ]
    }

    pub fn csv_titles() -> Vec<&'static str> {
        vec!["Title", "Rating"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_rating_reads_as_zero_and_upgrades_on_write() {
        let mut movie = MovieRecord::new("Heat", "heat.jpg");
        assert_eq!(movie.rating(), Rating::default());
        assert!(!movie.has_normalized_rating());

        movie.set_score(Person::O, 4);

        assert_eq!(movie.rating, Some(RatingField::Scores(Rating::new(4, 0, 0))));
        assert!(movie.has_normalized_rating());
    }

    #[test]
    fn deserializes_sparse_legacy_record() {
        let movie: MovieRecord = serde_json::from_value(json!({
            "title": "Alien",
            "rating": 5
        }))
        .unwrap();

        assert_eq!(movie.poster, "");
        assert!(movie.quotes.is_empty());
        assert_eq!(movie.trailer, None);
        assert_eq!(movie.rating(), Rating::default());
    }

    #[test]
    fn omits_absent_fields_when_serialized() {
        let mut movie = MovieRecord::new("Heat", "heat.jpg");
        movie.quotes = vec!["Don't waste my time".to_string()];
        movie.set_score(Person::L, 2);

        assert_eq!(
            serde_json::to_value(&movie).unwrap(),
            json!({
                "title": "Heat",
                "poster": "heat.jpg",
                "rating": {"O": 0, "M": 0, "L": 2},
                "quotes": ["Don't waste my time"]
            })
        );
    }

    #[test]
    fn csv_row_leaves_unrated_empty() {
        let mut movie = MovieRecord::new("Heat", "heat.jpg");
        assert_eq!(movie.to_csvable_array(Person::O), vec!["Heat", ""]);

        movie.set_score(Person::O, 5);
        assert_eq!(movie.to_csvable_array(Person::O), vec!["Heat", "5"]);
    }
}
