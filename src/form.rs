use crate::model::{rating::parse_int_lenient, MovieRecord, Rating, RatingField};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieForm {
    pub title: String,
    pub poster: String,
    pub trailer: String,
    pub music: String,
    pub actors: String,
    pub rating_o: String,
    pub rating_m: String,
    pub rating_l: String,
    pub quotes: String,
    pub platforms: String,
    pub comments: String,
}

impl MovieForm {
    pub fn from_record(movie: &MovieRecord) -> Self {
        let rating = movie.rating();
        MovieForm {
            title: movie.title.clone(),
            poster: movie.poster.clone(),
            trailer: movie.trailer.clone().unwrap_or_default(),
            music: movie.music.clone().unwrap_or_default(),
            actors: movie.actors.clone().unwrap_or_default(),
            rating_o: rating.o.to_string(),
            rating_m: rating.m.to_string(),
            rating_l: rating.l.to_string(),
            quotes: movie.quotes.join("\n"),
            platforms: movie.platforms.clone().unwrap_or_default(),
            comments: movie.comments.clone().unwrap_or_default(),
        }
    }

    pub fn into_record(self) -> MovieRecord {
        let rating = Rating::new(
            parse_int_lenient(&self.rating_o),
            parse_int_lenient(&self.rating_m),
            parse_int_lenient(&self.rating_l),
        );

        MovieRecord {
            title: self.title,
            poster: self.poster,
            trailer: Some(self.trailer),
            music: Some(self.music),
            actors: Some(self.actors),
            rating: Some(RatingField::Scores(rating)),
            quotes: split_quotes(&self.quotes),
            platforms: Some(self.platforms),
            comments: Some(self.comments),
        }
    }
}

pub fn split_quotes(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
