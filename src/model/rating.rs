use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    O,
    M,
    L,
}

impl Person {
    pub const ALL: [Person; 3] = [Person::O, Person::M, Person::L];

    pub fn code(&self) -> &'static str {
        match self {
            Person::O => "O",
            Person::M => "M",
            Person::L => "L",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Person {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "O" => Ok(Person::O),
            "M" => Ok(Person::M),
            "L" => Ok(Person::L),
            _ => Err(CatalogError::InvalidPerson(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rating {
    #[serde(rename = "O")]
    pub o: i64,
    #[serde(rename = "M")]
    pub m: i64,
    #[serde(rename = "L")]
    pub l: i64,
}

impl Rating {
    pub fn new(o: i64, m: i64, l: i64) -> Self {
        Rating { o, m, l }
    }

    pub fn get(&self, person: Person) -> i64 {
        match person {
            Person::O => self.o,
            Person::M => self.m,
            Person::L => self.l,
        }
    }

    pub fn set(&mut self, person: Person, value: i64) {
        match person {
            Person::O => self.o = value,
            Person::M => self.m = value,
            Person::L => self.l = value,
        }
    }
}

/// A rating as found in storage.
///
/// Older catalogs stored ratings in other shapes (a bare number, a partial
/// object, strings). Those are kept verbatim in `Legacy` so that loading and
/// persisting an untouched record never rewrites it; the first rating write
/// upgrades the record to `Scores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingField {
    Scores(Rating),
    Legacy(Value),
}

impl RatingField {
    pub fn read(&self) -> Rating {
        match self {
            RatingField::Scores(rating) => *rating,
            RatingField::Legacy(Value::Object(map)) => {
                let mut rating = Rating::default();
                for person in Person::ALL {
                    let value = map.get(person.code()).map(lenient_score).unwrap_or(0);
                    rating.set(person, value);
                }
                rating
            }
            RatingField::Legacy(_) => Rating::default(),
        }
    }

    pub fn is_normalized(&self) -> bool {
        matches!(self, RatingField::Scores(_))
    }
}

fn lenient_score(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_int_lenient(s),
        _ => 0,
    }
}

/// Parses the leading integer of `input` (after trimming), 0 when there is none.
/// `" 4 stars"` gives 4, `"-2"` gives -2, `"four"` gives 0.
pub fn parse_int_lenient(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(n) => sign * n,
        Err(_) => 0,
    }
}
