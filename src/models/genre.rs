use crate::error::{RecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The genre dimensions of a catalog feature vector, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Comedy,
    Horror,
    Action,
    SciFi,
    Documentary,
    Historical,
    Drama,
    Superhero,
    Fantasy,
}

impl Genre {
    pub const COUNT: usize = 9;

    pub const ALL: [Genre; Genre::COUNT] = [
        Genre::Comedy,
        Genre::Horror,
        Genre::Action,
        Genre::SciFi,
        Genre::Documentary,
        Genre::Historical,
        Genre::Drama,
        Genre::Superhero,
        Genre::Fantasy,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Genre> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Genre::Comedy => "Comedy",
            Genre::Horror => "Horror",
            Genre::Action => "Action",
            Genre::SciFi => "Sci-Fi",
            Genre::Documentary => "Documentary",
            Genre::Historical => "Historical",
            Genre::Drama => "Drama",
            Genre::Superhero => "Superhero",
            Genre::Fantasy => "Fantasy",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named per-genre weights; zero means the genre does not apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreWeights {
    pub comedy: f64,
    pub horror: f64,
    pub action: f64,
    pub sci_fi: f64,
    pub documentary: f64,
    pub historical: f64,
    pub drama: f64,
    pub superhero: f64,
    pub fantasy: f64,
}

impl GenreWeights {
    pub fn get(&self, genre: Genre) -> f64 {
        match genre {
            Genre::Comedy => self.comedy,
            Genre::Horror => self.horror,
            Genre::Action => self.action,
            Genre::SciFi => self.sci_fi,
            Genre::Documentary => self.documentary,
            Genre::Historical => self.historical,
            Genre::Drama => self.drama,
            Genre::Superhero => self.superhero,
            Genre::Fantasy => self.fantasy,
        }
    }

    pub fn with(mut self, genre: Genre, weight: f64) -> Self {
        let slot = match genre {
            Genre::Comedy => &mut self.comedy,
            Genre::Horror => &mut self.horror,
            Genre::Action => &mut self.action,
            Genre::SciFi => &mut self.sci_fi,
            Genre::Documentary => &mut self.documentary,
            Genre::Historical => &mut self.historical,
            Genre::Drama => &mut self.drama,
            Genre::Superhero => &mut self.superhero,
            Genre::Fantasy => &mut self.fantasy,
        };
        *slot = weight;
        self
    }

    pub fn to_vector(&self) -> Vec<f64> {
        Genre::ALL.iter().map(|&g| self.get(g)).collect()
    }

    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != Genre::COUNT {
            return Err(RecError::DimensionMismatch {
                expected: Genre::COUNT,
                actual: values.len(),
            });
        }

        Ok(Genre::ALL
            .iter()
            .zip(values)
            .fold(Self::default(), |weights, (&genre, &value)| weights.with(genre, value)))
    }

    /// Genres carrying a non-zero weight.
    pub fn genres(&self) -> Vec<Genre> {
        Genre::ALL
            .iter()
            .copied()
            .filter(|&g| self.get(g) != 0.0)
            .collect()
    }
}

impl From<GenreWeights> for Vec<f64> {
    fn from(weights: GenreWeights) -> Self {
        weights.to_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_index_roundtrip() {
        for (i, genre) in Genre::ALL.iter().enumerate() {
            assert_eq!(genre.index(), i);
            assert_eq!(Genre::from_index(i), Some(*genre));
        }
        assert_eq!(Genre::from_index(Genre::COUNT), None);
    }

    #[test]
    fn test_weights_to_vector_order() {
        let weights = GenreWeights::default()
            .with(Genre::Action, 9.0)
            .with(Genre::Drama, 8.4)
            .with(Genre::Fantasy, 9.0);

        assert_eq!(
            weights.to_vector(),
            vec![0.0, 0.0, 9.0, 0.0, 0.0, 0.0, 8.4, 0.0, 9.0]
        );
        assert_eq!(weights.genres(), vec![Genre::Action, Genre::Drama, Genre::Fantasy]);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let err = GenreWeights::from_slice(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, RecError::DimensionMismatch { expected: 9, actual: 2 });

        let weights = GenreWeights::from_slice(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]).unwrap();
        assert_eq!(weights.comedy, 1.0);
        assert_eq!(weights.fantasy, 2.0);
    }

    #[test]
    fn test_partial_weights_deserialize() {
        let weights: GenreWeights = serde_json::from_str(r#"{"comedy": 4.5, "sci_fi": 1.0}"#).unwrap();
        assert_eq!(weights.get(Genre::Comedy), 4.5);
        assert_eq!(weights.get(Genre::SciFi), 1.0);
        assert_eq!(weights.get(Genre::Horror), 0.0);
    }
}
