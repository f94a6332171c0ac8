use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Message returned when a create request lacks a title or a genre.
pub const MISSING_FIELDS: &str = "Título e gênero são obrigatórios";

/// A single catalog entry, as persisted in the backing file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: u64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "favorito", default)]
    pub favorite: bool,
}

impl Movie {
    /// Flip the favorite flag and return the new value.
    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        self.favorite
    }

    /// Case-insensitive substring match against the title.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Create input: `id` is assigned by the service, `favorito` is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewMovie {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "genero", default)]
    pub genre: Option<String>,
    #[serde(rename = "favorito", default)]
    pub favorite: Option<bool>,
}

impl NewMovie {
    /// Presence check only: both title and genre must be non-empty strings.
    pub fn validate(&self) -> Result<(), ModelError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        if !present(&self.title) || !present(&self.genre) {
            return Err(ModelError::Validation(MISSING_FIELDS.into()));
        }
        Ok(())
    }

    /// Validate and build the record that will be appended with the given id.
    pub fn into_movie(self, id: u64) -> Result<Movie, ModelError> {
        self.validate()?;
        Ok(Movie {
            id,
            title: self.title.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            favorite: self.favorite.unwrap_or(false),
        })
    }
}
