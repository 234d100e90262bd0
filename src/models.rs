use serde::Deserialize;

use crate::entities::{movie, user};

/// Immutable view of a registered user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

/// Immutable view of a favorited movie. Year, director and poster are
/// absent when enrichment was unavailable at add time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            year: m.year,
            director: m.director,
            poster_url: m.poster_url,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
}

/// Partial update for a movie. `None` leaves the field unchanged;
/// the poster is deliberately not patchable.
#[derive(Clone, Debug, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMovieForm {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieForm {
    pub new_title: Option<String>,
    pub new_year: Option<String>,
    pub new_director: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieListQuery {
    #[serde(default)]
    pub q: String,
}
