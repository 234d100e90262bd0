use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::{
    AppState,
    error::AppResult,
    flash::{self, Level},
    models::{AddMovieForm, CreateUserForm, MovieListQuery, MoviePatch, NewMovie, UpdateMovieForm},
    store::StoreError,
    templates,
};

pub async fn index(State(state): State<AppState>, jar: SignedCookieJar) -> AppResult<Response> {
    let users = state.store.list_users().await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(templates::index_page(&users, &flashes))).into_response())
}

pub async fn create_user(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CreateUserForm>,
) -> AppResult<Response> {
    let name = form.name.trim().to_string();
    if name.is_empty() {
        let jar = flash::push(jar, Level::Warning, "Please enter a name.");
        return Ok((jar, Redirect::to("/")).into_response());
    }

    let jar = match state.store.create_user(&name).await {
        Ok(user) => {
            flash::push(jar, Level::Success, format!("User '{}' created successfully!", user.name))
        }
        Err(StoreError::DuplicateUser) => {
            flash::push(jar, Level::Warning, format!("User '{name}' already exists."))
        }
        Err(err) => return Err(err.into()),
    };

    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn delete_user(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(user_id): Path<i32>,
) -> AppResult<Response> {
    state.store.delete_user(user_id).await?;
    let jar = flash::push(jar, Level::Info, "User and their movies deleted.");
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn movies(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(user_id): Path<i32>,
    Query(query): Query<MovieListQuery>,
) -> AppResult<Response> {
    let search = query.q.trim().to_string();
    let user = state.store.get_user(user_id).await?;
    let movies = state.store.search_movies(user_id, &search).await?;

    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(templates::movies_page(&user, &movies, &search, &flashes))).into_response())
}

pub async fn add_movie(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(user_id): Path<i32>,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Response> {
    let title = form.title.trim().to_string();
    if title.is_empty() {
        let jar = flash::push(jar, Level::Warning, "Please enter a movie title.");
        return Ok((jar, Redirect::to(&movies_path(user_id))).into_response());
    }

    // Best-effort enrichment: a lookup failure never blocks the add.
    let facts = state.omdb.lookup(&title).await;
    let new_movie = match &facts {
        Some(facts) => NewMovie {
            title: facts.title.clone().unwrap_or_else(|| title.clone()),
            year: facts.year,
            director: facts.director.clone(),
            poster_url: facts.poster_url.clone(),
        },
        None => NewMovie { title: title.clone(), ..Default::default() },
    };
    let stored_title = new_movie.title.clone();

    let jar = match state.store.add_movie(user_id, new_movie).await {
        Ok(_) => match facts {
            Some(_) => flash::push(
                jar,
                Level::Success,
                format!("Movie '{stored_title}' added successfully!"),
            ),
            None if state.omdb.is_configured() => flash::push(
                jar,
                Level::Warning,
                "We couldn't reach the movie database right now, \
                 but we added your movie using the title you provided.",
            ),
            None => flash::push(
                jar,
                Level::Info,
                "Movie added using your title only. (No movie database configured.)",
            ),
        },
        Err(StoreError::DuplicateMovie) => flash::push(
            jar,
            Level::Warning,
            format!("'{stored_title}' is already in this list."),
        ),
        Err(err) => return Err(err.into()),
    };

    Ok((jar, Redirect::to(&movies_path(user_id))).into_response())
}

pub async fn update_movie(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path((user_id, movie_id)): Path<(i32, i32)>,
    Form(form): Form<UpdateMovieForm>,
) -> AppResult<Response> {
    let title = nonblank(form.new_title);
    let director = nonblank(form.new_director);
    let year_raw = nonblank(form.new_year);
    // An unparsable year is ignored rather than rejected, the field
    // just stays as it was.
    let year = year_raw.as_deref().and_then(parse_year);

    if title.is_none() && director.is_none() && year_raw.is_none() {
        let jar = flash::push(jar, Level::Warning, "No changes provided to update.");
        return Ok((jar, Redirect::to(&movies_path(user_id))).into_response());
    }

    let jar = match state.store.update_movie(movie_id, MoviePatch { title, year, director }).await {
        Ok(_) => flash::push(jar, Level::Success, "Movie updated successfully."),
        Err(StoreError::DuplicateMovie) => flash::push(
            jar,
            Level::Warning,
            "Another movie with that title is already in this list.",
        ),
        Err(err) => return Err(err.into()),
    };

    Ok((jar, Redirect::to(&movies_path(user_id))).into_response())
}

pub async fn delete_movie(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path((user_id, movie_id)): Path<(i32, i32)>,
) -> AppResult<Response> {
    state.store.delete_movie(movie_id).await?;
    let jar = flash::push(jar, Level::Info, "Movie deleted.");
    Ok((jar, Redirect::to(&movies_path(user_id))).into_response())
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(templates::not_found_page()))
}

fn movies_path(user_id: i32) -> String {
    format!("/users/{user_id}/movies")
}

fn nonblank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    })
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonblank_drops_empty_and_whitespace() {
        assert_eq!(nonblank(None), None);
        assert_eq!(nonblank(Some("".to_string())), None);
        assert_eq!(nonblank(Some("   ".to_string())), None);
        assert_eq!(nonblank(Some("  Dune ".to_string())), Some("Dune".to_string()));
    }

    #[test]
    fn parse_year_accepts_integers_only() {
        assert_eq!(parse_year("1984"), Some(1984));
        assert_eq!(parse_year("soon"), None);
    }
}
