use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
    sea_query::{Expr, Func},
};

use crate::{
    entities::{movie, user},
    models::{Movie, MoviePatch, NewMovie, User},
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no such record")]
    NotFound,
    #[error("a user with that name already exists")]
    DuplicateUser,
    #[error("that movie is already in the list")]
    DuplicateMovie,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access contract for users and their movies. Implementations return
/// plain value records; mutations commit before returning.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, name: &str) -> StoreResult<User>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn get_user(&self, user_id: i32) -> StoreResult<User>;
    async fn delete_user(&self, user_id: i32) -> StoreResult<()>;

    async fn list_movies(&self, user_id: i32) -> StoreResult<Vec<Movie>>;
    async fn search_movies(&self, user_id: i32, query: &str) -> StoreResult<Vec<Movie>>;
    async fn add_movie(&self, user_id: i32, new: NewMovie) -> StoreResult<Movie>;
    async fn update_movie(&self, movie_id: i32, patch: MoviePatch) -> StoreResult<Movie>;
    async fn delete_movie(&self, movie_id: i32) -> StoreResult<()>;
}

/// The sea-orm/SQLite implementation of [`Store`].
#[derive(Clone)]
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn ensure_user(&self, user_id: i32) -> StoreResult<user::Model> {
        user::Entity::find_by_id(user_id).one(&self.db).await?.ok_or(StoreError::NotFound)
    }

    async fn title_taken(&self, user_id: i32, title: &str, except: Option<i32>) -> StoreResult<bool> {
        let mut query = movie::Entity::find()
            .filter(movie::Column::UserId.eq(user_id))
            .filter(
                Expr::expr(Func::lower(Expr::col(movie::Column::Title)))
                    .eq(title.trim().to_lowercase()),
            );
        if let Some(id) = except {
            query = query.filter(movie::Column::Id.ne(id));
        }
        Ok(query.one(&self.db).await?.is_some())
    }
}

#[async_trait]
impl Store for DbStore {
    async fn create_user(&self, name: &str) -> StoreResult<User> {
        let name = name.trim();
        let existing = user::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(user::Column::Name))).eq(name.to_lowercase()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(StoreError::DuplicateUser);
        }

        let model = user::ActiveModel { name: Set(name.to_string()), ..Default::default() }
            .insert(&self.db)
            .await?;
        Ok(model.into())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = user::Entity::find().order_by_asc(user::Column::Id).all(&self.db).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, user_id: i32) -> StoreResult<User> {
        Ok(self.ensure_user(user_id).await?.into())
    }

    async fn delete_user(&self, user_id: i32) -> StoreResult<()> {
        self.ensure_user(user_id).await?;

        // One transaction so the user and their movies disappear together.
        let txn = self.db.begin().await?;
        movie::Entity::delete_many()
            .filter(movie::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        user::Entity::delete_by_id(user_id).exec(&txn).await?;
        txn.commit().await?;

        Ok(())
    }

    async fn list_movies(&self, user_id: i32) -> StoreResult<Vec<Movie>> {
        self.ensure_user(user_id).await?;
        let movies = movie::Entity::find()
            .filter(movie::Column::UserId.eq(user_id))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies.into_iter().map(Movie::from).collect())
    }

    async fn search_movies(&self, user_id: i32, query: &str) -> StoreResult<Vec<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_movies(user_id).await;
        }

        self.ensure_user(user_id).await?;
        let pattern = format!("%{}%", query.to_lowercase());
        let movies = movie::Entity::find()
            .filter(movie::Column::UserId.eq(user_id))
            .filter(Expr::expr(Func::lower(Expr::col(movie::Column::Title))).like(pattern))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies.into_iter().map(Movie::from).collect())
    }

    async fn add_movie(&self, user_id: i32, new: NewMovie) -> StoreResult<Movie> {
        self.ensure_user(user_id).await?;

        let title = new.title.trim().to_string();
        if self.title_taken(user_id, &title, None).await? {
            return Err(StoreError::DuplicateMovie);
        }

        let model = movie::ActiveModel {
            title: Set(title),
            year: Set(new.year),
            director: Set(new.director),
            poster_url: Set(new.poster_url),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(model.into())
    }

    async fn update_movie(&self, movie_id: i32, patch: MoviePatch) -> StoreResult<Movie> {
        let model = movie::Entity::find_by_id(movie_id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        if let Some(title) = &patch.title
            && self.title_taken(model.user_id, title, Some(movie_id)).await?
        {
            return Err(StoreError::DuplicateMovie);
        }

        let mut active: movie::ActiveModel = model.into();
        if let Some(title) = patch.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(year) = patch.year {
            active.year = Set(Some(year));
        }
        if let Some(director) = patch.director {
            active.director = Set(Some(director));
        }

        let model = active.update(&self.db).await?;
        Ok(model.into())
    }

    async fn delete_movie(&self, movie_id: i32) -> StoreResult<()> {
        let res = movie::Entity::delete_by_id(movie_id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    use super::*;

    async fn store() -> DbStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        DbStore::new(db)
    }

    fn titled(title: &str) -> NewMovie {
        NewMovie { title: title.to_string(), ..Default::default() }
    }

    #[tokio::test]
    async fn create_user_rejects_case_insensitive_duplicate() {
        let store = store().await;
        store.create_user("Ann").await.unwrap();

        let err = store.create_user("ann").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser));

        let err = store.create_user("  ANN  ").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser));
    }

    #[tokio::test]
    async fn add_movie_rejects_duplicate_title_per_user() {
        let store = store().await;
        let ann = store.create_user("Ann").await.unwrap();
        let bob = store.create_user("Bob").await.unwrap();

        store.add_movie(ann.id, titled("Inception")).await.unwrap();
        let err = store.add_movie(ann.id, titled("inception")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateMovie));

        // The same title is fine for a different user.
        store.add_movie(bob.id, titled("Inception")).await.unwrap();
    }

    #[tokio::test]
    async fn add_movie_requires_existing_user() {
        let store = store().await;
        let err = store.add_movie(99, titled("Arrival")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_user_cascades_to_movies() {
        let store = store().await;
        let ann = store.create_user("Ann").await.unwrap();
        let bob = store.create_user("Bob").await.unwrap();
        store.add_movie(ann.id, titled("Inception")).await.unwrap();
        store.add_movie(ann.id, titled("Arrival")).await.unwrap();
        store.add_movie(bob.id, titled("Heat")).await.unwrap();

        store.delete_user(ann.id).await.unwrap();

        let err = store.list_movies(ann.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        let orphans = movie::Entity::find()
            .filter(movie::Column::UserId.eq(ann.id))
            .all(store.db())
            .await
            .unwrap();
        assert!(orphans.is_empty());

        // Bob's list is untouched.
        assert_eq!(store.list_movies(bob.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_user_not_found() {
        let store = store().await;
        let err = store.delete_user(1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn search_with_empty_query_lists_everything() {
        let store = store().await;
        let ann = store.create_user("Ann").await.unwrap();
        store.add_movie(ann.id, titled("Inception")).await.unwrap();
        store.add_movie(ann.id, titled("Arrival")).await.unwrap();

        let all = store.list_movies(ann.id).await.unwrap();
        let searched = store.search_movies(ann.id, "").await.unwrap();
        assert_eq!(all, searched);

        let searched = store.search_movies(ann.id, "   ").await.unwrap();
        assert_eq!(all, searched);
    }

    #[tokio::test]
    async fn search_filters_title_case_insensitively() {
        let store = store().await;
        let ann = store.create_user("Ann").await.unwrap();
        store.add_movie(ann.id, titled("The Godfather")).await.unwrap();
        store.add_movie(ann.id, titled("Goodfellas")).await.unwrap();
        store.add_movie(ann.id, titled("Heat")).await.unwrap();

        let hits = store.search_movies(ann.id, "GOD").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "The Godfather");

        let hits = store.search_movies(ann.id, "go").await.unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.search_movies(ann.id, "alien").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn update_patches_only_provided_fields() {
        let store = store().await;
        let ann = store.create_user("Ann").await.unwrap();
        let movie = store
            .add_movie(
                ann.id,
                NewMovie {
                    title: "Inception".to_string(),
                    year: Some(2010),
                    director: Some("Christopher Nolan".to_string()),
                    poster_url: Some("https://example.com/p.jpg".to_string()),
                },
            )
            .await
            .unwrap();

        let updated = store
            .update_movie(movie.id, MoviePatch { year: Some(2011), ..Default::default() })
            .await
            .unwrap();

        assert_eq!(updated.title, "Inception");
        assert_eq!(updated.year, Some(2011));
        assert_eq!(updated.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(updated.poster_url.as_deref(), Some("https://example.com/p.jpg"));
    }

    #[tokio::test]
    async fn update_rejects_sibling_title_collision() {
        let store = store().await;
        let ann = store.create_user("Ann").await.unwrap();
        store.add_movie(ann.id, titled("Inception")).await.unwrap();
        let other = store.add_movie(ann.id, titled("Arrival")).await.unwrap();

        let err = store
            .update_movie(other.id, MoviePatch {
                title: Some("INCEPTION".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateMovie));

        // Renaming a movie to its own title is not a collision.
        store
            .update_movie(other.id, MoviePatch {
                title: Some("arrival".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_and_delete_missing_movie() {
        let store = store().await;
        let err = store.update_movie(42, MoviePatch::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        let err = store.delete_movie(42).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn movie_without_enrichment_keeps_optional_fields_absent() {
        let store = store().await;
        let bob = store.create_user("Bob").await.unwrap();

        let movie = store.add_movie(bob.id, titled("Arrival")).await.unwrap();
        assert_eq!(movie.title, "Arrival");
        assert_eq!(movie.year, None);
        assert_eq!(movie.director, None);
        assert_eq!(movie.poster_url, None);
    }
}
