use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::User;

/// Storage operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. A duplicate email is a storage failure.
    async fn create(&self, user: &User) -> Result<(), AppError>;

    /// Returns the user registered with `email`, or `AppError::NotFound`.
    async fn find_by_email(&self, email: &str) -> Result<User, AppError>;
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<(), AppError> {
        sqlx::query("INSERT INTO users (id, name, email, password) VALUES (?, ?, ?, ?)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("SELECT id, name, email, password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;

    async fn repository() -> SqliteUserRepository {
        let pool = database::connect_in_memory().await.unwrap();
        database::migrate(&pool).await.unwrap();
        SqliteUserRepository::new(pool)
    }

    #[actix_rt::test]
    async fn test_create_and_find_by_email() {
        let repo = repository().await;
        let user = User::with_cost("John", "j@j.com", "123456", 4).unwrap();

        repo.create(&user).await.unwrap();
        let found = repo.find_by_email("j@j.com").await.unwrap();

        assert_eq!(found.id, user.id);
        assert_eq!(found.name, "John");
        assert_eq!(found.password, user.password);
        assert_ne!(found.password, "123456");
        assert!(found.validate_password("123456"));
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_storage_error() {
        let repo = repository().await;
        let first = User::with_cost("John", "j@j.com", "123456", 4).unwrap();
        let second = User::with_cost("Jane", "j@j.com", "abcdef", 4).unwrap();

        repo.create(&first).await.unwrap();
        assert!(matches!(
            repo.create(&second).await,
            Err(AppError::Storage(_))
        ));
    }

    #[actix_rt::test]
    async fn test_unknown_email_is_not_found() {
        let repo = repository().await;
        assert!(matches!(
            repo.find_by_email("nobody@example.com").await,
            Err(AppError::NotFound(_))
        ));
    }
}
