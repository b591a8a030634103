use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: PasswordHash::new(row.password_hash),
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, email, password_hash, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, status, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some(USERNAME_CONSTRAINT) {
                        return UserError::UsernameAlreadyExists(
                            user.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
                        return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                    }
                }
            }
            database_error(e)
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, status, created_at, updated_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, status, created_at, updated_at
            FROM users
            WHERE (username = $1 OR email = $1) AND deleted_at IS NULL
            ORDER BY (username = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users WHERE username = $1 AND deleted_at IS NULL
            )
            "#,
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL
            )
            "#,
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }
}
