use crate::{
    auth::{
        hash_password, verify_password, AuthResponse, SigninRequest, SignupRequest, TokenProvider,
    },
    error::AppError,
    models::{ParseRoleError, Role, User},
};
use actix_web::{post, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Postgres SQLSTATE for unique_violation.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Register a new account.
///
/// New accounts always start with the `USER` role.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;

    let existing = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM users WHERE email = $1")
        .bind(&signup_data.email)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password_hash = hash_password(&signup_data.password)?;
    let user = User::new(signup_data.email.clone(), password_hash);

    let inserted = sqlx::query(
        "INSERT INTO users (id, email, password_hash, role, joined_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role.as_str())
    .bind(user.joined_at)
    .execute(&**pool)
    .await;

    // A concurrent signup can slip past the pre-check; the unique constraint
    // on email still answers with the same 400.
    if let Err(e) = inserted {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                return Err(AppError::BadRequest("Email already registered".into()));
            }
        }
        return Err(e.into());
    }

    log::info!("user registered: {}", user.email);

    Ok(HttpResponse::Created().json(json!({
        "id": user.id,
        "email": user.email,
        "role": user.role
    })))
}

/// Sign in with email and password; answers with a signed token.
///
/// Unknown email and wrong password are indistinguishable to the caller.
#[post("/signin")]
pub async fn signin(
    pool: web::Data<PgPool>,
    token_provider: web::Data<TokenProvider>,
    signin_data: web::Json<SigninRequest>,
) -> Result<impl Responder, AppError> {
    signin_data.validate()?;

    let row = sqlx::query_as::<_, (Uuid, String, String, String, DateTime<Utc>)>(
        "SELECT id, email, password_hash, role, joined_at FROM users WHERE email = $1",
    )
    .bind(&signin_data.email)
    .fetch_optional(&**pool)
    .await?;

    let Some((id, email, password_hash, role, joined_at)) = row else {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(&signin_data.password, &password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    // A role column outside the closed set means corrupt data, not a client error.
    let role = role
        .parse::<Role>()
        .map_err(|e: ParseRoleError| AppError::Internal(e.to_string()))?;

    let user = User {
        id,
        email,
        password_hash,
        role,
        joined_at,
    };
    let token = token_provider.create_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        email: user.email,
        role: user.role,
    }))
}
