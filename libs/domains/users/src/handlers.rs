use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JwtAuth, JwtClaims, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, require_admin,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, LoginRequest, Role, TokenResponse, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(login, register, me),
    components(
        schemas(CreateUser, LoginRequest, TokenResponse, UserResponse, Role),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Login, registration and the current user")
    )
)]
pub struct ApiDoc;

/// Auth routes, mounted by the app under `/auth`
pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new().route("/login", post(login::<R>));

    let authenticated = Router::new()
        .route("/me", get(me::<R>))
        .route_layer(from_fn_with_state(auth.clone(), jwt_auth_middleware));

    let admin = Router::new()
        .route("/register", post(register::<R>))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(auth, jwt_auth_middleware));

    public
        .merge(authenticated)
        .merge(admin)
        .with_state(shared_service)
}

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<TokenResponse>> {
    let result = service.login(&input.username, &input.password).await;

    let outcome = match &result {
        Ok(_) => AuditOutcome::Success,
        Err(UserError::InvalidCredentials | UserError::Inactive) => AuditOutcome::Denied,
        Err(_) => AuditOutcome::Failure,
    };
    AuditEvent::new("auth.login", outcome)
        .actor(&input.username)
        .with_request_headers(&headers)
        .log();

    Ok(Json(result?))
}

/// Register a new user (admin only)
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = CreateUser,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let username = input.username.clone();
    let result = service.register(input).await;

    let outcome = if result.is_ok() {
        AuditOutcome::Success
    } else {
        AuditOutcome::Failure
    };
    AuditEvent::new("user.register", outcome)
        .actor(&claims.sub)
        .resource(format!("user:{username}"))
        .with_request_headers(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(result?)))
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(claims): Extension<JwtClaims>,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.current_user(&claims.sub).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repository::MockUserRepository;
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use axum_helpers::{ErrorResponse, JwtConfig};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    const SECRET: &str = "users-handler-test-secret-at-least-32";

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
    }

    fn app(mock: MockUserRepository) -> Router {
        router(UserService::new(mock, auth()), auth())
    }

    fn user(username: &str, password: &str, role: Role) -> User {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();
        User::new(username.into(), format!("{username}@example.com"), hash, role)
    }

    fn request(method: &str, uri: &str, role: Option<&str>, body: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            let token = auth().create_access_token("tester", role).unwrap();
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut mock = MockUserRepository::new();
        mock.expect_get_by_username()
            .returning(|name| Ok(Some(user(name, "password1", Role::User))));

        let body = r#"{"username": "ada", "password": "password1"}"#;
        let response = app(mock)
            .oneshot(request("POST", "/login", None, Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let token: TokenResponse = json(response).await;
        assert_eq!(token.token_type, "bearer");
        assert_eq!(auth().verify_token(&token.access_token).unwrap().role, "user");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let mut mock = MockUserRepository::new();
        mock.expect_get_by_username()
            .returning(|name| Ok(Some(user(name, "password1", Role::User))));

        let body = r#"{"username": "ada", "password": "nope"}"#;
        let response = app(mock)
            .oneshot(request("POST", "/login", None, Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = json(response).await;
        assert_eq!(error.message, "Incorrect username or password");
    }

    #[tokio::test]
    async fn test_register_requires_admin() {
        let body = r#"{"username": "newbie", "email": "n@example.com", "password": "password1"}"#;

        let response = app(MockUserRepository::new())
            .oneshot(request("POST", "/register", None, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app(MockUserRepository::new())
            .oneshot(request("POST", "/register", Some("user"), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_register_as_admin() {
        let mut mock = MockUserRepository::new();
        mock.expect_get_by_username().returning(|_| Ok(None));
        mock.expect_email_exists().returning(|_| Ok(false));
        mock.expect_create().times(1).returning(Ok);

        let body = r#"{"username": "newbie", "email": "n@example.com", "password": "password1", "role": "admin"}"#;
        let response = app(mock)
            .oneshot(request("POST", "/register", Some("admin"), Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: UserResponse = json(response).await;
        assert_eq!(created.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_register_duplicate_is_409() {
        let mut mock = MockUserRepository::new();
        mock.expect_get_by_username()
            .returning(|name| Ok(Some(user(name, "password1", Role::User))));

        let body = r#"{"username": "taken", "email": "t@example.com", "password": "password1"}"#;
        let response = app(mock)
            .oneshot(request("POST", "/register", Some("admin"), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_validates_body() {
        let body = r#"{"username": "x", "email": "bad", "password": "short"}"#;
        let response = app(MockUserRepository::new())
            .oneshot(request("POST", "/register", Some("admin"), Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = json(response).await;
        assert!(error.details.is_some());
    }

    #[tokio::test]
    async fn test_me_returns_token_subject() {
        let mut mock = MockUserRepository::new();
        mock.expect_get_by_username()
            .withf(|name| name == "tester")
            .returning(|name| Ok(Some(user(name, "password1", Role::User))));

        let response = app(mock)
            .oneshot(request("GET", "/me", Some("user"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let profile: UserResponse = json(response).await;
        assert_eq!(profile.username, "tester");
    }

    #[tokio::test]
    async fn test_me_without_token_is_401() {
        let response = app(MockUserRepository::new())
            .oneshot(request("GET", "/me", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
