use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    serve::Serve,
    Json, Router,
};

use redis::{Client, RedisResult};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::{AuthAPIError, ProjectAPIError, TeamAPIError};
pub mod routes;
use crate::utils::tracing::*;
use routes::{
    applications::{apply, get_applications},
    health_check,
    members::{
        get_categories, get_members_by_type, new_category,
        upload_member_images,
    },
    projects::{generate_marketing_image, get_projects, new_project},
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn auth_error_parts(error: &AuthAPIError) -> (StatusCode, String) {
    match error {
        AuthAPIError::MissingToken => {
            (StatusCode::BAD_REQUEST, "Missing token".to_string())
        }
        AuthAPIError::InvalidToken => {
            (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
        }
        AuthAPIError::UnexpectedError(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected error".to_string(),
        ),
    }
}

impl IntoResponse for TeamAPIError {
    fn into_response(self) -> Response {
        if let TeamAPIError::FieldValidationError(errors) = &self {
            log_error_chain(&self, Level::DEBUG);
            let body = Json(serde_json::json!({ "errors": errors.as_map() }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = match &self {
            TeamAPIError::AuthenticationError(auth_error) => {
                log_error_chain(&self, Level::DEBUG);
                auth_error_parts(auth_error)
            }
            TeamAPIError::LookupError(_) => {
                log_error_chain(&self, Level::ERROR);
                (StatusCode::BAD_REQUEST, "Member lookup failed".to_string())
            }
            TeamAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"))
            }
            TeamAPIError::FieldValidationError(_) => unreachable!(),
            TeamAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

impl IntoResponse for ProjectAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ProjectAPIError::AuthenticationError(auth_error) => {
                log_error_chain(&self, Level::DEBUG);
                auth_error_parts(auth_error)
            }
            ProjectAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"))
            }
            ProjectAPIError::UpstreamError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream service error".to_string(),
                )
            }
            ProjectAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origins = [
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
            "https://cogito-ntnu.no".parse()?,
        ];

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/members-by-type/", get(get_members_by_type))
            .route("/member/image", post(upload_member_images))
            .route(
                "/member/category",
                get(get_categories).post(new_category),
            )
            .route("/apply/", post(apply))
            .route("/applications/", get(get_applications))
            .route("/projects/", get(get_projects).post(new_project))
            .route("/projects/marketing-ai/", post(generate_marketing_image))
            .route("/health-check/", get(health_check))
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

#[allow(dead_code)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}

pub fn get_redis_client(redis_hostname: String) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
