use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use warbler::bootstrap::app_context::{AppContext, AppServices};
use warbler::bootstrap::config::Config;
use warbler::infrastructure::db::repositories::{
    follows_repository_sqlx::SqlxFollowsRepository, likes_repository_sqlx::SqlxLikesRepository,
    message_repository_sqlx::SqlxMessageRepository, session_repository_sqlx::SqlxSessionRepository,
    user_repository_sqlx::SqlxUserRepository,
};

#[derive(OpenApi)]
#[openapi(
        paths(
            warbler::presentation::http::home::homepage,
            warbler::presentation::http::auth::signup_form,
            warbler::presentation::http::auth::signup,
            warbler::presentation::http::auth::login_form,
            warbler::presentation::http::auth::login,
            warbler::presentation::http::auth::logout,
            warbler::presentation::http::users::list_users,
            warbler::presentation::http::users::show_user,
            warbler::presentation::http::users::show_following,
            warbler::presentation::http::users::show_followers,
            warbler::presentation::http::users::show_likes,
            warbler::presentation::http::users::follow_user,
            warbler::presentation::http::users::stop_following,
            warbler::presentation::http::users::edit_profile_form,
            warbler::presentation::http::users::edit_profile,
            warbler::presentation::http::users::delete_user,
            warbler::presentation::http::likes::add_like,
            warbler::presentation::http::messages::create_message,
            warbler::presentation::http::messages::show_message,
            warbler::presentation::http::messages::delete_message,
            warbler::presentation::http::health::health,
        ),
        components(schemas(
            warbler::presentation::http::auth::FormResponse,
            warbler::presentation::http::auth::MessageResponse,
            warbler::presentation::http::auth::SignupRequest,
            warbler::presentation::http::auth::LoginRequest,
            warbler::presentation::http::auth::LoginResponse,
            warbler::presentation::http::users::UserSummary,
            warbler::presentation::http::users::UserDetail,
            warbler::presentation::http::users::AccountResponse,
            warbler::presentation::http::users::UserListResponse,
            warbler::presentation::http::users::ProfileResponse,
            warbler::presentation::http::users::ConnectionsResponse,
            warbler::presentation::http::users::LikesResponse,
            warbler::presentation::http::users::EditProfileForm,
            warbler::presentation::http::users::EditProfileBody,
            warbler::presentation::http::users::EditProfileResponse,
            warbler::presentation::http::likes::LikeResponse,
            warbler::presentation::http::messages::MessageItem,
            warbler::presentation::http::messages::MessageDetail,
            warbler::presentation::http::messages::CreateMessageRequest,
            warbler::presentation::http::home::HomeResponse,
            warbler::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Home", description = "Timeline"),
            (name = "Auth", description = "Signup, login and logout"),
            (name = "Users", description = "Profiles and follows"),
            (name = "Messages", description = "Warbles"),
            (name = "Likes", description = "Liking warbles"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn build_cors(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        _ if cfg.is_production => {
            // In production, FRONTEND_URL is mandatory (enforced by Config), so deny all
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
                .allow_methods(methods)
                .allow_headers(headers)
        }
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "warbler=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(port = cfg.api_port, production = cfg.is_production, "Starting Warbler");

    // Database
    let pool = warbler::infrastructure::db::connect_pool(&cfg.database_url).await?;
    warbler::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxUserRepository::new(pool.clone())),
        Arc::new(SqlxMessageRepository::new(pool.clone())),
        Arc::new(SqlxFollowsRepository::new(pool.clone())),
        Arc::new(SqlxLikesRepository::new(pool.clone())),
        Arc::new(SqlxSessionRepository::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .merge(warbler::presentation::http::router(ctx))
        .nest(
            "/api",
            warbler::presentation::http::health::routes(pool.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(build_cors(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%addr, "HTTP listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Warbler stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
}
