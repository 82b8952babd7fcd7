/// Warden Server - token-based authentication service
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warden_core::Storage;
use warden_server::{
    api, middleware,
    services::AuthService,
    state::AppState,
    validate, ServerConfig,
};
use warden_storage::Database;

#[derive(Parser)]
#[command(name = "warden-server")]
#[command(about = "Warden token authentication server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warden_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser {
            name,
            email,
            password,
        } => {
            add_user(&name, &email, &password).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Warden Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Arc::new(Database::new(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    // Initialize auth service
    let auth = Arc::new(AuthService::new(
        config.auth.token_expiry_days,
        config.auth.token_abilities.clone(),
    ));
    tracing::info!("Auth service initialized");

    // Build application state and router
    let app_state = AppState::new(db, auth);
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/profile", get(api::account::profile))
        .route("/logout", get(api::account::logout))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth_middleware,
        ));

    // Combine routes
    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn add_user(name: &str, email: &str, password: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() || password.is_empty() {
        anyhow::bail!("Name and password must not be empty");
    }
    if !validate::is_valid_email(email) {
        anyhow::bail!("Invalid email address: {email}");
    }

    let config = ServerConfig::load()?;
    config.validate()?;

    let db = Database::new(&config.storage.database_url).await?;
    let auth = AuthService::new(
        config.auth.token_expiry_days,
        config.auth.token_abilities.clone(),
    );

    let password_hash = auth.hash_password(password)?;
    let user = db.create_user(name, email, &password_hash).await?;

    println!("Created user {} <{}> (id {})", user.name, user.email, user.id);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    let db = Database::new(&config.storage.database_url).await?;
    let users = db.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}
