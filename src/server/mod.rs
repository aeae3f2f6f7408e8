//! HTTP layer - thin axum surface over the engine
//!
//! All semantics live in the core components; handlers only translate
//! between HTTP and [`crate::Error`]. Caller errors map to 400, the rest
//! to 500.

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::RelationStore;
use crate::taxonomy::TaxonomyIndex;

pub mod routes;

/// Server state
///
/// The taxonomy index is a swap-on-write snapshot: `/initialize` replaces
/// the `Arc` and in-flight requests keep reading the snapshot they
/// already cloned. The store is the single writer-serialized resource.
pub struct AppState {
    pub store: Mutex<RelationStore>,
    pub index: RwLock<Option<Arc<TaxonomyIndex>>>,
    pub catalog_path: PathBuf,
    pub threshold: f32,
}

impl AppState {
    /// Clone the current index snapshot, if initialized
    pub fn index_snapshot(&self) -> Option<Arc<TaxonomyIndex>> {
        self.index
            .read()
            .expect("taxonomy index lock poisoned")
            .clone()
    }
}

pub async fn start_server(
    port: u16,
    database_path: PathBuf,
    catalog_path: PathBuf,
    threshold: f32,
) -> anyhow::Result<()> {
    let store = RelationStore::open(&database_path)?;
    let state = Arc::new(AppState {
        store: Mutex::new(store),
        index: RwLock::new(None),
        catalog_path,
        threshold,
    });

    let app = Router::new()
        .route("/", get(routes::welcome))
        .route("/initialize", post(routes::initialize))
        .route("/competency", get(routes::list_competencies))
        .route("/course", get(routes::list_courses))
        .route(
            "/competency/{key}",
            get(routes::competencies_by_course).post(routes::create_competency),
        )
        .route(
            "/course/{key}",
            get(routes::courses_by_competency).post(routes::create_course),
        )
        .route("/course/{key}/extract", post(routes::extract_course))
        .route("/courseCompetency", post(routes::link_course_competency))
        .route("/stats", get(routes::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
