use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryJobArchive, InMemoryTradieDirectory};
use crate::routes::with_workflow_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tradescout::config::AppConfig;
use tradescout::error::AppError;
use tradescout::telemetry;
use tradescout::workflows::analysis::JobAnalyzer;
use tradescout::workflows::documents::StaticDocumentLibrary;
use tradescout::workflows::ingest::{ArchiveImporter, DirectoryImporter};
use tradescout::workflows::matching::MatchRanker;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = match args.tradies_csv.take() {
        Some(path) => {
            let profiles = DirectoryImporter::from_path(&path)?;
            info!(profiles = profiles.len(), path = %path.display(), "hydrated directory from CSV");
            InMemoryTradieDirectory::new(profiles)
        }
        None => InMemoryTradieDirectory::seeded(),
    };
    let archive = match args.jobs_csv.take() {
        Some(path) => {
            let jobs = ArchiveImporter::from_path(&path)?;
            info!(jobs = jobs.len(), path = %path.display(), "hydrated job archive from CSV");
            InMemoryJobArchive::new(jobs)
        }
        None => InMemoryJobArchive::seeded(),
    };

    let ranker = Arc::new(MatchRanker::new(Arc::new(directory)));
    let analyzer = Arc::new(JobAnalyzer::new(Arc::new(archive)));
    let documents = Arc::new(StaticDocumentLibrary::builtin());

    let app = with_workflow_routes(ranker, analyzer, documents)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tradie matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
