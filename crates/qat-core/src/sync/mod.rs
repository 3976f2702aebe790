//! Sync orchestrator: wires the transfer client, catalog, and materializer
//! into the three user-facing flows.
//!
//! - Upload: read local file, POST it, then refresh the catalog. A failed
//!   upload does not refresh.
//! - Refresh: GET the feed and replace the catalog; on failure the previous
//!   catalog stays.
//! - Download: GET the asset and materialize it. Works on the `AssetInfo`
//!   snapshot it was given, never on the live catalog.
//!
//! Each flow is an async method returning a typed result and also reports
//! through the event channel. `dispatch` runs a flow fire-and-forget.
//! Flows suspend only on network calls; file I/O and parsing for downloads
//! run on blocking workers.

mod error;
mod event;

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use error::{FailureKind, SyncError};
pub use event::{Operation, SyncCommand, SyncEvent};

use crate::catalog::{AssetCatalog, AssetInfo, CatalogRepository};
use crate::config::QatConfig;
use crate::materialize::{
    CommandImporter, DownloadResult, MaterializationOutcome, Materializer, NoImporter,
    PackageImporter, WorkspaceLayout,
};
use crate::transfer::TransferClient;

/// Remote endpoints the orchestrator talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub fetch_url: String,
    pub upload_url: String,
}

impl From<&QatConfig> for Endpoints {
    fn from(cfg: &QatConfig) -> Self {
        Self {
            fetch_url: cfg.fetch_url.clone(),
            upload_url: cfg.upload_url.clone(),
        }
    }
}

/// Result of a successful upload. The follow-up refresh may still fail.
#[derive(Debug)]
pub struct UploadReport {
    pub file_name: String,
    pub refresh: Result<Arc<AssetCatalog>, SyncError>,
}

struct Inner {
    endpoints: Endpoints,
    transfer: TransferClient,
    catalog: CatalogRepository,
    materializer: Materializer,
    query: RwLock<String>,
    events: mpsc::UnboundedSender<SyncEvent>,
}

/// Cheap to clone; clones share the catalog, query, and event channel.
#[derive(Clone)]
pub struct SyncOrchestrator {
    inner: Arc<Inner>,
}

impl SyncOrchestrator {
    /// Orchestrator plus the receiving end of its event channel.
    pub fn new(
        endpoints: Endpoints,
        transfer: TransferClient,
        materializer: Materializer,
    ) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let inner = Inner {
            endpoints,
            transfer,
            catalog: CatalogRepository::new(),
            materializer,
            query: RwLock::new(String::new()),
            events: tx,
        };
        (
            Self {
                inner: Arc::new(inner),
            },
            rx,
        )
    }

    /// Orchestrator using libcurl and the importer named in `cfg`.
    pub fn from_config(
        cfg: &QatConfig,
        workspace: impl Into<PathBuf>,
    ) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let transfer = TransferClient::with_curl(cfg.transfer_or_default());
        let importer: Arc<dyn PackageImporter> =
            match cfg.import_command.clone().and_then(CommandImporter::new) {
                Some(cmd) => Arc::new(cmd),
                None => Arc::new(NoImporter),
            };
        let materializer = Materializer::new(WorkspaceLayout::new(workspace), importer)
            .with_package_extensions(&cfg.package_extensions);
        Self::new(Endpoints::from(cfg), transfer, materializer)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        self.inner.materializer.layout()
    }

    pub fn catalog(&self) -> Arc<AssetCatalog> {
        self.inner.catalog.snapshot()
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let mut guard = self.inner.query.write().unwrap_or_else(PoisonError::into_inner);
        *guard = query.into();
    }

    pub fn search_query(&self) -> String {
        self.inner
            .query
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Catalog filtered by the active query, recomputed on every call.
    pub fn current_filtered_view(&self) -> Vec<AssetInfo> {
        self.inner.catalog.search(&self.search_query())
    }

    /// Asset with exactly this name in the current catalog.
    pub fn find_asset(&self, name: &str) -> Option<AssetInfo> {
        self.inner.catalog.find(name)
    }

    /// Run a command without waiting for it. `SetSearchQuery` applies
    /// immediately and returns None; the others return the spawned task.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, command: SyncCommand) -> Option<JoinHandle<()>> {
        let this = self.clone();
        match command {
            SyncCommand::SetSearchQuery(query) => {
                self.set_search_query(query);
                None
            }
            SyncCommand::Upload(path) => Some(tokio::spawn(async move {
                let _ = this.upload(&path).await;
            })),
            SyncCommand::RefreshCatalog => Some(tokio::spawn(async move {
                let _ = this.refresh().await;
            })),
            SyncCommand::Download(asset) => Some(tokio::spawn(async move {
                let _ = this.download(asset).await;
            })),
        }
    }

    /// Upload a local file, then refresh so the catalog lists it.
    pub async fn upload(&self, path: &Path) -> Result<UploadReport, SyncError> {
        let result = self.upload_inner(path).await;
        let file_name = match result {
            Ok(name) => name,
            Err(e) => {
                tracing::error!("upload of {} failed: {}", path.display(), e);
                self.report_failure(Operation::Upload, &e);
                return Err(e);
            }
        };

        tracing::info!("upload successful: {}", file_name);
        self.emit(SyncEvent::OperationSucceeded {
            operation: Operation::Upload,
            summary: format!("uploaded {}", file_name),
        });

        let refresh = self.refresh().await;
        Ok(UploadReport { file_name, refresh })
    }

    async fn upload_inner(&self, path: &Path) -> Result<String, SyncError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SyncError::LocalRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no file name",
                ),
            })?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| SyncError::LocalRead {
                path: path.to_path_buf(),
                source,
            })?;

        self.inner
            .transfer
            .upload(&self.inner.endpoints.upload_url, bytes, &file_name)
            .await?;
        Ok(file_name)
    }

    /// Fetch the feed and replace the catalog. The previous catalog is kept on any failure.
    pub async fn refresh(&self) -> Result<Arc<AssetCatalog>, SyncError> {
        match self.refresh_inner().await {
            Ok(catalog) => {
                self.emit(SyncEvent::CatalogUpdated(Arc::clone(&catalog)));
                Ok(catalog)
            }
            Err(e) => {
                tracing::error!("failed to refresh catalog: {}", e);
                self.report_failure(Operation::Refresh, &e);
                Err(e)
            }
        }
    }

    async fn refresh_inner(&self) -> Result<Arc<AssetCatalog>, SyncError> {
        let raw = self
            .inner
            .transfer
            .fetch(&self.inner.endpoints.fetch_url)
            .await?;
        Ok(self.inner.catalog.refresh(&raw)?)
    }

    /// Download one asset and materialize it into the workspace.
    pub async fn download(&self, asset: AssetInfo) -> Result<MaterializationOutcome, SyncError> {
        let name = asset.name.clone();
        match self.download_inner(asset).await {
            Ok(outcome) => {
                self.emit(SyncEvent::OperationSucceeded {
                    operation: Operation::Download,
                    summary: format!("{}: {}", name, outcome),
                });
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("download of {} failed: {}", name, e);
                self.report_failure(Operation::Download, &e);
                Err(e)
            }
        }
    }

    async fn download_inner(&self, asset: AssetInfo) -> Result<MaterializationOutcome, SyncError> {
        let bytes = self.inner.transfer.download(&asset.url).await?;
        tracing::debug!("downloaded {} ({} bytes)", asset.name, bytes.len());

        let inner = Arc::clone(&self.inner);
        let download = DownloadResult { asset, bytes };
        let outcome = tokio::task::spawn_blocking(move || {
            inner.materializer.materialize_download(download)
        })
        .await
        .map_err(|e| SyncError::TaskJoin(e.to_string()))??;
        Ok(outcome)
    }

    fn report_failure(&self, operation: Operation, e: &SyncError) {
        self.emit(SyncEvent::OperationFailed {
            operation,
            kind: e.failure_kind(),
            message: e.to_string(),
        });
    }

    fn emit(&self, event: SyncEvent) {
        // A closed channel only means the shell stopped listening.
        let _ = self.inner.events.send(event);
    }
}
