//! CLI runner - executes commands

use crate::catalog::{ProductListDelegate, ProductListViewModel};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::CatalogConfig;
use crate::connectivity::{HostProbe, ReachabilitySource};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::Phase;
use crate::product::{Product, ProductDetails};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        match &self.cli.command {
            Commands::Browse { pages } => self.browse(&config, *pages).await,
            Commands::Show { id } => self.show(&config, *id).await,
        }
    }

    /// Load config from file (or defaults) and apply CLI overrides
    fn load_config(&self) -> Result<CatalogConfig> {
        let mut config = match &self.cli.config {
            Some(path) => CatalogConfig::from_file(path)?,
            None => CatalogConfig::default(),
        };
        if let Some(ref host) = self.cli.host {
            config.api.host = host.clone();
        }
        if let Some(ref token) = self.cli.token {
            config.api.token = token.clone();
        }
        config.validate()?;
        Ok(config)
    }

    /// Wire a view-model to the HTTP client and a progress reporter
    ///
    /// A host probe has no change notifications and a command runs once, so
    /// the session checks reachability up front instead of binding reconnect
    /// retries.
    async fn session(&self, config: &CatalogConfig) -> Result<Session> {
        let client = HttpClient::with_config(HttpClientConfig::from_catalog(config))?;
        let view_model =
            ProductListViewModel::new(Arc::new(client), config.pagination.base_page_size);

        let reporter = Arc::new(ProgressReporter::default());
        view_model.set_delegate(&reporter);

        // Name resolution and connect block, so keep them off the async workers
        let probe = HostProbe::new(&config.api.scheme, &config.api.host, PROBE_TIMEOUT);
        let reachable = tokio::task::spawn_blocking(move || probe.check())
            .await
            .map_err(|e| Error::Other(format!("Reachability check failed: {e}")))?;
        if !reachable {
            warn!("{} looks unreachable; requests may fail", config.api.host);
        }

        Ok(Session {
            view_model,
            reporter,
        })
    }

    /// Load the first page plus up to `pages` follow-up pages
    async fn browse(&self, config: &CatalogConfig, pages: u32) -> Result<()> {
        let session = self.session(config).await?;
        session.load_initial().await?;

        for _ in 0..pages {
            if !session.load_more().await? {
                break;
            }
        }

        let products = session.view_model.products();
        for product in &products {
            self.print_product(product)?;
        }
        info!(
            "Loaded {} products over {} pages ({})",
            products.len(),
            session.view_model.page_index(),
            if session.view_model.has_more() {
                "more available"
            } else {
                "end of catalog"
            }
        );
        Ok(())
    }

    /// Load pages until product `id` shows up
    async fn show(&self, config: &CatalogConfig, id: i64) -> Result<()> {
        let session = self.session(config).await?;
        session.load_initial().await?;

        loop {
            if let Some(product) = session.view_model.product(id) {
                return self.print_details(product);
            }
            if !session.load_more().await? {
                return Err(Error::ProductNotFound { id });
            }
        }
    }

    fn print_product(&self, product: &Product) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                let line = serde_json::to_string(product)
                    .map_err(|e| Error::Other(format!("Failed to serialize product: {e}")))?;
                println!("{line}");
            }
            OutputFormat::Pretty => {
                println!(
                    "{:>5}  {:>10}  {}",
                    product.id(),
                    format!("${:.2}", product.price()),
                    product.title()
                );
            }
        }
        Ok(())
    }

    fn print_details(&self, product: Product) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => self.print_product(&product),
            OutputFormat::Pretty => {
                println!("{}", ProductDetails::new(product));
                Ok(())
            }
        }
    }
}

/// View-model plus the collaborators that must outlive it during a command
struct Session {
    view_model: ProductListViewModel,
    reporter: Arc<ProgressReporter>,
}

impl Session {
    async fn load_initial(&self) -> Result<()> {
        if let Some(task) = self.view_model.load_initial_products() {
            task.await
                .map_err(|e| Error::Other(format!("Load task failed: {e}")))?;
        }
        self.check_failed()
    }

    /// Load one more page; returns false when there is nothing more to load
    async fn load_more(&self) -> Result<bool> {
        let Some(task) = self.view_model.load_more_products_if_possible() else {
            return Ok(false);
        };
        task.await
            .map_err(|e| Error::Other(format!("Load task failed: {e}")))?;
        self.check_failed()?;
        Ok(true)
    }

    fn check_failed(&self) -> Result<()> {
        if self.view_model.phase() == Phase::Failed {
            let message = self
                .reporter
                .take_failure()
                .unwrap_or_else(|| "Loading products failed".to_string());
            return Err(Error::Other(message));
        }
        Ok(())
    }
}

/// Delegate that logs progress and remembers the last failure
#[derive(Default)]
struct ProgressReporter {
    last_failure: Mutex<Option<String>>,
}

impl ProgressReporter {
    fn take_failure(&self) -> Option<String> {
        self.last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl ProductListDelegate for ProgressReporter {
    fn on_products_updated(&self) {
        debug!("Product list updated");
    }

    fn on_loading_started(&self) {
        info!("Loading more products...");
    }

    fn on_loading_stopped(&self) {
        debug!("Finished loading page");
    }

    fn on_load_failed(&self, message: &str) {
        warn!("{}", message);
        *self
            .last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }
}
