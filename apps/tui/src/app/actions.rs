use color_eyre::eyre::eyre;
use color_eyre::Result;
use log::{info, warn};
use vinos_ibericos::config::AppConfig;
use vinos_ibericos::db::{BodegaManager, BodegaRecord, FieldMap};
use vinos_ibericos::domain::Location;
use vinos_ibericos::map::{FileMapSink, MapPlan, MapRenderer, MapSink};

/// Side effects of the application: database access and map output.
#[derive(Debug)]
pub struct AppActions {
    pub manager: Option<BodegaManager>,
    pub renderer: MapRenderer,
    pub sink: FileMapSink,
    database_url: String,
}

impl AppActions {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            manager: None,
            renderer: MapRenderer::new(config.map.clone()),
            sink: FileMapSink::new(&config.map_output),
            database_url: config.database_url.clone(),
        }
    }

    pub async fn initialize(&mut self) -> Result<()> {
        self.manager = Some(BodegaManager::connect(&self.database_url).await?);
        Ok(())
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn manager(&self) -> Result<&BodegaManager> {
        self.manager
            .as_ref()
            .ok_or_else(|| eyre!("Database not initialized"))
    }

    pub async fn add_bodega(&self, data: &FieldMap) -> Result<i64> {
        let manager = self.manager()?;
        Ok(manager.add(data).await?)
    }

    pub async fn fetch_bodegas(&self) -> Result<Vec<BodegaRecord>> {
        let manager = self.manager()?;
        manager.get_all().await.map_err(Into::into)
    }

    pub async fn get_bodega(&self, id: i64) -> Result<Option<BodegaRecord>> {
        let manager = self.manager()?;
        manager.get(id).await.map_err(Into::into)
    }

    pub async fn delete_bodega(&self, id: i64) -> Result<bool> {
        let manager = self.manager()?;
        manager.delete(id).await.map_err(Into::into)
    }

    pub async fn count_bodegas(&self) -> Result<i64> {
        let manager = self.manager()?;
        manager.count().await.map_err(Into::into)
    }

    /// Renders the map for `filter` and hands it to the sink.
    ///
    /// The plan is returned even when the sink fails, so callers can keep
    /// describing the current selection.
    pub fn show_map(
        &mut self,
        locations: &[Location],
        filter: Option<&str>,
    ) -> (MapPlan, Result<()>) {
        let plan = self.renderer.plan(locations, filter);
        let html = self.renderer.to_html(&plan);
        let written = self.sink.show(&html).map_err(|e| {
            warn!("Failed to write map to {}: {e}", self.sink.path().display());
            eyre!("Failed to write map: {e}")
        });
        (plan, written)
    }

    pub fn open_map(&self) -> Result<()> {
        self.sink
            .open_in_browser()
            .map_err(|e| eyre!("Failed to open map: {e}"))?;
        info!("Opened map {}", self.sink.path().display());
        Ok(())
    }

    pub fn open_external(target: &str) -> Result<()> {
        webbrowser::open(target).map_err(|e| {
            warn!("Failed to open {target}: {e}");
            eyre!("Failed to open {target}: {e}")
        })?;
        info!("Opened {target}");
        Ok(())
    }
}
