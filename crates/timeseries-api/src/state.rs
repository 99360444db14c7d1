use timeseries_core::config::DatasetCatalog;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub catalog: DatasetCatalog,
}

impl AppState {
    pub fn new(catalog: DatasetCatalog) -> Self {
        Self { catalog }
    }
}
