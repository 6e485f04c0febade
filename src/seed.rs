use std::{fs, path::Path};

use crate::{
    error::{CatalogError, Result},
    model::MovieRecord,
};

const BUNDLED_SEED: &str = include_str!("../resources/seed.json");

pub fn bundled_seed() -> Result<Vec<MovieRecord>> {
    parse_seed(BUNDLED_SEED)
}

pub fn load_seed_file(path: &Path) -> Result<Vec<MovieRecord>> {
    let content = fs::read_to_string(path)?;
    let seed = parse_seed(&content)?;
    log::info!("Loaded {} seed movies from {}", seed.len(), path.display());
    Ok(seed)
}

pub fn parse_seed(json: &str) -> Result<Vec<MovieRecord>> {
    serde_json::from_str(json).map_err(CatalogError::InvalidSeed)
}
