use std::path::PathBuf;

use anyhow::{anyhow, Result};
use config::{Config, Environment, File};
use rusty_money::iso::{self, Currency};
use scale_core::{starter_goods, Catalog, GoodSeed, Mode};
use serde::Deserialize;

use crate::CLIENT_NAME;

const CONFIG_NAME: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// ISO 4217 code of the currency prices are quoted in.
    pub currency: String,
    /// Calculation mode the calculator starts in.
    pub mode: String,
    /// Replaces the starter catalog when not empty.
    #[serde(default)]
    pub goods: Vec<GoodSeed>,
}

impl Settings {
    pub fn new(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        let path = match config_path {
            Some(path) => path.to_string(),
            None => default_config_path(),
        };

        Config::builder()
            .set_default("currency", "INR")?
            .set_default("mode", "price")?
            .add_source(File::with_name(&path).required(config_path.is_some()))
            .add_source(Environment::with_prefix("SHOPSCALE"))
            .build()?
            .try_deserialize()
    }

    pub fn currency(&self) -> Result<&'static Currency> {
        iso::find(&self.currency.to_uppercase())
            .ok_or_else(|| anyhow!("unknown currency code {:?}", self.currency))
    }

    pub fn mode(&self) -> Result<Mode> {
        Ok(self.mode.parse::<Mode>()?)
    }

    pub fn catalog(&self) -> Catalog {
        if self.goods.is_empty() {
            Catalog::with_goods(starter_goods())
        } else {
            Catalog::with_goods(self.goods.clone())
        }
    }
}

pub(crate) fn default_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
        .join(CLIENT_NAME)
        .join(CONFIG_NAME)
        .display()
        .to_string()
}
