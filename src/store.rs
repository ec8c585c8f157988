//! Ordered marker list backed by the config file.
//!
//! Every mutation is followed by a full save. Out-of-range indices are
//! ignored without touching the list or the file.

use crate::config::{ConfigFile, GeneralSettings, OverlayConfig, Result};
use crate::logging::LogContext;
use crate::marker::MarkerRecord;

pub struct MarkerStore {
    file: ConfigFile,
    config: OverlayConfig,
}

impl MarkerStore {
    /// Loads the file (falling back to an empty list) and adopts its debug
    /// flag for all further logging.
    pub fn open(file: ConfigFile) -> Self {
        let config = file.load();
        Self::with_config(file, config)
    }

    /// Uses `config` as the current state without reading the file.
    pub fn with_config(file: ConfigFile, config: OverlayConfig) -> Self {
        let log = file.codec().log().with_debug(config.settings.debug);
        log.info(format_args!("debug mode: {}", config.settings.debug));
        Self {
            file: file.with_log(log),
            config,
        }
    }

    pub fn log(&self) -> LogContext {
        *self.file.codec().log()
    }

    pub fn file(&self) -> &ConfigFile {
        &self.file
    }

    pub fn settings(&self) -> GeneralSettings {
        self.config.settings
    }

    pub fn markers(&self) -> &[MarkerRecord] {
        &self.config.markers
    }

    /// Owned copy of the current list, in display order.
    pub fn snapshot(&self) -> Vec<MarkerRecord> {
        self.config.markers.clone()
    }

    pub fn get(&self, index: usize) -> Option<&MarkerRecord> {
        self.config.markers.get(index)
    }

    pub fn len(&self) -> usize {
        self.config.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.markers.is_empty()
    }

    pub fn add(&mut self, record: MarkerRecord) {
        self.log().info(format_args!(
            "adding marker: {}, type: {}, pos: ({}, {})",
            record.name, record.kind, record.position.x, record.position.y
        ));
        self.config.markers.push(record);
        self.persist();
    }

    /// Returns whether a record was removed.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.config.markers.len() {
            self.log()
                .debug(format_args!("remove_at({index}) out of range, ignored"));
            return false;
        }
        let removed = self.config.markers.remove(index);
        self.log()
            .info(format_args!("removed marker {index}: {}", removed.name));
        self.persist();
        true
    }

    /// Swaps in `record` as a whole. Returns whether the index existed.
    pub fn replace_at(&mut self, index: usize, record: MarkerRecord) -> bool {
        let Some(slot) = self.config.markers.get_mut(index) else {
            self.log()
                .debug(format_args!("replace_at({index}) out of range, ignored"));
            return false;
        };
        *slot = record;
        self.log()
            .info(format_args!("updated marker {index}: {}", self.config.markers[index].name));
        self.persist();
        true
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.settings.debug = debug;
        let log = self.log().with_debug(debug);
        self.file = self.file.clone().with_log(log);
        self.persist();
    }

    /// Writes the current state, reporting failure to the caller.
    pub fn save(&self) -> Result<()> {
        self.log().debug(format_args!(
            "saving {} markers to {}",
            self.config.markers.len(),
            self.file.path().display()
        ));
        self.file.save(&self.config)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            self.log().error(format_args!("error saving configuration: {e}"));
        }
    }
}
