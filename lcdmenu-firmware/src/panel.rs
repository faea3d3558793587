//! Panel settings generated from panel.toml by build.rs

use lcdmenu_core::PanelConfig;

include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));

/// Controller configuration for the attached panel
pub const PANEL: PanelConfig = PanelConfig::new(PANEL_COLS, PANEL_ROWS).with_debounce(DEBOUNCE_MS);
