//! Preview controller.
//!
//! Owns the widgets of the file-content area and implements the workflow
//! behind them: a selected file is read, parsed, and fanned out to the two
//! column dropdowns and the preview table; the CRS picker fills the input
//! and output CRS slots; the transform action reports the selection.
//!
//! Widgets are handed in at construction rather than looked up, so tests
//! can build a controller around plain components.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Config, CrsEntry};
use crate::table::{parse_csv, ParsedTable};
use crate::ui::{CrsModal, CrsModalAction, Dropdown, DropdownItem, PreviewTable};

/// Which CRS slot a picker session fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsTarget {
    /// The CRS the coordinates are currently expressed in.
    Input,
    /// The CRS to convert the coordinates to.
    Output,
}

impl CrsTarget {
    /// Display label for the slot.
    pub fn label(&self) -> &'static str {
        match self {
            CrsTarget::Input => "Input",
            CrsTarget::Output => "Output",
        }
    }
}

/// Snapshot of the current selection, as reported by the transform action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub latitude_column: Option<String>,
    pub longitude_column: Option<String>,
    pub input_crs: Option<CrsEntry>,
    pub output_crs: Option<CrsEntry>,
}

/// Drives the file-content area: dropdowns, preview and CRS choices.
#[derive(Debug)]
pub struct PreviewController {
    latitude: Dropdown,
    longitude: Dropdown,
    preview: PreviewTable,
    crs_modal: CrsModal,
    /// Rows shown in the preview.
    preview_rows: usize,
    /// The most recent parse. Replaced wholesale on every load.
    table: Option<ParsedTable>,
    source: Option<PathBuf>,
    input_crs: Option<CrsEntry>,
    output_crs: Option<CrsEntry>,
}

impl PreviewController {
    /// Create a controller around the given widgets.
    pub fn new(
        latitude: Dropdown,
        longitude: Dropdown,
        preview: PreviewTable,
        crs_modal: CrsModal,
        preview_rows: usize,
    ) -> Self {
        Self {
            latitude,
            longitude,
            preview,
            crs_modal,
            preview_rows,
            table: None,
            source: None,
            input_crs: None,
            output_crs: None,
        }
    }

    /// Create a controller with fresh widgets configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut controller = Self::new(
            Dropdown::new("Latitude column"),
            Dropdown::new("Longitude column"),
            PreviewTable::new(),
            CrsModal::new(config.presets()),
            config.settings.preview_rows,
        );
        controller.input_crs = config.default_input_crs();
        controller.output_crs = config.default_output_crs();
        controller
    }

    /// React to a file being chosen.
    ///
    /// Returns the path to read, or `None` when no file was chosen. Reading
    /// happens off the UI loop; the text comes back via
    /// [`PreviewController::on_file_loaded`].
    pub fn handle_file_select(&self, path: Option<&Path>) -> Option<PathBuf> {
        let path = path.filter(|p| !p.as_os_str().is_empty())?;
        debug!(path = %path.display(), "File selected");
        Some(path.to_path_buf())
    }

    /// Parse freshly read text and render it.
    pub fn on_file_loaded(&mut self, path: PathBuf, text: &str) {
        let table = parse_csv(text);
        info!(
            path = %path.display(),
            columns = table.column_count(),
            rows = table.row_count(),
            "File parsed"
        );
        if table.has_ragged_rows() {
            warn!(path = %path.display(), "Rows have a different field count than the header");
        }

        self.update_dropdowns(&table.headers);
        self.display_data_preview(&table);
        self.table = Some(table);
        self.source = Some(path);
    }

    /// Repopulate both column dropdowns with one option per header.
    ///
    /// Previous options are discarded.
    pub fn update_dropdowns(&mut self, headers: &[String]) {
        self.latitude.clear();
        self.longitude.clear();

        for header in headers {
            let option = DropdownItem::from_header(header.as_str());
            self.latitude.push(option.clone());
            self.longitude.push(option);
        }
    }

    /// Show all headers and the first `preview_rows` rows of the table.
    pub fn display_data_preview(&mut self, table: &ParsedTable) {
        self.preview.set_contents(
            &table.headers,
            table.preview(self.preview_rows),
            table.row_count(),
        );
    }

    /// Open the CRS picker to fill `target`.
    pub fn open_crs_modal(&mut self, target: CrsTarget) {
        let current = self.crs(target).cloned();
        self.crs_modal.open(target, current.as_ref());
    }

    /// Apply the outcome of a picker session.
    ///
    /// Returns the chosen CRS and its slot when one was confirmed.
    pub fn handle_crs_action(&mut self, action: CrsModalAction) -> Option<(CrsTarget, &CrsEntry)> {
        match action {
            CrsModalAction::Confirm { target, crs } => {
                self.apply_crs(target, crs);
                self.crs(target).map(|crs| (target, crs))
            }
            CrsModalAction::Cancel => {
                debug!("CRS selection cancelled");
                None
            }
        }
    }

    /// Store a CRS in the given slot.
    pub fn apply_crs(&mut self, target: CrsTarget, crs: CrsEntry) {
        info!(slot = target.label(), crs = %crs, "CRS selected");
        match target {
            CrsTarget::Input => self.input_crs = Some(crs),
            CrsTarget::Output => self.output_crs = Some(crs),
        }
    }

    /// Report the selected columns and CRS choices.
    ///
    /// Nothing is transformed and no state changes; the selection is only
    /// logged and returned.
    pub fn transform_coordinates(&self) -> TransformRequest {
        let request = TransformRequest {
            latitude_column: self.latitude.value().map(str::to_string),
            longitude_column: self.longitude.value().map(str::to_string),
            input_crs: self.input_crs.clone(),
            output_crs: self.output_crs.clone(),
        };

        info!(
            latitude = request.latitude_column.as_deref().unwrap_or(""),
            longitude = request.longitude_column.as_deref().unwrap_or(""),
            input_crs = %display_crs(request.input_crs.as_ref()),
            output_crs = %display_crs(request.output_crs.as_ref()),
            "Transforming coordinates"
        );

        request
    }

    /// Check whether a file has been loaded.
    pub fn is_file_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Get the most recent parse.
    pub fn table(&self) -> Option<&ParsedTable> {
        self.table.as_ref()
    }

    /// Get the path of the loaded file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn latitude(&self) -> &Dropdown {
        &self.latitude
    }

    pub fn latitude_mut(&mut self) -> &mut Dropdown {
        &mut self.latitude
    }

    pub fn longitude(&self) -> &Dropdown {
        &self.longitude
    }

    pub fn longitude_mut(&mut self) -> &mut Dropdown {
        &mut self.longitude
    }

    pub fn preview(&self) -> &PreviewTable {
        &self.preview
    }

    pub fn crs_modal(&self) -> &CrsModal {
        &self.crs_modal
    }

    pub fn crs_modal_mut(&mut self) -> &mut CrsModal {
        &mut self.crs_modal
    }

    /// Get the CRS stored in a slot.
    pub fn crs(&self, target: CrsTarget) -> Option<&CrsEntry> {
        match target {
            CrsTarget::Input => self.input_crs.as_ref(),
            CrsTarget::Output => self.output_crs.as_ref(),
        }
    }
}

fn display_crs(crs: Option<&CrsEntry>) -> String {
    crs.map(ToString::to_string)
        .unwrap_or_else(|| "unset".to_string())
}
