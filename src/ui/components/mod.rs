//! Reusable UI components.

mod crs_modal;
mod dropdown;
mod help_bar;
mod input;
mod notification;
mod preview_table;

pub use crs_modal::{centered_rect, CrsModal, CrsModalAction};
pub use dropdown::{Dropdown, DropdownAction, DropdownItem};
pub use help_bar::render_context_help;
pub use input::TextInput;
pub use notification::{Notification, NotificationKind, NotificationManager};
pub use preview_table::PreviewTable;
