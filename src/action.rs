//!

use crate::state::{Page, StatusMessage};

///
#[non_exhaustive]
pub enum Action {
    ///
    SetCurrentPage {
        ///
        page: Page,
    },

    ///
    MenuUp,

    ///
    MenuDown,

    ///
    MenuTop,

    ///
    MenuBottom,

    /// Toggles the highlighted group or follows the highlighted entry.
    MenuActivate,

    ///
    RouteBack,

    ///
    Navigate {
        ///
        path: String,
    },

    ///
    SearchSetValue {
        ///
        value: String,
    },

    ///
    SearchUp,

    ///
    SearchDown,

    ///
    SearchActivate,

    ///
    UserMenuUp,

    ///
    UserMenuDown,

    ///
    UserMenuActivate,

    /// Hands the keys to the content pane when it has its own controls.
    FocusContent,

    ///
    NetworkUp,

    ///
    NetworkDown,

    /// Opens the highlighted request in the detail pane.
    NetworkSelect,

    ///
    NetworkCloseDetail,

    ///
    NetworkNextTab,

    ///
    NetworkCycleMethod,

    ///
    NetworkCycleStatus,

    ///
    NetworkFilterSetValue {
        ///
        value: String,
    },

    ///
    NetworkConnect,

    ///
    NetworkClear,

    ///
    ToggleCollapsed,

    /// The terminal crossed the collapse width.
    Breakpoint {
        ///
        broken: bool,
    },

    ///
    SetStatus {
        ///
        message: StatusMessage,

        ///
        timeout: Option<core::time::Duration>,
    },

    ///
    Tick,
}
