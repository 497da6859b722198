pub mod traits;
pub mod error;
pub mod state;
pub mod domain;
pub mod app;
pub mod ui;

// Export collaborator interfaces
pub use traits::{
    params, ClipboardSource, CommandExecutor, CommandId, DocumentId, LayerFlag, LayerId,
    LayerKind, LayerTree, Params, PopupKind, PopupMenus, PreferencesStore, TagId, TagInfo,
};

// Export errors
pub use error::{TimelineError, TimelineResult};

// Export interaction state
pub use state::{
    Bounds, Hit, HitPart, Invalidation, Range, RangeType, TimelineConfig, TimelineState,
};

// Export drag results
pub use domain::drag::{DropOp, DropPlace, DropRequest};

// Export settings
pub use app::{OnionskinPrefs, SettingsCoordinator, ONIONSKIN_KEY, TIMELINE_CONFIG_KEY};

// Export the widget
pub use ui::input::egui_bridge::collect_events;
pub use ui::{SiteLock, Timeline, TimelineEvent, TimelineHost};
