pub mod drafts;
pub mod drawer;
pub mod formatting;
pub mod input;
pub mod interaction;
pub mod journal;
pub mod render;
pub mod session;
pub mod shortcuts;
pub mod sidebar;
pub mod timer;

pub use drafts::{DraftService, Platform, SimulatedDraftService};
pub use drawer::{DrawerView, drawer_view};
pub use input::{InputEvent, Modifiers};
pub use interaction::{CanvasMutation, InteractionController};
pub use journal::{GenerationStatus, JournalConfig, JournalEditor, SaveStatus, SubmitError};
pub use render::{RenderFrame, RenderSurface};
pub use session::CanvasSession;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use sidebar::SidebarComposer;
