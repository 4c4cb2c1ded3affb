pub mod button;
pub mod confirm_button;
pub mod expandable;
pub mod textarea;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use button::*;
pub use confirm_button::*;
pub use expandable::*;
pub use textarea::*;
