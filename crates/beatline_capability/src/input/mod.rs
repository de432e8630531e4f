//! Input providers.

mod choice_click;
mod composite;
mod text_entry;

pub use choice_click::ChoiceClickProvider;
pub use composite::CompositeInputProvider;
pub use text_entry::TextEntryProvider;
