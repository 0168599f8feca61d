mod entry;
mod ids;
mod settings;

pub use entry::{Entry, EntryDraft, EntryError};
pub use ids::{EntryId, EntryIdGenerator, ParseIdError};
pub use settings::{Pacing, PlaybackSettings, SettingsError, UtteranceStyle};
