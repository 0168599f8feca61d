#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod parser;
pub mod plan;
pub mod store;

pub use error::Error;
pub use model::{
    Entry, EntryDraft, EntryError, EntryId, EntryIdGenerator, Pacing, PlaybackSettings,
    SettingsError, UtteranceStyle,
};
pub use parser::{ParseOutcome, parse, parse_single};
pub use plan::{PlaybackPlan, PlaybackStep, Steps};
pub use store::EntryList;
