use thiserror::Error;

use crate::model::{EntryError, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
