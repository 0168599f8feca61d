mod entry_vm;
mod settings_vm;

pub use entry_vm::{EntryRowVm, ReaderControlsVm, map_entry_rows, reader_controls};
pub use settings_vm::{SettingsFormVm, SettingsInputError, apply_settings_form, map_settings_form};
