mod reader;
mod settings;

pub use reader::ReaderView;
pub use settings::SettingsView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
