pub(crate) mod parsing;
pub(crate) mod secret;
pub(crate) mod settings;
pub(crate) mod types;

pub(crate) use types::Settings;
