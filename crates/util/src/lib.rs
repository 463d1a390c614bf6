//! Filesystem-facing helpers shared by the Gallery binaries: settings
//! persistence, dataset file loading and config-directory paths.

pub mod dataset_file;
pub mod path_processing;
pub mod settings;

pub use dataset_file::{DatasetFileError, load_dataset, read_dataset};
pub use path_processing::{LOG_PATH_ENV, app_config_dir, default_log_path, expand_tilde};
pub use settings::{SETTINGS_PATH_ENV, SettingsError, SettingsPayload, UserSettings};
