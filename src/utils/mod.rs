pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ConverterError, ConverterResult};
pub use validation::{validate_settings, validate_batch_settings, validate_input_file};
pub use formats::{
    InputFormat,
    SupportedFormats,
    DEFAULT_PATTERN,
    OUTPUT_EXTENSION,
    extension_of,
    is_format_supported,
    list_supported_formats,
    supported_extensions,
};
pub use fs::{get_file_size, ensure_parent_dir, output_path_for};
