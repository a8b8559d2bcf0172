pub mod fetch;
pub mod inspect;
pub mod process;

use std::path::PathBuf;

use chrono::{Datelike, Local};
pub use fetch::fetch;
pub use inspect::{check_point, classify};
pub use process::process;

use crate::export::OutputFormat;

pub fn make_output_file_name(format: OutputFormat) -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "ph_typhoon_data-{}-{:02}-{:02}.{}",
        today.year(),
        today.month(),
        today.day(),
        format.extension()
    );

    PathBuf::from(file_name)
}
