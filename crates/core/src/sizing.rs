//! Dataset size rules. Sizes are stored as whole megabytes.

/// Megabytes per gigabyte.
pub const MB_PER_GB: i64 = 1024;

/// Datasets strictly above this many megabytes are "large".
pub const LARGE_THRESHOLD_MB: i64 = 1024;

/// Size in gigabytes, rounded to two decimal places.
pub fn size_gb(size_mb: i64) -> f64 {
    let gb = size_mb as f64 / MB_PER_GB as f64;
    (gb * 100.0).round() / 100.0
}

/// Human-readable size.
///
/// Sizes of exactly 1024 MB and above render in gigabytes ("1.0 GB",
/// "1.5 GB", "1.07 GB"); smaller sizes render as whole megabytes ("500 MB").
/// The gigabyte figure always keeps at least one decimal place.
pub fn size_formatted(size_mb: i64) -> String {
    if size_mb >= MB_PER_GB {
        format!("{:?} GB", size_gb(size_mb))
    } else {
        format!("{size_mb} MB")
    }
}

pub fn is_large(size_mb: i64) -> bool {
    size_mb > LARGE_THRESHOLD_MB
}
