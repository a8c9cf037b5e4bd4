pub const APP_NAME: &str = "Locker Sift";

pub const UNKNOWN_LABEL: &str = "Unknown";
pub const NO_ITEMS_LABEL: &str = "None";

pub const COMMENT_MARKER: char = '#';
pub const SECTION_DIVIDER: &str = "====";
pub const BYTE_ORDER_MARK: char = '\u{feff}';

// Fallback item lists reject entries shorter than this.
pub const MIN_FALLBACK_ITEM_NAME_CHARS: usize = 3;

pub const REPORT_DIVIDER_WIDTH: usize = 50;
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";
pub const DEFAULT_REPORT_FILE_NAME: &str = "results.txt";
pub const DEFAULT_JSON_FILE_NAME: &str = "results.json";
pub const DEFAULT_FILE_EXTENSION: &str = "txt";
pub const ARCHIVE_EXTENSION: &str = "zip";
pub const ARCHIVE_TEMP_PREFIX: &str = "locker-sift-";
pub const DEFAULT_OUTBOX_DIRECTORY: &str = "outbox";
pub const DEFAULT_ATTACHMENT_NAME: &str = "Results.txt";
pub const SUMMARY_FILE_NAME: &str = "summary.txt";

pub const MAX_PROCESSING_THREADS: usize = 256;
pub const FALLBACK_PROCESSING_THREADS: usize = 4;
