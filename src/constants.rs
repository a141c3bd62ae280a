//! Application constants and configuration

pub const CONTENT_URL: &str =
    "https://fed-team.modyo.cloud/api/content/spaces/animals/types/game/entries";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_FLIP_BACK_DELAY_MS: u64 = 1000;
pub const IMAGE_FETCH_CONCURRENCY: usize = 8;
pub const HTTP_TIMEOUT_SECS: u64 = 20;
pub const APP_NAME: &str = "Memory Match";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
