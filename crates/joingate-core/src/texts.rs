//! User-facing reply texts.

pub const WELCOME: &str = "Welcome! Send me a Terabox video URL to download.";
pub const PROCESSING: &str = "Processing your request...";
pub const NO_RESULT: &str = "Failed to retrieve the video. Please check the URL and try again.";
pub const RESOLUTION_FAILED: &str =
    "An error occurred while processing your request. Please try again later.";

pub const JOIN_CAPTION: &str = "Please join our channel to use this bot.";
pub const JOIN_BUTTON: &str = "Join Channel";
pub const JOINED_BUTTON: &str = "Joined 🟢";

pub const RECHECK_CONFIRMED: &str =
    "Thank you for joining! You can now send me a Terabox video URL to download.";
pub const RECHECK_REJECTED: &str = "You must join the channel to use this bot. ❌";
pub const RECHECK_FAILED: &str =
    "An error occurred while checking your status. Please try again later.";

pub fn download_link(url: &str) -> String {
    format!("Here is your download link: {url}")
}
