/// Core error type.
///
/// Adapter crates map their library errors into this type. Negative outcomes
/// (a user who is not in the channel, a URL the resolution API knows nothing
/// about) are values, not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// Membership directory lookup failed (unknown user, permission denied, transport).
    #[error("membership lookup failed: {0}")]
    Directory(String),

    /// Resolution API call failed or returned an undecodable body.
    #[error("link resolution failed: {0}")]
    Resolution(String),

    /// Outbound send through the messaging gateway failed.
    #[error("messaging error: {0}")]
    Messaging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
