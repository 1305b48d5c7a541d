/// Errors raised while talking to the host console.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Host connection failed: {message}")]
    Connect { message: String },

    #[error("Session already connected")]
    AlreadyConnected,

    #[error("Session closed before it became ready")]
    Closed,
}
