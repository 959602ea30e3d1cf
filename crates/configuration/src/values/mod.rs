mod secret;
mod service_token;

pub use secret::Secret;
pub use service_token::ServiceToken;
