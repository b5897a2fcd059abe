mod application;
mod enforcer;
mod error;
mod protocol;
#[cfg(test)]
mod tests;
mod uri;

pub use application::{HttpsApplication, SessionApplication};
pub use enforcer::SslEnforcer;
pub use error::UriError;
pub use protocol::{Protocol, RedirectMode};
pub use uri::{expand_app_relative, path_and_query, strip_query};
