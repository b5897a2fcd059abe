pub mod conf;
pub mod ext;
pub mod logging;
pub mod proxy;
pub mod security;
