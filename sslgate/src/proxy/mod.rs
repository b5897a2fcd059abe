mod https_redirect_gateway;

pub use https_redirect_gateway::HttpsRedirectGateway;
