/// Middleware for the web server
///
/// - Security headers on every response

pub mod security;
