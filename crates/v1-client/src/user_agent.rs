//! `User-Agent` composition.
//!
//! The header identifies this library first and the embedding application
//! second: `<name>/<version> (<qualified name>) <upstream token>`.

/// Name this library reports in `User-Agent`.
pub const CLIENT_NAME: &str = env!("CARGO_PKG_NAME");

/// Version this library reports in `User-Agent`.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fully qualified identity reported in the parenthesized comment.
pub const CLIENT_QUALIFIED_NAME: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " ",
    env!("CARGO_PKG_VERSION"),
    "; +",
    env!("CARGO_PKG_REPOSITORY")
);

/// Format an identity as a `User-Agent` value, optionally followed by an upstream token.
pub fn format_user_agent(
    name: &str,
    version: &str,
    qualified_name: &str,
    upstream: Option<&str>,
) -> String {
    let mut agent = format!("{}/{} ({})", name, version, qualified_name);
    if let Some(upstream) = upstream.filter(|u| !u.is_empty()) {
        agent.push(' ');
        agent.push_str(upstream);
    }
    agent
}

/// The upstream token for an embedding application.
pub fn upstream_token(app_name: &str, app_version: &str) -> String {
    format!("{}/{}", app_name, app_version)
}

/// This library's `User-Agent`, followed by the upstream token if any.
pub fn client_user_agent(upstream: Option<&str>) -> String {
    format_user_agent(CLIENT_NAME, CLIENT_VERSION, CLIENT_QUALIFIED_NAME, upstream)
}
