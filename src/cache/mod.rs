pub mod token;
pub mod token_cache;

/// Key the bearer token is cached under
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
