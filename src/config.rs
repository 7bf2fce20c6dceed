use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub base_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL is not set".to_string())?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET is not set".to_string())?;
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| "PORT must be a port number".to_string())?;
        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));
        let token_ttl_hours: i64 = std::env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .map_err(|_| "TOKEN_TTL_HOURS must be a number".to_string())?;

        Ok(Self {
            database_url,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            base_url,
            jwt_secret,
            token_ttl_hours,
        })
    }
}
