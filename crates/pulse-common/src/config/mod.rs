//! Configuration structs

mod app_config;

pub use app_config::{
    AiConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
