use axum_helpers::JwtConfig;
use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_first_of, env_or_default, server::ServerConfig,
};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Collection names inside the configured database
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionsConfig {
    pub employees: String,
    pub users: String,
}

impl FromEnv for CollectionsConfig {
    /// - EMPLOYEES_COLLECTION (or COLLECTION_NAME): defaults to "employees"
    /// - USERS_COLLECTION: defaults to "users"
    fn from_env() -> Result<Self, ConfigError> {
        let employees = env_first_of(&["EMPLOYEES_COLLECTION", "COLLECTION_NAME"])
            .unwrap_or_else(|_| domain_employees::mongodb::DEFAULT_COLLECTION.to_string());
        let users = env_or_default("USERS_COLLECTION", domain_users::mongodb::DEFAULT_COLLECTION);

        Ok(Self { employees, users })
    }
}

/// Admin account created at startup when no admin exists
#[derive(Clone)]
pub struct DefaultAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl DefaultAdmin {
    /// `None` unless both DEFAULT_ADMIN_USERNAME and DEFAULT_ADMIN_PASSWORD are set
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("DEFAULT_ADMIN_USERNAME").ok()?;
        let password = std::env::var("DEFAULT_ADMIN_PASSWORD").ok()?;
        let email = env_or_default("DEFAULT_ADMIN_EMAIL", &format!("{username}@localhost"));

        Some(Self {
            username,
            email,
            password,
        })
    }
}

impl std::fmt::Debug for DefaultAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAdmin")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub collections: CollectionsConfig,
    pub default_admin: Option<DefaultAdmin>,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let collections = CollectionsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            jwt,
            collections,
            default_admin: DefaultAdmin::from_env(),
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "config-test-secret-that-is-32-chars!";

    #[test]
    fn test_collections_defaults() {
        temp_env::with_vars_unset(
            ["EMPLOYEES_COLLECTION", "COLLECTION_NAME", "USERS_COLLECTION"],
            || {
                let collections = CollectionsConfig::from_env().unwrap();
                assert_eq!(collections.employees, "employees");
                assert_eq!(collections.users, "users");
            },
        );
    }

    #[test]
    fn test_collection_name_fallback() {
        temp_env::with_vars(
            [
                ("EMPLOYEES_COLLECTION", None),
                ("COLLECTION_NAME", Some("staff")),
            ],
            || {
                assert_eq!(CollectionsConfig::from_env().unwrap().employees, "staff");
            },
        );
    }

    #[test]
    fn test_default_admin_needs_username_and_password() {
        temp_env::with_vars(
            [
                ("DEFAULT_ADMIN_USERNAME", Some("root")),
                ("DEFAULT_ADMIN_PASSWORD", None::<&str>),
            ],
            || assert!(DefaultAdmin::from_env().is_none()),
        );

        temp_env::with_vars(
            [
                ("DEFAULT_ADMIN_USERNAME", Some("root")),
                ("DEFAULT_ADMIN_PASSWORD", Some("change-me")),
                ("DEFAULT_ADMIN_EMAIL", None),
            ],
            || {
                let admin = DefaultAdmin::from_env().unwrap();
                assert_eq!(admin.email, "root@localhost");
                assert!(!format!("{admin:?}").contains("change-me"));
            },
        );
    }

    #[test]
    fn test_config_requires_mongo_and_secret() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("hr")),
                ("JWT_SECRET", None),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_SECRET"));
            },
        );

        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("hr")),
                ("JWT_SECRET", Some(SECRET)),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database(), "hr");
                assert_eq!(config.app.name, "employees_api");
            },
        );
    }
}
