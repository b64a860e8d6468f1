/// Process configuration, read from the environment exactly once at startup
/// and passed by reference from there on. Every knob has a default so the
/// tool runs against a local MongoDB with no setup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub db_name: String,
    pub collection_name: String,
    pub seed_sample_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".into()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "myapp".into()),
            collection_name: std::env::var("COLLECTION_NAME").unwrap_or_else(|_| "users".into()),
            seed_sample_data: std::env::var("SEED_SAMPLE_DATA")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        for key in ["MONGODB_URI", "DB_NAME", "COLLECTION_NAME", "SEED_SAMPLE_DATA"] {
            std::env::remove_var(key);
        }
        let config = AppConfig::from_env();
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.db_name, "myapp");
        assert_eq!(config.collection_name, "users");
        assert!(!config.seed_sample_data);
    }
}
