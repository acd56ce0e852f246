#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    use crate::types::{Configuration, Manifest};

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct Settings {
        #[serde(flatten)]
        pub manifest: Manifest,
        pub name: String,
    }

    impl Configuration for Settings {
        fn manifest(&self) -> &Manifest {
            &self.manifest
        }
    }

    pub fn default_settings() -> Settings {
        Settings {
            manifest: Manifest::new(1),
            name: "x".into(),
        }
    }

    // -- Fixture with nested sections and optional fields ----------------------

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct ServerConfig {
        pub host: String,
        pub port: u16,
        pub tags: Vec<String>,
        pub manifest: Manifest,
        pub database: DbConfig,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct DbConfig {
        pub url: Option<String>,
        pub pool_size: usize,
    }

    impl Configuration for ServerConfig {
        fn manifest(&self) -> &Manifest {
            &self.manifest
        }
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                host: "localhost".into(),
                port: 8080,
                tags: vec!["primary".into()],
                manifest: Manifest::new(2),
                database: DbConfig {
                    url: None,
                    pool_size: 5,
                },
            }
        }
    }

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.manifest.version, 2);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.pool_size, 5);
    }
}
