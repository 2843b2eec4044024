// Deployment configuration, resolved once at startup from the environment.
//
// Responsibilities
// - Map the `profile` variable onto an explicit two-variant enum.
// - Derive the MongoDB connection target and the HTTP listen address.
//
// Boundaries
// - Nothing else in the crate reads the environment; the resolved values are
//   threaded explicitly into the pieces that need them.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const MONGO_PORT: u16 = 27017;
const HTTP_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "webapp";

/// Deployment mode. Everything that is not exactly `prod` counts as a local
/// development run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Production,
}

impl Profile {
    pub fn from_env() -> Self {
        Self::parse(env::var("profile").ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("prod") => Self::Production,
            _ => Self::Development,
        }
    }

    /// Hostname of the MongoDB server for this profile. In production the
    /// database runs as a sibling container named `db`.
    pub fn mongo_host(self) -> &'static str {
        match self {
            Self::Production => "db",
            Self::Development => "localhost",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile: Profile,
    /// Root directory for the static web app served on the catch-all route.
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            profile: Profile::from_env(),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR)),
        }
    }

    pub fn mongo_uri(&self) -> String {
        format!("mongodb://{}:{}", self.profile.mongo_host(), MONGO_PORT)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], HTTP_PORT))
    }
}

#[cfg(test)]
mod profile_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Profile::Development)]
    #[case(Some(""), Profile::Development)]
    #[case(Some("dev"), Profile::Development)]
    #[case(Some("production"), Profile::Development)]
    #[case(Some("PROD"), Profile::Development)]
    #[case(Some("prod"), Profile::Production)]
    fn it_should_resolve_the_profile_from_the_raw_value(
        #[case] raw: Option<&str>,
        #[case] expected: Profile,
    ) {
        assert_eq!(Profile::parse(raw), expected);
    }

    #[rstest]
    #[case(Profile::Development, "localhost")]
    #[case(Profile::Production, "db")]
    fn it_should_pick_the_mongo_host_per_profile(
        #[case] profile: Profile,
        #[case] expected: &str,
    ) {
        assert_eq!(profile.mongo_host(), expected);
    }

    #[rstest]
    #[case(Profile::Development, "mongodb://localhost:27017")]
    #[case(Profile::Production, "mongodb://db:27017")]
    fn it_should_build_the_mongo_uri_per_profile(#[case] profile: Profile, #[case] expected: &str) {
        let config = Config {
            profile,
            static_dir: PathBuf::from("webapp"),
        };
        assert_eq!(config.mongo_uri(), expected);
    }

    #[rstest]
    fn it_should_listen_on_8080_on_all_interfaces() {
        let config = Config {
            profile: Profile::Development,
            static_dir: PathBuf::from("webapp"),
        };
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8080");
    }
}
