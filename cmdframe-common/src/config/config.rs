// See config.toml for information on the variables here.

use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct FrameworkConfig {
    pub framework: Framework,
    pub logging: Logging,
    pub console: Console,
    pub sessions: Vec<Session>,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Framework {
    /// Name of the owning application. Every exported command label is also
    /// reachable as `namespace:label`.
    pub namespace: String,
}
impl Default for Framework {
    fn default() -> Self {
        Self {
            namespace: "cmdframe".to_owned(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Logging {
    /// `EnvFilter` directives, overridden by `RUST_LOG` when set.
    pub filter: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Console {
    pub name: String,
}
impl Default for Console {
    fn default() -> Self {
        Self {
            name: "CONSOLE".to_owned(),
        }
    }
}

/// An interactive player session that can be impersonated from the playground shell.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Session {
    pub name: String,
    #[serde(default)]
    pub operator: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}
