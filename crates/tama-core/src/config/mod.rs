use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::{
    pet::{Action, Pet},
    storage::RestorePolicy,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub pet: PetConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub faces: FaceTable,
    /// Where the settings came from; not part of the file.
    #[serde(skip)]
    pub origin: ConfigOrigin,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigOrigin {
    #[default]
    Defaults,
    File(PathBuf),
    /// The example file shipped with the repo, used when no real one exists.
    Example(PathBuf),
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        if let Ok(path) = env::var("TAMA_CONFIG") {
            return Self::from_path(Path::new(&path));
        }

        let project_root = env::var("TAMA_ROOT").unwrap_or_else(|_| ".".to_string());
        let default_path = Path::new(&project_root).join("config/tama.toml");
        if default_path.exists() {
            return Self::from_path(&default_path);
        }

        let example_path = Path::new(&project_root).join("config/tama.example.toml");
        if example_path.exists() {
            let mut config = Self::from_path(&example_path)?;
            config.origin = ConfigOrigin::Example(example_path);
            return Ok(config);
        }

        Ok(Self::default())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let mut config =
            Self::from_toml(&contents).with_context(|| format!("invalid config: {:?}", path))?;
        config.origin = ConfigOrigin::File(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the pet model cannot run with.
    pub fn validate(&self) -> Result<()> {
        if let Some(coefficient) = self.pet.decay_coefficient {
            check_decay_coefficient(coefficient).context("invalid [pet] decay_coefficient")?;
        }
        Ok(())
    }

    /// Fills in the settings a front-end chooses for itself when the config
    /// file leaves them unset.
    pub fn with_frontend_defaults(mut self, pacing: Pacing, restore: RestorePolicy) -> Self {
        self.pet.pacing = self.pet.pacing.or(Some(pacing));
        self.storage.restore = self.storage.restore.or(Some(restore));
        self
    }
}

/// Decay must be a finite, non-negative rate or vitals leave their range.
pub fn check_decay_coefficient(coefficient: f64) -> Result<f64> {
    if !coefficient.is_finite() {
        bail!("decay coefficient must be a finite number, got {coefficient}");
    }
    if coefficient < 0.0 {
        bail!("decay coefficient must not be negative, got {coefficient}");
    }
    Ok(coefficient)
}

/// Named decay speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// Slow simulated days: 0.01 per second.
    #[default]
    Relaxed,
    /// Fast enough to watch: 0.5 per second.
    Demo,
}

impl Pacing {
    pub fn coefficient(self) -> f64 {
        match self {
            Pacing::Relaxed => 0.01,
            Pacing::Demo => 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PetConfig {
    #[serde(default)]
    pub pacing: Option<Pacing>,
    /// Overrides `pacing` when set.
    #[serde(default)]
    pub decay_coefficient: Option<f64>,
    #[serde(default = "PetConfig::default_name")]
    pub default_name: String,
}

impl PetConfig {
    fn default_name() -> String {
        "Egg".into()
    }

    pub fn decay_coefficient(&self) -> f64 {
        self.decay_coefficient
            .unwrap_or_else(|| self.pacing.unwrap_or_default().coefficient())
    }

    /// Name to use when the user gives none.
    pub fn name_or_default(&self, input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.default_name.clone()
        } else {
            trimmed.to_string()
        }
    }

    pub fn hatch(&self, name: &str, now: f64) -> Pet {
        Pet::new(self.name_or_default(name), now).with_decay_coefficient(self.decay_coefficient())
    }
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            pacing: None,
            decay_coefficient: None,
            default_name: Self::default_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_save_path")]
    pub save_path: PathBuf,
    /// Front-ends pick their own default when unset.
    #[serde(default)]
    pub restore: Option<RestorePolicy>,
}

impl StorageConfig {
    fn default_save_path() -> PathBuf {
        PathBuf::from("save.json")
    }

    pub fn restore_policy(&self) -> RestorePolicy {
        self.restore.unwrap_or(RestorePolicy::Resume)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_path: Self::default_save_path(),
            restore: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "PromptConfig::default_message_pause_ms")]
    pub message_pause_ms: u64,
}

impl PromptConfig {
    fn default_message_pause_ms() -> u64 {
        1000
    }

    pub fn message_pause(&self) -> Duration {
        Duration::from_millis(self.message_pause_ms)
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            message_pause_ms: Self::default_message_pause_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "WindowConfig::default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "WindowConfig::default_action_display_ms")]
    pub action_display_ms: u64,
}

impl WindowConfig {
    fn default_tick_interval_ms() -> u64 {
        100
    }
    fn default_action_display_ms() -> u64 {
        1000
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn action_display(&self) -> Duration {
        Duration::from_millis(self.action_display_ms)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: Self::default_tick_interval_ms(),
            action_display_ms: Self::default_action_display_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Write logs here instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// ASCII faces keyed by `idle`, `dead` or an action name.
///
/// Entries given in the config file replace the built-in ones; missing keys
/// keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct FaceTable {
    faces: HashMap<String, String>,
}

impl FaceTable {
    const IDLE: &'static str = "idle";
    const DEAD: &'static str = "dead";

    fn builtin() -> HashMap<String, String> {
        [
            ("idle", "(ᵔᴥᵔ)"),
            ("feed", "(￣﹃￣)"),
            ("play", "(ᐛ)"),
            ("sleep", "(－_－) zzZ"),
            ("pet", "(˶ᵔ▽ᵔ˶)"),
            ("insult", "(ಥ﹏ಥ)"),
            ("dead", "(x_x)"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn lookup(&self, key: &str) -> &str {
        self.faces
            .get(key)
            .or_else(|| self.faces.get(Self::IDLE))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The face to draw for a pet right now. Death wins over the last action.
    pub fn face_for(&self, pet: &Pet) -> &str {
        if !pet.is_alive() {
            return self.lookup(Self::DEAD);
        }
        match pet.current_action() {
            Some(action) => self.action(action),
            None => self.lookup(Self::IDLE),
        }
    }

    pub fn action(&self, action: Action) -> &str {
        self.lookup(action.name())
    }
}

impl Default for FaceTable {
    fn default() -> Self {
        Self {
            faces: Self::builtin(),
        }
    }
}

impl From<HashMap<String, String>> for FaceTable {
    fn from(overrides: HashMap<String, String>) -> Self {
        let mut faces = Self::builtin();
        faces.extend(overrides);
        Self { faces }
    }
}
