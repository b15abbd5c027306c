pub mod app;
pub mod config;
pub mod error;
pub mod platform;
pub mod scheduler;
pub mod state;
pub mod theme;
pub mod traits;

// Export coordinators
pub use app::{EngineState, NavigationCoordinator, SettingsCoordinator, ThemePreferenceEngine};

// Export collaborator contracts
pub use traits::{Clock, PreferenceStore, Router, Subscription, SystemThemeSignal, ThemeSink};

// Export state and theme vocabulary
pub use state::{NavigationState, ThemePreference};
pub use theme::{ResolvedTheme, ThemeColors, ThemeMode};

// Export configuration and errors
pub use config::{NavigationConfig, ShellConfig, ThemeConfig};
pub use error::{InvalidModeError, StoreError};
