//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Address of the blank placeholder page
pub const ABOUT_BLANK: &str = "about:blank";

/// Home address loaded by the default session
pub const HOME_ADDRESS: &str = "https://duckduckgo.com/lite/";

/// Search engine endpoint queried by the navigation bar's search entry
pub const SEARCH_ADDRESS: &str = "https://duckduckgo.com/lite/";

/// Title shown for a content page before the engine reports one
pub const DEFAULT_TITLE: &str = "New Tab";

/// Delay between creating an engine instance and issuing its first
/// navigation. Navigating a freshly created engine can silently drop the
/// command or crash it, so the first navigation is always deferred.
pub const STARTUP_GRACE: Duration = Duration::from_secs(1);

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Skiff";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
