//! Launch-on-boot registration
//!
//! The desktop app only needs "is it registered" and "register / unregister".
//! On Linux desktops that is an XDG autostart entry
//! (`~/.config/autostart/<app>.desktop`); other registries can implement the
//! same trait.

use crate::backend::error::AutostartError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Operating-system autostart registry
pub trait AutostartRegistry: Send + Sync + 'static {
    fn is_enabled(&self) -> Result<bool, AutostartError>;

    fn set_enabled(&self, enable: bool) -> Result<(), AutostartError>;
}

impl<T: AutostartRegistry + ?Sized> AutostartRegistry for Box<T> {
    fn is_enabled(&self) -> Result<bool, AutostartError> {
        (**self).is_enabled()
    }

    fn set_enabled(&self, enable: bool) -> Result<(), AutostartError> {
        (**self).set_enabled(enable)
    }
}

/// XDG desktop entry in the user's `autostart` directory
#[derive(Debug, Clone)]
pub struct DesktopEntryAutostart {
    entry_path: PathBuf,
    app_name: String,
    exec: PathBuf,
}

impl DesktopEntryAutostart {
    /// Entry for `app_name` launching `exec`, under the user config dir
    pub fn for_current_user(app_name: &str, exec: PathBuf) -> Result<Self, AutostartError> {
        let config_dir = dirs::config_dir().ok_or(AutostartError::NoConfigDir)?;
        Ok(Self::in_dir(&config_dir.join("autostart"), app_name, exec))
    }

    /// Entry stored in an explicit autostart directory
    pub fn in_dir(autostart_dir: &Path, app_name: &str, exec: PathBuf) -> Self {
        Self {
            entry_path: autostart_dir.join(format!("{}.desktop", app_name)),
            app_name: app_name.to_string(),
            exec,
        }
    }

    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    fn render_entry(&self) -> String {
        format!(
            "[Desktop Entry]\nType=Application\nName={}\nExec=\"{}\"\nX-GNOME-Autostart-enabled=true\nTerminal=false\n",
            self.app_name,
            self.exec.display()
        )
    }

    fn io_error(&self, source: std::io::Error) -> AutostartError {
        AutostartError::Io {
            path: self.entry_path.clone(),
            source,
        }
    }
}

impl AutostartRegistry for DesktopEntryAutostart {
    fn is_enabled(&self) -> Result<bool, AutostartError> {
        match std::fs::metadata(&self.entry_path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn set_enabled(&self, enable: bool) -> Result<(), AutostartError> {
        if enable {
            if let Some(parent) = self.entry_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
            std::fs::write(&self.entry_path, self.render_entry()).map_err(|e| self.io_error(e))?;
            tracing::info!("[Autostart] Registered {}", self.entry_path.display());
        } else {
            match std::fs::remove_file(&self.entry_path) {
                Ok(()) => tracing::info!("[Autostart] Removed {}", self.entry_path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(self.io_error(e)),
            }
        }
        Ok(())
    }
}

/// In-process registry, for platforms without one and for tests
#[derive(Debug, Default)]
pub struct MemoryAutostart {
    enabled: AtomicBool,
}

impl MemoryAutostart {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }
}

impl AutostartRegistry for MemoryAutostart {
    fn is_enabled(&self) -> Result<bool, AutostartError> {
        Ok(self.enabled.load(Ordering::SeqCst))
    }

    fn set_enabled(&self, enable: bool) -> Result<(), AutostartError> {
        self.enabled.store(enable, Ordering::SeqCst);
        Ok(())
    }
}
