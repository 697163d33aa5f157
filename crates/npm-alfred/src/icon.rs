use std::io;
use std::path::PathBuf;

pub const ICON_FILE: &str = "icon.png";

/// Where the item icon lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Fixed(PathBuf),
    /// `icon.png` next to the running executable, i.e. in the workflow folder.
    BesideExecutable,
}

impl Icon {
    /// `NPM_ALFRED_ICON` when set, otherwise [`Icon::BesideExecutable`].
    pub fn from_env() -> Self {
        match std::env::var_os("NPM_ALFRED_ICON") {
            Some(path) if !path.is_empty() => Icon::Fixed(path.into()),
            _ => Icon::BesideExecutable,
        }
    }

    pub fn resolve(&self) -> io::Result<PathBuf> {
        match self {
            Icon::Fixed(path) => Ok(path.clone()),
            Icon::BesideExecutable => {
                let exe = std::env::current_exe()?;
                let dir = exe.parent().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory")
                })?;
                Ok(dir.join(ICON_FILE))
            }
        }
    }
}
