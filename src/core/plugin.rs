//! Plugin runtime.
//!
//! A plugin is installed against a live [`Engine`] and may hand back a
//! [`Teardown`]. Teardowns run in reverse installation order when the
//! engine is destroyed, each exactly once.

use crate::core::engine::Engine;
use crate::core::error::EngineError;

pub trait Plugin {
    type Options;

    fn name(&self) -> &str;

    fn install(self, engine: &mut Engine, options: Self::Options) -> Result<Teardown, EngineError>;
}

/// Object-style teardown, for plugins that keep their resources in a struct.
pub trait Destroy {
    fn destroy(self: Box<Self>, engine: &mut Engine);
}

pub enum Teardown {
    Nothing,
    Callback(Box<dyn FnOnce(&mut Engine)>),
    Object(Box<dyn Destroy>),
}

impl Teardown {
    pub fn callback(f: impl FnOnce(&mut Engine) + 'static) -> Self {
        Teardown::Callback(Box::new(f))
    }

    pub fn object(resource: impl Destroy + 'static) -> Self {
        Teardown::Object(Box::new(resource))
    }

    pub fn run(self, engine: &mut Engine) {
        match self {
            Teardown::Nothing => {}
            Teardown::Callback(f) => f(engine),
            Teardown::Object(resource) => resource.destroy(engine),
        }
    }
}

impl From<()> for Teardown {
    fn from(_: ()) -> Self {
        Teardown::Nothing
    }
}

pub struct InstalledPlugin {
    pub name: String,
    pub teardown: Teardown,
}

#[derive(Default)]
pub struct PluginRegistry {
    installed: Vec<InstalledPlugin>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, teardown: Teardown) {
        self.installed.push(InstalledPlugin {
            name: name.into(),
            teardown,
        });
    }

    pub fn names(&self) -> Vec<&str> {
        self.installed.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Empties the registry, newest installation first.
    pub fn drain_for_teardown(&mut self) -> Vec<InstalledPlugin> {
        let mut drained = std::mem::take(&mut self.installed);
        drained.reverse();
        drained
    }
}
