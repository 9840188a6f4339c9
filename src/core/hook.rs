//! Hook registration and chaining.
//!
//! The host exposes a [`ResolverRegistry`]; [`install`] registers the
//! loader once and chains a pre-existing legacy hook after it. The loader's
//! `Result<bool, LoadError>` is mapped explicitly onto [`HookOutcome`]: an
//! invalid name lets the next hook run, a host failure stops the chain.

use crate::core::error::LoadError;
use crate::core::host::SymbolHost;
use crate::core::loader::Loader;

const TARGET: &str = "symload::hook";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The symbol is now defined; later hooks are skipped.
    Resolved,
    /// Not handled here; the next hook in the chain runs.
    Continue,
}

pub type SymbolHook = Box<dyn Fn(&dyn SymbolHost, &str) -> Result<HookOutcome, LoadError>>;

/// Host capability for registering resolution hooks.
pub trait ResolverRegistry {
    fn register_resolver(&mut self, hook: SymbolHook);

    /// Removes and returns a single legacy hook the host had installed, if any.
    fn take_legacy_hook(&mut self) -> Option<SymbolHook> {
        None
    }
}

/// Map a load result onto the hook chain.
pub fn hook_outcome(name: &str, result: Result<bool, LoadError>) -> Result<HookOutcome, LoadError> {
    match result {
        Ok(true) => Ok(HookOutcome::Resolved),
        Ok(false) => Ok(HookOutcome::Continue),
        Err(e) if e.is_recoverable() => {
            tracing::debug!(target: TARGET, name, error = %e, "passing to next hook");
            Ok(HookOutcome::Continue)
        }
        Err(e) => Err(e),
    }
}

pub fn loader_hook(loader: Loader) -> SymbolHook {
    Box::new(move |host: &dyn SymbolHost, name: &str| {
        hook_outcome(name, loader.load(host, name))
    })
}

/// Register `loader` with the host, followed by any legacy hook.
pub fn install<R: ResolverRegistry + ?Sized>(registry: &mut R, loader: Loader) {
    let legacy = registry.take_legacy_hook();
    registry.register_resolver(loader_hook(loader));
    if let Some(legacy) = legacy {
        tracing::debug!(target: TARGET, "chaining legacy hook after loader");
        registry.register_resolver(legacy);
    }
}

/// Ordered hook chain for hosts without their own registry.
#[derive(Default)]
pub struct HookStack {
    hooks: Vec<SymbolHook>,
    legacy: Option<SymbolHook>,
}

impl HookStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack whose host already carries a single legacy hook.
    pub fn with_legacy_hook(hook: SymbolHook) -> Self {
        Self {
            hooks: Vec::new(),
            legacy: Some(hook),
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run hooks in registration order until `name` is defined.
    ///
    /// Hooks may dispatch again from inside an include; the stack is only
    /// borrowed shared while running.
    pub fn dispatch(&self, host: &dyn SymbolHost, name: &str) -> Result<bool, LoadError> {
        for hook in &self.hooks {
            if hook(host, name)? == HookOutcome::Resolved || host.is_defined(name) {
                return Ok(true);
            }
        }
        Ok(host.is_defined(name))
    }
}

impl ResolverRegistry for HookStack {
    fn register_resolver(&mut self, hook: SymbolHook) {
        self.hooks.push(hook);
    }

    fn take_legacy_hook(&mut self) -> Option<SymbolHook> {
        self.legacy.take()
    }
}
