//! Client-side behaviours attached to rendered markup.
//!
//! Renderers stay pure: instead of registering scripts while rendering they
//! return [`ClientBehavior`] descriptors. The page composition layer gathers
//! them into [`PageRequirements`] and emits them once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A client-side module function to call once the page has loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientBehavior {
    /// Module name, e.g. `datafield_longtext/main`.
    pub module: String,
    /// Function exported by the module.
    pub function: String,
    /// Arguments passed to the function.
    pub args: Vec<Value>,
}

impl ClientBehavior {
    /// Creates a behaviour descriptor.
    pub fn new(module: impl Into<String>, function: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
            args,
        }
    }
}

/// Behaviours collected while composing one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRequirements {
    calls: Vec<ClientBehavior>,
}

impl PageRequirements {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers behaviours. Exact duplicates are registered once.
    pub fn require(&mut self, behaviors: impl IntoIterator<Item = ClientBehavior>) {
        for behavior in behaviors {
            if !self.calls.contains(&behavior) {
                tracing::debug!(
                    module = %behavior.module,
                    function = %behavior.function,
                    "Registered client behaviour"
                );
                self.calls.push(behavior);
            }
        }
    }

    /// Registered behaviours in registration order.
    pub fn calls(&self) -> &[ClientBehavior] {
        &self.calls
    }

    /// Returns true if nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Serializes the registered calls for the page's script loader.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.calls)
    }
}
