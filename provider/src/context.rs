//! The [`Context`] carries operation scoped values into lifecycle callbacks.
//!
//! Contexts are organised into a tree: the root context holds the provider-wide logger
//! while derived contexts decorate it with attributes of individual operations,
//! such as the resource type and ID being reconciled.
use slog::Logger;
use slog::OwnedKV;
use slog::SendSyncRefUnwindSafeKV;

/// General purpose container to carry scoped values around.
#[derive(Clone, Debug)]
pub struct Context {
    /// Logger with contextual attributes attached to it.
    pub logger: Logger,
}

impl Context {
    /// Derive a new [`Context`] by making changes to the current one.
    pub fn derive(&self) -> ContextBuilder {
        ContextBuilder {
            logger: self.logger.clone(),
        }
    }

    /// Derive a new [`Context`] by making changes to the current one using the provided callback.
    pub fn derive_with<F>(&self, callback: F) -> Context
    where
        F: FnOnce(ContextBuilder) -> ContextBuilder,
    {
        let builder = callback(self.derive());
        builder.build()
    }

    /// Initialise a new root context.
    pub fn root(logger: Logger) -> ContextBuilder {
        ContextBuilder { logger }
    }
}

/// A builder for root and derived contexts.
pub struct ContextBuilder {
    logger: Logger,
}

impl ContextBuilder {
    /// Finalise the build process and return a new [`Context`].
    pub fn build(self) -> Context {
        Context {
            logger: self.logger,
        }
    }

    /// Update the [`Context`] logger to attach new log key/pair values.
    pub fn log_values<T>(mut self, entries: OwnedKV<T>) -> Self
    where
        T: SendSyncRefUnwindSafeKV + 'static,
    {
        self.logger = self.logger.new(entries);
        self
    }
}

#[cfg(any(test, feature = "test-fixture"))]
impl Context {
    /// Create an empty context useful for test.
    pub fn fixture() -> Context {
        let logger = Logger::root(slog::Discard, slog::o!());
        Context { logger }
    }
}

#[cfg(test)]
mod tests {
    use super::Context;

    #[test]
    fn derive_log_values() {
        let root = Context::fixture();
        let context = root.derive_with(|builder| {
            builder.log_values(slog::o!("resource" => "superset_user", "id" => 100))
        });
        let kv = format!("{:?}", context.logger.list());
        assert!(kv.contains("resource"));
        assert!(kv.contains("id"));
    }
}
