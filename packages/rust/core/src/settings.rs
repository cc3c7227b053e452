//! Reading, writing, and removing settings groups.
//!
//! A settings group is every parameter stored under
//! `/<application>/<scope>[/<context>]`. [`SettingsClient`] hands out
//! configured readers, writers, and removers bound to one group; each call
//! on them goes to the store again, nothing is cached.

use stackconf_shared::{DefaultsConfig, Parameter, Result, Settings, SettingsError, StoreError};
use tracing::{debug, info, instrument, warn};

use crate::paginate::collect_all;
use crate::path::{PathSegments, build_path};
use crate::store::ParameterStore;

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// The (application, scope, context) triple that identifies a settings group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsTarget {
    pub application: String,
    pub scope: String,
    pub context: Option<String>,
}

impl SettingsTarget {
    pub fn new(application: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            scope: scope.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Build a target from the `[defaults]` config section.
    pub fn from_defaults(defaults: &DefaultsConfig) -> Result<Self> {
        let application = defaults.application.clone().ok_or_else(|| {
            SettingsError::config("defaults.application is not set")
        })?;
        Ok(Self {
            application,
            scope: defaults.scope.clone(),
            context: defaults.context.clone(),
        })
    }
}

/// Fully qualified name of a parameter that was written or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingName {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Entry point for settings operations against one parameter store.
pub struct SettingsClient<S> {
    store: S,
}

impl<S: ParameterStore> SettingsClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Configure a reader for the group at `/<application>/<scope>[/<context>]`.
    ///
    /// Validation happens here; [`SettingsReader::read`] performs the listing.
    pub fn get_settings(
        &self,
        application: &str,
        scope: &str,
        context: Option<&str>,
    ) -> Result<SettingsReader<'_, S>> {
        let mut segments = PathSegments::new(application, scope);
        segments.context = context;
        let path = build_path(&segments)?;
        Ok(SettingsReader {
            store: &self.store,
            path,
        })
    }

    /// Configure a writer for properties of `/<application>/<scope>/<context>`.
    pub fn put_setting(
        &self,
        application: &str,
        scope: &str,
        context: &str,
    ) -> Result<SettingsWriter<'_, S>> {
        let target = SettingsTarget::new(application, scope).with_context(context);
        self.writer(&target)
    }

    /// Configure a remover for properties of `/<application>/<scope>/<context>`.
    pub fn delete_setting(
        &self,
        application: &str,
        scope: &str,
        context: &str,
    ) -> Result<SettingsRemover<'_, S>> {
        let target = SettingsTarget::new(application, scope).with_context(context);
        self.remover(&target)
    }

    /// Read a group, returning `None` on any failure.
    ///
    /// Store failures are folded into `None` as well as the not-configured
    /// case; callers that must tell them apart use [`Self::get_settings`].
    pub async fn maybe_settings(
        &self,
        application: &str,
        scope: &str,
        context: Option<&str>,
    ) -> Option<Settings> {
        match self.try_read(application, scope, context).await {
            Ok(settings) => Some(settings),
            Err(err) => {
                if err.is_not_configured() {
                    debug!(error = %err, "settings not configured");
                } else {
                    warn!(error = %err, "failed to read settings, treating as absent");
                }
                None
            }
        }
    }

    /// Like [`Self::maybe_settings`], with `default` in place of `None`.
    pub async fn maybe_settings_or(
        &self,
        application: &str,
        scope: &str,
        context: Option<&str>,
        default: Settings,
    ) -> Settings {
        self.maybe_settings(application, scope, context)
            .await
            .unwrap_or(default)
    }

    /// Reader for a configured target.
    pub fn reader(&self, target: &SettingsTarget) -> Result<SettingsReader<'_, S>> {
        self.get_settings(&target.application, &target.scope, target.context.as_deref())
    }

    /// Writer for a configured target. The target must carry a context.
    pub fn writer(&self, target: &SettingsTarget) -> Result<SettingsWriter<'_, S>> {
        let group = validated_group(target)?;
        Ok(SettingsWriter {
            store: &self.store,
            group,
        })
    }

    /// Remover for a configured target. The target must carry a context.
    pub fn remover(&self, target: &SettingsTarget) -> Result<SettingsRemover<'_, S>> {
        let group = validated_group(target)?;
        Ok(SettingsRemover {
            store: &self.store,
            group,
        })
    }

    async fn try_read(
        &self,
        application: &str,
        scope: &str,
        context: Option<&str>,
    ) -> Result<Settings> {
        self.get_settings(application, scope, context)?.read().await
    }
}

/// Check a writable target up front so that only the property can fail later.
fn validated_group(target: &SettingsTarget) -> Result<SettingsTarget> {
    let mut segments = PathSegments::new(&target.application, &target.scope);
    segments.context = target.context.as_deref();
    build_path(&segments)?;
    if target.context.is_none() {
        return Err(SettingsError::MissingContext);
    }
    Ok(target.clone())
}

fn property_path(group: &SettingsTarget, property: &str) -> Result<String> {
    let mut segments = PathSegments::new(&group.application, &group.scope).with_property(property);
    segments.context = group.context.as_deref();
    build_path(&segments)
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// A configured, repeatable read of one settings group.
pub struct SettingsReader<'a, S> {
    store: &'a S,
    path: String,
}

impl<S: ParameterStore> SettingsReader<'_, S> {
    /// The listing prefix this reader queries.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// List every parameter under the prefix and strip the prefix from the names.
    ///
    /// Fails with [`SettingsError::ContextNotConfigured`] when nothing is
    /// stored there. Store errors are returned unchanged.
    #[instrument(skip_all, fields(path = %self.path))]
    pub async fn read(&self) -> Result<Settings> {
        let store = self.store;
        let path = self.path.as_str();
        let parameters = collect_all(|token| store.list_by_path(path, true, token)).await?;

        if parameters.is_empty() {
            return Err(SettingsError::ContextNotConfigured {
                path: self.path.clone(),
            });
        }

        let prefix = format!("{path}/");
        let settings: Settings = parameters
            .into_iter()
            .map(|Parameter { name, value }| {
                let key = name.strip_prefix(&prefix).map(str::to_string).unwrap_or(name);
                (key, value.unwrap_or_default())
            })
            .collect();

        debug!(count = settings.len(), "read settings");
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Writes single properties of one settings group.
pub struct SettingsWriter<'a, S> {
    store: &'a S,
    group: SettingsTarget,
}

impl<S: ParameterStore> SettingsWriter<'_, S> {
    /// Store `value` under `property`.
    ///
    /// With `delete_before_update` the parameter is deleted first (failures
    /// ignored) and the put runs without overwrite, so the stored parameter
    /// starts over at version 1. A parameter that reappears in between makes
    /// the put fail instead of being overwritten.
    #[instrument(skip_all, fields(property = %property, delete_before_update = delete_before_update))]
    pub async fn put(
        &self,
        property: &str,
        value: &str,
        delete_before_update: bool,
    ) -> Result<SettingName> {
        let name = property_path(&self.group, property)?;

        if delete_before_update {
            match self.store.delete(&name).await {
                Ok(()) => debug!(%name, "deleted before update"),
                Err(StoreError::NotFound { .. }) => debug!(%name, "nothing to delete before update"),
                Err(err) => warn!(%name, error = %err, "ignoring failed delete before update"),
            }
        }

        self.store.put(&name, value, !delete_before_update).await?;
        info!(%name, "setting written");
        Ok(SettingName { name })
    }
}

// ---------------------------------------------------------------------------
// Remover
// ---------------------------------------------------------------------------

/// Deletes single properties of one settings group.
pub struct SettingsRemover<'a, S> {
    store: &'a S,
    group: SettingsTarget,
}

impl<S: ParameterStore> SettingsRemover<'_, S> {
    /// Delete `property`. Deleting an absent property succeeds.
    #[instrument(skip_all, fields(property = %property))]
    pub async fn delete(&self, property: &str) -> Result<SettingName> {
        let name = property_path(&self.group, property)?;

        match self.store.delete(&name).await {
            Ok(()) => info!(%name, "setting deleted"),
            Err(StoreError::NotFound { .. }) => debug!(%name, "setting already absent"),
            Err(err) => return Err(err.into()),
        }

        Ok(SettingName { name })
    }
}
