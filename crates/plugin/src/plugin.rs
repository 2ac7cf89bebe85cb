//! Dispatch of host calls onto the [`TagService`] port.

use serde_json::Value;
use tags::{CallId, DropletId, ResourceAssociation, TagService, TagServiceConnector};
use tracing::{debug, info_span, Instrument};

use crate::{render, Method, PluginArgs, PluginError};

/// The plugin's RPC surface.
///
/// Each call connects a fresh [`TagService`] with the caller's token, checks
/// the positional arguments, performs exactly one provider operation, and
/// renders the result. Argument errors are raised before any request is made.
#[derive(Debug, Clone)]
pub struct TagPlugin<C> {
    connector: C,
}

impl<C: TagServiceConnector> TagPlugin<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Handles one call with an undecoded arguments bag.
    pub async fn call(&self, method: Method, args: &Value) -> Result<String, PluginError> {
        let call_id = CallId::new_random();
        let span = info_span!("rpc_call", %call_id, method = method.name());
        self.dispatch(method, args).instrument(span).await
    }

    async fn dispatch(&self, method: Method, args: &Value) -> Result<String, PluginError> {
        let result = match PluginArgs::from_value(args) {
            Ok(args) => self.call_with(method, &args).await,
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            debug!(error = %err, "call failed");
        }
        result
    }

    /// Handles one call with already-decoded arguments.
    pub async fn call_with(&self, method: Method, args: &PluginArgs) -> Result<String, PluginError> {
        let service = self.connector.connect(&args.access_token)?;
        let positional = method.check_args(&args.args)?;
        let service = service.as_ref();

        match method {
            Method::List => list(service).await,
            Method::Create => create(service, &positional[0]).await,
            Method::Get => get(service, &positional[0]).await,
            Method::Rename => rename(service, &positional[0], &positional[1]).await,
            Method::Add => add(service, &positional[0], &positional[1]).await,
            Method::Remove => remove(service, &positional[0], &positional[1]).await,
        }
    }
}

async fn list(service: &dyn TagService) -> Result<String, PluginError> {
    let tags = service.list().await?.into_value();
    Ok(render::tag_table(&tags))
}

async fn create(service: &dyn TagService, name: &str) -> Result<String, PluginError> {
    let tag = service.create(name).await?.into_value();
    Ok(render::created(&tag))
}

async fn get(service: &dyn TagService, name: &str) -> Result<String, PluginError> {
    let tag = service.get(name).await?.into_value();
    Ok(render::tag_table([&tag]))
}

async fn rename(service: &dyn TagService, old: &str, new: &str) -> Result<String, PluginError> {
    let tag = service.rename(old, new).await?.into_value();
    Ok(render::tag_table([&tag]))
}

async fn add(service: &dyn TagService, name: &str, droplet: &str) -> Result<String, PluginError> {
    let association = association(name, droplet)?;
    service.add(&association).await?;
    Ok(render::added(association.droplet, name))
}

async fn remove(service: &dyn TagService, name: &str, droplet: &str) -> Result<String, PluginError> {
    let association = association(name, droplet)?;
    service.remove(&association).await?;
    Ok(render::removed(association.droplet, name))
}

fn association(name: &str, droplet: &str) -> Result<ResourceAssociation, PluginError> {
    let droplet: DropletId = droplet
        .parse()
        .map_err(|_| PluginError::invalid_droplet_id(droplet))?;
    Ok(ResourceAssociation::new(name, droplet))
}
