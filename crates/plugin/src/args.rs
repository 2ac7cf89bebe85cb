//! Typed view of the host's arguments bag.
//!
//! The host sends every call an untyped mapping of the form
//! `{"AccessToken": "...", "Args": ["positional", ...]}`. It is decoded once,
//! here, so that a bag of the wrong shape becomes an
//! [`PluginError::InvalidArgument`] instead of a failure deep inside a method.

use serde::Deserialize;
use serde_json::Value;
use tags::AccessToken;

use crate::PluginError;

/// Decoded arguments for one call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginArgs {
    pub access_token: AccessToken,

    /// Positional command-line arguments after the subcommand. A missing or
    /// `null` list is treated as empty.
    #[serde(default, deserialize_with = "nullable_args")]
    pub args: Vec<String>,
}

impl PluginArgs {
    pub fn new(access_token: AccessToken, args: Vec<String>) -> Self {
        Self { access_token, args }
    }

    /// Decodes the bag, rejecting anything that is not a mapping with a string
    /// `AccessToken` and a list-of-strings `Args`.
    pub fn from_value(value: &Value) -> Result<Self, PluginError> {
        Self::deserialize(value).map_err(PluginError::invalid_arguments)
    }
}

fn nullable_args<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
