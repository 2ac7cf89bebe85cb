//! Transport adapter for the doit tag provider plugin.
//!
//! The host CLI calls six methods (`List`, `Create`, `Get`, `Rename`, `Add`,
//! `Remove`), each with an arguments bag holding the user's access token and
//! the positional arguments that followed the subcommand. [`TagPlugin`]
//! decodes the bag, validates the positional arguments, performs one
//! [`tags::TagService`] operation, and renders the result as text.
//!
//! ## Architectural Layer
//!
//! **Adapter.** No HTTP or wire-protocol details live here: the provider is
//! reached through [`tags::TagServiceConnector`], and the RPC framing is
//! owned by the `cli` binary.
//!
//! ## Output
//!
//! | Method | Output |
//! |--------|--------|
//! | `List`, `Get`, `Rename` | `Name`/`Droplets` table, tab-aligned |
//! | `Create` | `created <name>` |
//! | `Add` | `added droplet <id> to <name>` |
//! | `Remove` | `removed droplet <id> from <name>` |

pub mod args;
pub mod errors;
pub mod method;
pub mod plugin;
pub mod render;

pub use args::PluginArgs;
pub use errors::PluginError;
pub use method::Method;
pub use plugin::TagPlugin;
