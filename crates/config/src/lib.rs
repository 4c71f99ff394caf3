//! # preflight-config
//!
//! Loads deployment variables from YAML/JSON sources, merges them in order
//! and decodes them into [`DeploymentConfig`].
//!
//! Decoding is total: a field with the wrong shape becomes
//! [`Slot::Invalid`] instead of an error, so every problem is left for the
//! rules to report. Only an unreadable source or a document whose root is
//! not a mapping is a [`ConfigError`].

mod error;
mod loader;
mod model;
mod slot;
mod source;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigBuilder, MergeStrategy, decode, load_source};
pub use model::{
    ClientSpec, DeploymentConfig, ExportSpec, KerberosVars, NfsVars, SambaShare, SambaVars,
    ShareSpec, ShareVars, SlotList,
};
pub use slot::{Scalar, Slot, shape_of};
pub use source::{ConfigFormat, ConfigSource};
