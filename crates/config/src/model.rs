//! Typed model of a deployment variables document
//!
//! One struct per role's variables, flattened into [`DeploymentConfig`].
//! Every field is a [`Slot`], so a document always decodes and the rules
//! decide what is missing or malformed.

use crate::slot::{Scalar, Slot};
use serde::Deserialize;

/// A sequence whose elements are decoded independently.
pub type SlotList<T> = Slot<Vec<Slot<T>>>;

/// Kerberos client variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KerberosVars {
    #[serde(rename = "krb5_realm")]
    pub realm: Slot<Scalar>,
    #[serde(rename = "krb5_kdc")]
    pub kdc: Slot<Scalar>,
    #[serde(rename = "krb5_keytab_path")]
    pub keytab_path: Slot<Scalar>,
    /// Each entry is `service/hostname@REALM`.
    #[serde(rename = "krb5_service_principals")]
    pub service_principals: SlotList<Scalar>,
}

/// A filesystem share managed on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShareSpec {
    pub path: Slot<Scalar>,
    pub owner: Slot<Scalar>,
    pub group: Slot<Scalar>,
    pub mode: Slot<Scalar>,
}

/// Share variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShareVars {
    pub shares: SlotList<ShareSpec>,
}

/// A share published by Samba.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SambaShare {
    pub name: Slot<Scalar>,
    pub path: Slot<Scalar>,
    pub comment: Slot<Scalar>,
}

/// Samba variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SambaVars {
    #[serde(rename = "samba_workgroup")]
    pub workgroup: Slot<Scalar>,
    #[serde(rename = "samba_realm")]
    pub realm: Slot<Scalar>,
    #[serde(rename = "samba_security")]
    pub security: Slot<Scalar>,
    #[serde(rename = "samba_shares")]
    pub shares: SlotList<SambaShare>,
}

/// One client access rule of an NFS export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSpec {
    /// Host, wildcard or network the rule applies to.
    pub host: Slot<Scalar>,
    /// Export options for this client, e.g. `rw,sync`.
    pub options: Slot<Scalar>,
}

/// An NFS export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportSpec {
    pub path: Slot<Scalar>,
    pub clients: SlotList<ClientSpec>,
    /// Export options carrying the `sec=` flavour list, e.g. `rw,sec=krb5p`.
    pub security: Slot<Scalar>,
}

/// NFS server variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NfsVars {
    #[serde(rename = "nfs_exports")]
    pub exports: SlotList<ExportSpec>,
}

/// Every variable the rules look at. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeploymentConfig {
    #[serde(flatten)]
    pub kerberos: KerberosVars,
    #[serde(flatten)]
    pub shares: ShareVars,
    #[serde(flatten)]
    pub samba: SambaVars,
    #[serde(flatten)]
    pub nfs: NfsVars,
}
