//! Core entity fetch: VPCs, security groups and NACLs.
//!
//! Unlike the per-kind component collectors, these are the substance of
//! every render pass, so a failure here is fatal for the run.

use crate::aws::{decode, paginate, ProviderApi};
use crate::models::{NaclRecord, SecurityGroupRecord, Vpc};
use std::error::Error;

pub fn fetch_vpcs(api: &dyn ProviderApi) -> Result<Vec<Vpc>, Box<dyn Error>> {
    paginate(api, "ec2", "describe-vpcs", &[], "Vpcs")?
        .into_iter()
        .map(decode)
        .collect()
}

pub fn fetch_security_groups(
    api: &dyn ProviderApi,
) -> Result<Vec<SecurityGroupRecord>, Box<dyn Error>> {
    paginate(api, "ec2", "describe-security-groups", &[], "SecurityGroups")?
        .into_iter()
        .map(decode)
        .collect()
}

pub fn fetch_nacls(api: &dyn ProviderApi) -> Result<Vec<NaclRecord>, Box<dyn Error>> {
    paginate(api, "ec2", "describe-network-acls", &[], "NetworkAcls")?
        .into_iter()
        .map(decode)
        .collect()
}
