//! Bindable resource components.
//!
//! A [`Component`] is any resource that can be bound to a security group:
//! compute instances, load balancers, managed databases, VPC-bound Lambda
//! functions, ECS services and tasks, EKS node groups and VPC endpoints.

use serde::{Deserialize, Serialize};

/// The kind of a bindable resource.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Ec2Instance,
    ClassicLoadBalancer,
    ApplicationLoadBalancer,
    NetworkLoadBalancer,
    DatabaseInstance,
    LambdaFunction,
    EcsService,
    EcsTask,
    EksNodeGroup,
    VpcEndpoint,
}

impl ComponentKind {
    /// Short label used in attachment summaries and report lines.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Ec2Instance => "EC2",
            ComponentKind::ClassicLoadBalancer => "ELB",
            ComponentKind::ApplicationLoadBalancer => "ALB",
            ComponentKind::NetworkLoadBalancer => "NLB",
            ComponentKind::DatabaseInstance => "RDS",
            ComponentKind::LambdaFunction => "Lambda",
            ComponentKind::EcsService => "ECS Service",
            ComponentKind::EcsTask => "ECS Task",
            ComponentKind::EksNodeGroup => "EKS Nodes",
            ComponentKind::VpcEndpoint => "VPC Endpoint",
        }
    }
}

/// A single bindable resource discovered by a collector.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Component {
    pub kind: ComponentKind,
    /// Natural resource id (instance id, ARN, function name, ...).
    /// Components are keyed by this id; re-discovery overwrites.
    pub id: String,
    /// Display name (tag or API name, falling back to the id).
    pub name: String,
    /// Free-text detail shown in reports (type, state, engine, ...).
    pub detail: String,
}
