#![warn(clippy::all)]
pub(crate) mod action;
pub(crate) mod arn;
pub(crate) mod catalog;
pub(crate) mod condition;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod resource;
pub(crate) mod statement;

#[macro_use]
pub(crate) mod serutil;

pub use {
    action::Action,
    arn::SegmentDefault,
    catalog::{
        AccessLevel, ActionCatalog, ActionSpec, ActionSpecBuilder, ActionSpecBuilderError, ConditionKeySpec,
        ResourceTypeCatalog, ResourceTypeRef, ResourceTypeSpec, ResourceTypeSpecBuilder, ResourceTypeSpecBuilderError,
    },
    condition::{Condition, ConditionMap, ConditionOp, ConditionValue, ValueSet},
    effect::Effect,
    error::StanzaError,
    resource::Resource,
    statement::{BuilderState, Statement, StatementBuilder},
};
