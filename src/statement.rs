use {
    crate::{
        display_json, Action, ActionCatalog, Condition, ConditionKeySpec, ConditionOp, ConditionValue, Effect,
        Resource, ResourceTypeCatalog, StanzaError,
    },
    log::debug,
    serde::Serialize,
    std::collections::{BTreeMap, BTreeSet},
};

/// The lifecycle of a [StatementBuilder]. `Building` is entered on the first
/// action/resource/condition call; `Finalized` is terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuilderState {
    Empty,
    Building,
    Finalized,
}

/// Accumulates one policy statement through fluent calls and freezes it into
/// a [Statement] on [finalize](StatementBuilder::finalize).
///
/// Each mutator returns `Result<&mut Self, StanzaError>` so calls chain with
/// `?`. All failures are contract violations surfaced at the offending call;
/// a failed call leaves the accumulated state untouched. A builder belongs to
/// the single caller that constructed it and is not safe for concurrent use
/// without external synchronization.
#[derive(Clone, Debug)]
pub struct StatementBuilder<'a> {
    service: String,
    actions: &'a ActionCatalog,
    resource_types: &'a ResourceTypeCatalog,
    sid: Option<String>,
    effect: Effect,
    action_set: BTreeSet<Action>,
    resource_set: BTreeSet<Resource>,
    condition: Condition,
    state: BuilderState,
}

impl<'a> StatementBuilder<'a> {
    /// Create a builder for one statement over `service`'s catalogs. The
    /// catalogs are read-only and may be shared across builders freely.
    pub fn new<S: Into<String>>(
        service: S,
        actions: &'a ActionCatalog,
        resource_types: &'a ResourceTypeCatalog,
    ) -> Self {
        Self {
            service: service.into(),
            actions,
            resource_types,
            sid: None,
            effect: Effect::default(),
            action_set: BTreeSet::new(),
            resource_set: BTreeSet::new(),
            condition: Condition::new(),
            state: BuilderState::Empty,
        }
    }

    #[inline]
    pub fn state(&self) -> BuilderState {
        self.state
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    fn ensure_mutable(&self) -> Result<(), StanzaError> {
        if self.state == BuilderState::Finalized {
            debug!("Rejecting mutation of a finalized statement.");
            return Err(StanzaError::StatementFrozen);
        }
        Ok(())
    }

    /// Set the statement effect. Last write wins.
    pub fn effect(&mut self, effect: Effect) -> Result<&mut Self, StanzaError> {
        self.ensure_mutable()?;
        self.effect = effect;
        Ok(self)
    }

    /// Set the statement identifier. Last write wins.
    pub fn sid<S: Into<String>>(&mut self, sid: S) -> Result<&mut Self, StanzaError> {
        self.ensure_mutable()?;
        self.sid = Some(sid.into());
        Ok(self)
    }

    /// Add an action by bare name (qualified with this builder's service
    /// prefix) or by pre-qualified `service:ActionName`. The name must exist
    /// in the service's action catalog. Re-adding an action is a no-op.
    pub fn add_action(&mut self, name: &str) -> Result<&mut Self, StanzaError> {
        self.ensure_mutable()?;

        let action = Action::qualify(&self.service, name)?;
        if !self.actions.contains(action.action()) {
            debug!("Action '{action}' is not in the {} catalog.", self.service);
            return Err(StanzaError::UnknownAction(action.to_string()));
        }

        self.action_set.insert(action);
        self.state = BuilderState::Building;
        Ok(self)
    }

    /// Target a resource by catalog resource type, resolving its ARN template
    /// against the supplied placeholder values.
    pub fn add_resource<'v, V>(&mut self, resource_type: &str, values: V) -> Result<&mut Self, StanzaError>
    where
        V: IntoIterator<Item = (&'v str, &'v str)>,
    {
        self.ensure_mutable()?;

        let spec = match self.resource_types.get(resource_type) {
            Some(spec) => spec,
            None => {
                debug!("Resource type '{resource_type}' is not in the {} catalog.", self.service);
                return Err(StanzaError::UnknownResourceType(resource_type.to_string()));
            }
        };

        let values: BTreeMap<&str, &str> = values.into_iter().collect();
        let arn = spec.resolve(&values)?;

        self.resource_set.insert(Resource::from_arn(arn));
        self.state = BuilderState::Building;
        Ok(self)
    }

    /// Target a raw ARN (or `*`), stored verbatim.
    pub fn add_resource_arn<S: Into<String>>(&mut self, arn: S) -> Result<&mut Self, StanzaError> {
        self.ensure_mutable()?;
        self.resource_set.insert(Resource::from_arn(arn));
        self.state = BuilderState::Building;
        Ok(self)
    }

    /// Constrain the statement under `op` for `key`. Values are coerced to
    /// text and OR-unioned with any existing values for the same operator and
    /// key; an empty value list adds nothing.
    pub fn add_condition<K, V, I>(&mut self, op: ConditionOp, key: K, values: I) -> Result<&mut Self, StanzaError>
    where
        K: Into<String>,
        V: Into<ConditionValue>,
        I: IntoIterator<Item = V>,
    {
        self.ensure_mutable()?;
        self.condition.put(op, key, values);
        self.state = BuilderState::Building;
        Ok(self)
    }

    /// Constrain on a catalog condition key using the default operator its
    /// helper declares.
    pub fn add_condition_for<V, I>(&mut self, key: &ConditionKeySpec, values: I) -> Result<&mut Self, StanzaError>
    where
        V: Into<ConditionValue>,
        I: IntoIterator<Item = V>,
    {
        self.add_condition(key.default_op(), key.name(), values)
    }

    /// Freeze the accumulated state and return the immutable [Statement].
    ///
    /// A statement with no actions is rejected here (and the builder stays
    /// mutable so the caller can repair it). A statement with no resources
    /// gets the wildcard resource. Finalizing an already-frozen builder
    /// returns an equal statement; mutating one is an error.
    pub fn finalize(&mut self) -> Result<Statement, StanzaError> {
        if self.action_set.is_empty() {
            debug!("Rejecting finalize: statement has no actions.");
            return Err(StanzaError::NoActions);
        }

        if self.resource_set.is_empty() {
            self.resource_set.insert(Resource::Any);
        }

        self.state = BuilderState::Finalized;

        Ok(Statement {
            sid: self.sid.clone(),
            effect: self.effect,
            action: self.action_set.clone(),
            resource: self.resource_set.clone(),
            condition: self.condition.clone(),
        })
    }
}

/// One frozen policy statement. Serializes to the Aspen JSON grammar with
/// keys in the order `Sid`, `Effect`, `Action`, `Resource`, `Condition`;
/// `Sid` is omitted when absent and `Condition` when empty, and one-element
/// `Action`/`Resource` sets collapse to a bare string.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none")]
    sid: Option<String>,

    effect: Effect,

    #[serde(serialize_with = "crate::serutil::one_or_many")]
    action: BTreeSet<Action>,

    #[serde(serialize_with = "crate::serutil::one_or_many")]
    resource: BTreeSet<Resource>,

    #[serde(skip_serializing_if = "Condition::is_empty")]
    condition: Condition,
}

impl Statement {
    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn action(&self) -> &BTreeSet<Action> {
        &self.action
    }

    #[inline]
    pub fn resource(&self) -> &BTreeSet<Resource> {
        &self.resource
    }

    #[inline]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

display_json!(Statement);
